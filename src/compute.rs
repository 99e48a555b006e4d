/// The per-frame simulation step.
///
/// `tick` runs one frame of the pipeline against a session:
///
///   player → spawner → entities → collisions → cleanup → transitions
///
/// Randomness comes only through the injected `rng`, so a seeded RNG makes
/// the whole step reproducible.

use rand::Rng;

use crate::collision::CollisionReport;
use crate::entities::GameStatus;
use crate::input::KeyState;
use crate::session::GameSession;

/// What happened during one `tick`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Enemies added by the spawner this frame.
    pub spawned: usize,
    /// `None` when the status skips collision resolution.
    pub collisions: Option<CollisionReport>,
    /// PLAYING → BOSS_WARNING happened this frame; the caller owes the
    /// session a delayed boss spawn.
    pub boss_warning_started: bool,
}

/// Advance `session` by `dt` seconds with the keys held this frame.
pub fn tick(session: &mut GameSession, keys: &KeyState, dt: f32, rng: &mut impl Rng) -> TickReport {
    let mut report = TickReport::default();

    let status = session.status();
    if status.awaits_confirm() {
        if keys.confirm {
            session.confirm();
        }
        return report;
    }

    let tuning = session.tuning;
    let field = session.field;

    // ── 1. Player ────────────────────────────────────────────────────────────
    let world = &mut session.world;
    if let Some(shot) = world.player.update(dt, keys, &field, &tuning) {
        world.projectiles.push(shot);
    }

    // ── 2. Spawner (PLAYING only) ────────────────────────────────────────────
    if status == GameStatus::Playing {
        let outcome = session.spawner.tick(dt, rng, &field, &tuning.enemies);
        report.spawned = outcome.enemies.len();
        session.world.enemies.extend(outcome.enemies);
    }

    // ── 3. Entities ──────────────────────────────────────────────────────────
    let world = &mut session.world;
    for shot in &mut world.projectiles {
        shot.update(dt, &field, tuning.projectile_margin);
    }
    for shot in &mut world.enemy_projectiles {
        shot.update(dt, &field, tuning.projectile_margin);
    }
    let mut fired = Vec::new();
    for enemy in &mut world.enemies {
        fired.extend(enemy.update(dt, &field, &tuning));
    }
    if let Some(boss) = world.boss.as_mut() {
        fired.extend(boss.update(dt, &tuning));
    }
    world.enemy_projectiles.extend(fired);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    if status.resolves_collisions() {
        let collisions = session.apply_collisions();
        if !collisions.destroyed.is_empty() || collisions.boss_hits > 0 || collisions.player_hit {
            log::debug!("collisions: {collisions:?}");
        }
        report.collisions = Some(collisions);
    }

    // ── 5. Cleanup ───────────────────────────────────────────────────────────
    session.world.cleanup();

    // ── 6. State machine ─────────────────────────────────────────────────────
    report.boss_warning_started = session.check_transitions();
    report
}
