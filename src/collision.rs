/// Pairwise overlap resolution with a fixed evaluation order.
///
/// Order matters:
///   1. player shots vs enemies
///   2. player shots vs boss, once it has entered the playfield
///   3. invulnerability gate
///   4. player vs every hostile, folded into a single hit
///
/// A shot is marked deleted on its first hit, so it can never score twice,
/// and an enemy killed in step 1 is already excluded from step 4.

use crate::config::{Playfield, Tuning};
use crate::entities::{EnemyKind, Entity, Hitbox};
use crate::session::World;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Kinds of enemies destroyed by player shots, in hit order.
    pub destroyed: Vec<EnemyKind>,
    pub boss_hits: u32,
    /// The boss reached 0 hp this frame and is marked deleted.
    pub boss_defeated: bool,
    pub score: u32,
    /// Hostiles consumed by touching the player.
    pub consumed: u32,
    /// The player lost a life this frame.
    pub player_hit: bool,
}

/// Resolve every collision for one frame.  Mutates hp, deletion flags,
/// lives and invulnerability in `world`; score and the boss outcome are
/// returned in the report for the session to bank.
pub fn resolve(world: &mut World, tuning: &Tuning, field: &Playfield) -> CollisionReport {
    let mut report = CollisionReport::default();

    // 1. Shots vs enemies
    for shot in world.projectiles.iter_mut().filter(|p| !p.is_deleted()) {
        for enemy in world.enemies.iter_mut() {
            if enemy.is_deleted() || !shot.intersects(&*enemy) {
                continue;
            }
            shot.mark_deleted();
            enemy.hp -= 1;
            if enemy.hp <= 0 {
                enemy.mark_deleted();
                report.score += tuning.enemies.get(enemy.kind).score;
                report.destroyed.push(enemy.kind);
            }
            break;
        }
    }

    // 2. Shots vs boss; an off-screen boss cannot be hit
    if let Some(boss) = world.boss.as_mut().filter(|b| !b.is_deleted() && b.pos.x < field.width) {
        for shot in world.projectiles.iter_mut() {
            if shot.is_deleted() || !shot.intersects(&*boss) {
                continue;
            }
            shot.mark_deleted();
            boss.hp -= 1;
            report.boss_hits += 1;
            if boss.is_defeated() {
                boss.mark_deleted();
                report.boss_defeated = true;
                break;
            }
        }
    }

    // 3. Grace period
    if world.player.is_invulnerable() {
        return report;
    }

    // 4. Player damage, at most one life per frame
    let player = &world.player;
    let mut hit = false;
    for enemy in world.enemies.iter_mut().filter(|e| !e.is_deleted()) {
        if player.intersects(&*enemy) {
            enemy.mark_deleted();
            report.consumed += 1;
            hit = true;
        }
    }
    for shot in world.enemy_projectiles.iter_mut().filter(|p| !p.is_deleted()) {
        if player.intersects(&*shot) {
            shot.mark_deleted();
            report.consumed += 1;
            hit = true;
        }
    }
    if let Some(boss) = world.boss.as_ref().filter(|b| !b.is_deleted()) {
        hit |= player.intersects(boss);
    }

    if hit {
        let player = &mut world.player;
        player.lives = player.lives.saturating_sub(1);
        player.invulnerable_for = tuning.invulnerability;
        report.player_hit = true;
    }
    report
}
