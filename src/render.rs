/// Renderer collaborator interface and the per-frame draw list.
///
/// The core decides *what* is on screen each frame; how a rectangle or a
/// bitmap becomes pixels is entirely the host's business.

use crate::entities::{EnemyKind, GameStatus};
use crate::session::GameSession;

/// A 1-bit bitmap, row-major; non-zero cells are lit.
pub type Sprite = [&'static [u8]];

pub trait Renderer {
    fn clear(&mut self);
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_sprite(&mut self, x: f32, y: f32, sprite: &Sprite);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: Option<u16>);
}

// ── Sprites ───────────────────────────────────────────────────────────────────

pub const PLAYER_SPRITE: &Sprite = &[
    &[0, 0, 0, 0, 1, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[0, 1, 1, 1, 1, 1, 1, 0],
    &[0, 0, 0, 0, 1, 1, 0, 0],
];

pub const BASIC_SPRITE: &Sprite = &[
    &[0, 1, 1, 1, 0, 0],
    &[1, 1, 1, 1, 1, 0],
    &[0, 1, 1, 1, 0, 1],
    &[1, 1, 1, 1, 1, 0],
    &[0, 1, 1, 1, 0, 0],
];

pub const SQUID_SPRITE: &Sprite = &[
    &[0, 0, 1, 1, 1, 0, 0],
    &[0, 1, 1, 0, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 1, 0, 1, 0, 1],
    &[1, 0, 1, 0, 1, 0, 1],
];

pub const SKULL_SPRITE: &Sprite = &[
    &[0, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 0, 1, 0, 0, 1],
    &[1, 1, 1, 1, 1, 1, 1],
    &[0, 1, 1, 0, 1, 1, 0],
    &[0, 1, 0, 1, 0, 1, 0],
    &[0, 0, 1, 1, 1, 0, 0],
];

pub fn enemy_sprite(kind: EnemyKind) -> &'static Sprite {
    match kind {
        EnemyKind::Basic => BASIC_SPRITE,
        EnemyKind::Squid => SQUID_SPRITE,
        EnemyKind::Skull => SKULL_SPRITE,
    }
}

/// Square wave that flips `hz` times per second of loop time.
fn blink(clock: f64, hz: f64) -> bool {
    (clock * hz).floor() as i64 % 2 == 0
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Issue every draw call for one frame.
pub fn draw_frame(r: &mut impl Renderer, session: &GameSession, clock: f64) {
    r.clear();

    match session.status() {
        GameStatus::Menu => {
            r.draw_text("SPACE IMPACT", 15.0, 20.0, Some(10));
            r.draw_text("PRESS ENTER", 20.0, 35.0, None);
        }
        GameStatus::GameOver => {
            r.draw_text("GAME OVER", 25.0, 20.0, Some(10));
            r.draw_text(&format!("SCORE: {}", session.score), 20.0, 30.0, None);
            r.draw_text("PRESS ENTER", 20.0, 40.0, None);
        }
        GameStatus::LevelComplete => {
            r.draw_text("LEVEL COMPLETE", 12.0, 20.0, Some(10));
            r.draw_text(&format!("SCORE: {}", session.score), 20.0, 30.0, None);
            r.draw_text("PRESS ENTER", 20.0, 40.0, None);
        }
        GameStatus::Playing | GameStatus::BossWarning | GameStatus::Boss => {
            draw_world(r, session, clock);
            draw_hud(r, session);
            if session.status() == GameStatus::BossWarning && blink(clock, 4.0) {
                r.draw_text("WARNING", 26.0, 22.0, Some(10));
            }
        }
    }
}

fn draw_world(r: &mut impl Renderer, session: &GameSession, clock: f64) {
    let world = &session.world;

    // Flicker while invulnerable
    let player = &world.player;
    if !player.is_invulnerable() || blink(clock, 8.0) {
        r.draw_sprite(player.pos.x, player.pos.y, PLAYER_SPRITE);
    }

    for enemy in &world.enemies {
        r.draw_sprite(enemy.pos.x, enemy.pos.y, enemy_sprite(enemy.kind));
    }
    for shot in world.projectiles.iter().chain(&world.enemy_projectiles) {
        r.draw_rect(shot.pos.x, shot.pos.y, shot.size.x, shot.size.y);
    }

    if let Some(boss) = &world.boss {
        r.draw_rect(boss.pos.x, boss.pos.y, boss.size.x, boss.size.y);
        // hp bar along the top edge
        let frac = boss.hp.max(0) as f32 / boss.max_hp.max(1) as f32;
        r.draw_rect(boss.pos.x, boss.pos.y - 2.0, boss.size.x * frac, 1.0);
    }
}

fn draw_hud(r: &mut impl Renderer, session: &GameSession) {
    r.draw_text(&format!("{:05}", session.score), 1.0, 0.0, None);
    let lives = format!("x{}", session.lives());
    r.draw_text(&lives, session.field.width - 4.0 * lives.len() as f32, 0.0, None);
}
