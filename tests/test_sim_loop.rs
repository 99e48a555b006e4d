use glam::Vec2;

use space_impact::config::{Playfield, Tuning};
use space_impact::entities::*;
use space_impact::input::KeyState;
use space_impact::render::{Renderer, Sprite};
use space_impact::sim_loop::*;

fn make_loop(tuning: Tuning) -> SimulationLoop {
    SimulationLoop::seeded(tuning, Playfield::default(), 42)
}

fn idle() -> KeyState {
    KeyState::default()
}

fn confirm() -> KeyState {
    KeyState { confirm: true, ..Default::default() }
}

/// Start a run, put three enemies on screen and run the level clock out.
fn enter_boss_warning(sim: &mut SimulationLoop) {
    sim.step(confirm(), 0.1);
    assert_eq!(sim.session().status(), GameStatus::Playing);

    let s = sim.session_mut();
    let table = s.tuning.enemies;
    for y in [5.0, 15.0, 35.0] {
        s.world.enemies.push(Enemy::new(EnemyKind::Basic, Vec2::new(60.0, y), table.get(EnemyKind::Basic)));
    }
    s.spawner.level_timer = 59.95;

    let report = sim.step(idle(), 0.1);
    assert!(report.boss_warning_started);
    assert_eq!(sim.session().status(), GameStatus::BossWarning);
    assert!(sim.session().world.enemies.is_empty());
    assert_eq!(sim.pending_events(), 1);
}

// ── Recording renderer ────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    clears: usize,
    rects: Vec<(f32, f32, f32, f32)>,
    sprites: Vec<(f32, f32)>,
    texts: Vec<String>,
}

impl Renderer for Recorder {
    fn clear(&mut self) {
        self.clears += 1;
        self.rects.clear();
        self.sprites.clear();
        self.texts.clear();
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.rects.push((x, y, w, h));
    }

    fn draw_sprite(&mut self, x: f32, y: f32, _sprite: &Sprite) {
        self.sprites.push((x, y));
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: Option<u16>) {
        self.texts.push(text.to_string());
    }
}

impl Recorder {
    fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

// ── Frame delta ───────────────────────────────────────────────────────────────

#[test]
fn sanitize_dt_clamps_and_rejects_garbage() {
    assert_eq!(sanitize_dt(0.05), 0.05);
    assert_eq!(sanitize_dt(-1.0), 0.0);
    assert_eq!(sanitize_dt(f32::NAN), 0.0);
    assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    assert_eq!(sanitize_dt(5.0), MAX_FRAME_DT);
}

#[test]
fn long_frame_advances_the_clock_by_the_cap() {
    let mut sim = make_loop(Tuning::default());
    sim.step(idle(), 5.0);
    assert!((sim.clock() - f64::from(MAX_FRAME_DT)).abs() < 1e-9);
    sim.step(idle(), -3.0);
    assert!((sim.clock() - f64::from(MAX_FRAME_DT)).abs() < 1e-9);
}

// ── Boss arrival ──────────────────────────────────────────────────────────────

#[test]
fn boss_arrives_once_after_the_warning_delay() {
    let mut sim = make_loop(Tuning::default());
    enter_boss_warning(&mut sim);

    // 2.9 s into the 3 s warning
    for _ in 0..29 {
        sim.step(idle(), 0.1);
        assert_eq!(sim.session().status(), GameStatus::BossWarning);
        assert!(sim.session().world.boss.is_none());
    }

    let mut extra = 0;
    while sim.session().status() == GameStatus::BossWarning && extra < 5 {
        sim.step(idle(), 0.1);
        extra += 1;
    }
    assert_eq!(sim.session().status(), GameStatus::Boss);
    assert!(extra <= 2);
    assert_eq!(sim.pending_events(), 0);

    let boss = sim.session().world.boss.as_ref().expect("boss on field");
    assert_eq!(boss.hp, boss.max_hp);
    assert_eq!(boss.hp, 30);

    for _ in 0..30 {
        sim.step(idle(), 0.1);
    }
    assert!(sim.session().world.boss.is_some());
    assert_eq!(sim.pending_events(), 0);
}

#[test]
fn restart_during_warning_discards_the_pending_boss() {
    let mut sim = make_loop(Tuning { lives: 9, ..Default::default() });
    enter_boss_warning(&mut sim);
    for _ in 0..10 {
        sim.step(idle(), 0.1);
    }

    assert!(sim.restart());
    assert_eq!(sim.session().status(), GameStatus::Playing);
    assert_eq!(sim.session().level_timer(), 0.0);
    assert_eq!(sim.session().epoch(), 2);
    assert_eq!(sim.pending_events(), 1);

    for _ in 0..40 {
        sim.step(idle(), 0.1);
        assert_eq!(sim.session().status(), GameStatus::Playing);
        assert!(sim.session().world.boss.is_none());
    }
    assert_eq!(sim.pending_events(), 0);
}

#[test]
fn warning_window_cannot_end_the_run() {
    let mut sim = make_loop(Tuning::default());
    enter_boss_warning(&mut sim);

    let s = sim.session_mut();
    s.world.player.lives = 1;
    s.world.enemy_projectiles.push(Projectile::enemy(Vec2::new(10.0, 22.0), 40.0));
    let report = s.apply_collisions();
    assert!(!report.player_hit);
    assert_eq!(s.status(), GameStatus::BossWarning);

    sim.step(idle(), 0.1);
    assert_eq!(sim.session().status(), GameStatus::BossWarning);
    assert_eq!(sim.session().lives(), 1);
    assert_eq!(sim.pending_events(), 1);
}

#[test]
fn restart_is_refused_in_menu() {
    let mut sim = make_loop(Tuning::default());
    assert!(!sim.restart());
    assert_eq!(sim.session().status(), GameStatus::Menu);
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn menu_frame_shows_title() {
    let mut sim = make_loop(Tuning::default());
    let mut rec = Recorder::default();
    sim.frame(0.1, &idle(), &mut rec);

    assert_eq!(rec.clears, 1);
    assert!(rec.has_text("SPACE IMPACT"));
    assert!(rec.has_text("PRESS ENTER"));
    assert!(rec.sprites.is_empty());
}

#[test]
fn playing_frame_draws_world_and_hud() {
    let mut sim = make_loop(Tuning::default());
    let mut rec = Recorder::default();
    sim.frame(0.1, &confirm(), &mut rec);
    sim.frame(0.1, &KeyState { fire: true, ..Default::default() }, &mut rec);

    assert_eq!(rec.clears, 2);
    // player plus the freshly spawned enemy
    assert_eq!(rec.sprites.len(), 2);
    assert_eq!(rec.rects.len(), 1); // one shot
    assert!(rec.has_text("00000"));
    assert!(rec.has_text("x3"));
}

#[test]
fn game_over_frame_shows_score() {
    let mut sim = make_loop(Tuning::default());
    sim.step(confirm(), 0.1);
    let s = sim.session_mut();
    s.score = 700;
    s.world.player.lives = 1;
    s.world.enemy_projectiles.push(Projectile::enemy(Vec2::new(10.0, 22.0), 40.0));
    sim.step(idle(), 0.1);
    assert_eq!(sim.session().status(), GameStatus::GameOver);

    let mut rec = Recorder::default();
    sim.frame(0.1, &idle(), &mut rec);
    assert!(rec.has_text("GAME OVER"));
    assert!(rec.has_text("SCORE: 700"));
}

#[test]
fn warning_text_blinks() {
    let mut sim = make_loop(Tuning::default());
    enter_boss_warning(&mut sim);

    let mut rec = Recorder::default();
    let mut shown = Vec::new();
    for _ in 0..10 {
        sim.frame(0.1, &idle(), &mut rec);
        shown.push(rec.has_text("WARNING"));
    }
    assert!(shown.iter().any(|&s| s));
    assert!(shown.iter().any(|&s| !s));
}

#[test]
fn boss_frame_draws_boss_and_hp_bar() {
    let mut sim = make_loop(Tuning::default());
    enter_boss_warning(&mut sim);
    for _ in 0..35 {
        sim.step(idle(), 0.1);
    }
    assert_eq!(sim.session().status(), GameStatus::Boss);
    sim.session_mut().world.enemy_projectiles.clear();

    let mut rec = Recorder::default();
    sim.frame(0.0, &idle(), &mut rec);
    let boss = sim.session().world.boss.as_ref().expect("boss");
    assert!(rec.rects.contains(&(boss.pos.x, boss.pos.y, 16.0, 14.0)));
    assert!(rec.rects.contains(&(boss.pos.x, boss.pos.y - 2.0, 16.0, 1.0)));
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_frames() {
    let run = || {
        let mut sim = make_loop(Tuning::default());
        sim.step(confirm(), 0.1);
        for i in 0..200 {
            let keys = KeyState { fire: i % 3 == 0, up: i % 7 < 3, ..Default::default() };
            sim.step(keys, 0.1);
        }
        let s = sim.session();
        (s.score, s.lives(), s.world.enemies.len(), s.world.player.pos)
    };
    assert_eq!(run(), run());
}
