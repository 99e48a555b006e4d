use rand::rngs::StdRng;
use rand::SeedableRng;

use space_impact::config::{Playfield, SpawnMode, SpawnTuning, Tuning};
use space_impact::entities::EnemyKind;
use space_impact::spawner::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn field() -> Playfield {
    Playfield::default()
}

fn waves() -> SpawnTuning {
    SpawnTuning { mode: SpawnMode::Waves, ..Default::default() }
}

// ── Single mode ───────────────────────────────────────────────────────────────

#[test]
fn first_tick_spawns_immediately() {
    let tuning = Tuning::default();
    let mut sp = Spawner::new(&tuning.spawn);
    let out = sp.tick(0.016, &mut seeded_rng(), &field(), &tuning.enemies);

    assert_eq!(out.enemies.len(), 1);
    assert_eq!(out.formation, None);
    assert!(!out.level_elapsed);
    let e = &out.enemies[0];
    assert_eq!(e.pos.x, 84.0);
    assert!(e.pos.y >= 0.0 && e.pos.y < 38.0);
    assert_eq!(e.pos.y, e.pos.y.floor());
}

#[test]
fn interval_decays_and_timer_rearms() {
    let tuning = Tuning::default();
    let mut sp = Spawner::new(&tuning.spawn);
    sp.tick(0.1, &mut seeded_rng(), &field(), &tuning.enemies);
    assert!((sp.enemy_interval - 1.98).abs() < 1e-6);
    assert_eq!(sp.enemy_timer, sp.enemy_interval);
}

#[test]
fn no_spawn_before_timer_runs_out() {
    let tuning = Tuning::default();
    let mut rng = seeded_rng();
    let mut sp = Spawner::new(&tuning.spawn);
    sp.tick(0.1, &mut rng, &field(), &tuning.enemies);

    let mut spawned = 0;
    for _ in 0..19 {
        spawned += sp.tick(0.1, &mut rng, &field(), &tuning.enemies).enemies.len();
    }
    assert_eq!(spawned, 0);
    assert!((sp.enemy_interval - 1.98).abs() < 1e-6);
}

#[test]
fn interval_never_drops_below_floor() {
    let tuning = Tuning::default();
    let mut rng = seeded_rng();
    let mut sp = Spawner::new(&SpawnTuning { level_duration: 1.0e6, ..tuning.spawn });
    let mut prev = sp.enemy_interval;
    for _ in 0..500 {
        sp.enemy_timer = 0.0;
        sp.tick(0.01, &mut rng, &field(), &tuning.enemies);
        assert!(sp.enemy_interval <= prev);
        assert!(sp.enemy_interval >= 0.5);
        prev = sp.enemy_interval;
    }
    // 2.0 * 0.99^n hits 0.5 after ~138 spawns
    assert_eq!(sp.enemy_interval, 0.5);
}

#[test]
fn level_clock_accumulates() {
    let tuning = Tuning::default();
    let mut sp = Spawner::new(&tuning.spawn);
    sp.tick(0.25, &mut seeded_rng(), &field(), &tuning.enemies);
    sp.tick(0.25, &mut seeded_rng(), &field(), &tuning.enemies);
    assert_eq!(sp.level_timer, 0.5);
    assert!(!sp.level_elapsed());
}

#[test]
fn elapsed_level_stops_spawning() {
    let tuning = Tuning::default();
    let mut sp = Spawner::new(&tuning.spawn);
    sp.level_timer = 59.95;
    let out = sp.tick(0.1, &mut seeded_rng(), &field(), &tuning.enemies);
    assert!(out.level_elapsed);
    assert!(out.enemies.is_empty());
    assert!(sp.level_elapsed());
    assert_eq!(sp.enemy_interval, 2.0);
}

#[test]
fn kind_mix_covers_every_kind() {
    let tuning = Tuning::default();
    let mut rng = seeded_rng();
    let mut sp = Spawner::new(&SpawnTuning { level_duration: 1.0e6, ..tuning.spawn });
    let mut seen = [0usize; 3];
    for _ in 0..300 {
        sp.enemy_timer = 0.0;
        for e in sp.tick(0.01, &mut rng, &field(), &tuning.enemies).enemies {
            match e.kind {
                EnemyKind::Basic => seen[0] += 1,
                EnemyKind::Squid => seen[1] += 1,
                EnemyKind::Skull => seen[2] += 1,
            }
        }
    }
    assert!(seen.iter().all(|&n| n > 0));
    assert!(seen[0] > seen[1] && seen[1] > seen[2]);
}

#[test]
fn short_playfield_pins_spawns_to_the_top() {
    let tuning = Tuning::default();
    let mut sp = Spawner::new(&tuning.spawn);
    let tiny = Playfield { width: 84.0, height: 8.0 };
    let out = sp.tick(0.1, &mut seeded_rng(), &tiny, &tuning.enemies);
    assert_eq!(out.enemies[0].pos.y, 0.0);
}

// ── Waves mode ────────────────────────────────────────────────────────────────

#[test]
fn formations_have_fixed_shapes() {
    let table = Tuning::default().enemies;
    let kinds = |f: Formation| f.units(84.0, 0.0, &table).iter().map(|e| e.kind).collect::<Vec<_>>();

    assert_eq!(kinds(Formation::Line), vec![EnemyKind::Basic; 3]);
    assert_eq!(kinds(Formation::Vee), vec![EnemyKind::Basic, EnemyKind::Squid, EnemyKind::Squid]);
    assert_eq!(kinds(Formation::HeavyPair), vec![EnemyKind::Skull; 2]);
}

#[test]
fn formation_units_fit_inside_their_extent() {
    let table = Tuning::default().enemies;
    for f in Formation::ALL {
        for e in f.units(84.0, 10.0, &table) {
            assert!(e.pos.y >= 10.0);
            assert!(e.pos.y + e.size.y <= 10.0 + f.extent(), "{f:?}");
            assert!(e.pos.x >= 84.0);
        }
    }
}

#[test]
fn waves_spawn_whole_formations_on_field() {
    let tuning = Tuning::default();
    let mut rng = seeded_rng();
    let mut sp = Spawner::new(&SpawnTuning { level_duration: 1.0e6, ..waves() });
    for _ in 0..50 {
        sp.enemy_timer = 0.0;
        let out = sp.tick(0.01, &mut rng, &field(), &tuning.enemies);
        let formation = out.formation.expect("waves spawn formations");
        assert_eq!(out.enemies.len(), formation.units(0.0, 0.0, &tuning.enemies).len());
        for e in &out.enemies {
            assert!(e.pos.y >= 0.0 && e.pos.y + e.size.y <= 48.0);
        }
    }
}

#[test]
fn waves_rearm_on_wave_interval_while_interval_still_ramps() {
    let tuning = Tuning::default();
    let mut sp = Spawner::new(&waves());
    sp.tick(0.1, &mut seeded_rng(), &field(), &tuning.enemies);
    assert_eq!(sp.enemy_timer, 3.0);
    assert!((sp.enemy_interval - 1.98).abs() < 1e-6);
}
