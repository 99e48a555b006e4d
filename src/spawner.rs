/// Timer-driven enemy generation and the level clock.
///
/// The spawner only produces enemies; the caller decides what to do with
/// them and with the level-elapsed signal.  All randomness comes through the
/// injected `rng` so tests can seed it.

use glam::Vec2;
use rand::Rng;

use crate::config::{EnemyTable, Playfield, SpawnMode, SpawnTuning};
use crate::entities::{Enemy, EnemyKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Formation {
    /// Three basics abreast, one behind the other along the flight path.
    Line,
    /// A basic leader with two armed wingmen trailing above and below.
    Vee,
    /// Two skulls stacked vertically.
    HeavyPair,
}

impl Formation {
    pub const ALL: [Formation; 3] = [Formation::Line, Formation::Vee, Formation::HeavyPair];

    /// Vertical space the formation needs.
    pub fn extent(self) -> f32 {
        match self {
            Formation::Line => EnemyKind::Basic.size().y,
            Formation::Vee => 14.0 + EnemyKind::Squid.size().y,
            Formation::HeavyPair => 10.0 + EnemyKind::Skull.size().y,
        }
    }

    /// Units of the formation with its top edge at `top`, entering at `x`.
    pub fn units(self, x: f32, top: f32, table: &EnemyTable) -> Vec<Enemy> {
        let unit = |kind: EnemyKind, dx: f32, dy: f32| Enemy::new(kind, Vec2::new(x + dx, top + dy), table.get(kind));
        match self {
            Formation::Line => vec![
                unit(EnemyKind::Basic, 0.0, 0.0),
                unit(EnemyKind::Basic, 10.0, 0.0),
                unit(EnemyKind::Basic, 20.0, 0.0),
            ],
            Formation::Vee => vec![
                unit(EnemyKind::Basic, 0.0, 7.0),
                unit(EnemyKind::Squid, 8.0, 0.0),
                unit(EnemyKind::Squid, 8.0, 14.0),
            ],
            Formation::HeavyPair => vec![
                unit(EnemyKind::Skull, 0.0, 0.0),
                unit(EnemyKind::Skull, 0.0, 10.0),
            ],
        }
    }
}

/// What one spawner tick produced.
#[derive(Debug, Default)]
pub struct SpawnOutcome {
    pub enemies: Vec<Enemy>,
    pub formation: Option<Formation>,
    /// The level clock has run out; no more enemies will come this level.
    pub level_elapsed: bool,
}

#[derive(Clone, Debug)]
pub struct Spawner {
    pub enemy_timer: f32,
    pub enemy_interval: f32,
    pub level_timer: f32,
    tuning: SpawnTuning,
}

impl Spawner {
    /// The first spawn happens on the first tick.
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            enemy_timer: 0.0,
            enemy_interval: tuning.initial_interval,
            level_timer: 0.0,
            tuning: *tuning,
        }
    }

    pub fn level_elapsed(&self) -> bool {
        self.level_timer >= self.tuning.level_duration
    }

    /// Advance the level clock and the spawn timer by `dt`.
    pub fn tick(
        &mut self,
        dt: f32,
        rng: &mut impl Rng,
        field: &Playfield,
        table: &EnemyTable,
    ) -> SpawnOutcome {
        self.level_timer += dt;
        if self.level_elapsed() {
            return SpawnOutcome { level_elapsed: true, ..Default::default() };
        }

        self.enemy_timer -= dt;
        if self.enemy_timer > 0.0 {
            return SpawnOutcome::default();
        }

        let outcome = match self.tuning.mode {
            SpawnMode::Single => {
                let kind = random_kind(rng);
                let y = random_top(rng, field.height - 10.0);
                SpawnOutcome {
                    enemies: vec![Enemy::new(kind, Vec2::new(field.width, y), table.get(kind))],
                    ..Default::default()
                }
            }
            SpawnMode::Waves => {
                let formation = Formation::ALL[rng.gen_range(0..Formation::ALL.len())];
                let top = random_top(rng, field.height - formation.extent());
                SpawnOutcome {
                    enemies: formation.units(field.width, top, table),
                    formation: Some(formation),
                    level_elapsed: false,
                }
            }
        };

        self.ramp();
        self.enemy_timer = match self.tuning.mode {
            SpawnMode::Single => self.enemy_interval,
            SpawnMode::Waves => self.tuning.wave_interval,
        };

        log::debug!(
            "spawned {} enemies ({:?}), next interval {:.3}s",
            outcome.enemies.len(),
            outcome.formation,
            self.enemy_interval
        );
        outcome
    }

    /// Multiplicative decay with a hard floor.
    fn ramp(&mut self) {
        self.enemy_interval = (self.enemy_interval * self.tuning.decay).max(self.tuning.interval_floor);
    }
}

/// Basic 60%, Squid 30%, Skull 10%.
fn random_kind(rng: &mut impl Rng) -> EnemyKind {
    match rng.gen_range(0..10) {
        0..=5 => EnemyKind::Basic,
        6..=8 => EnemyKind::Squid,
        _ => EnemyKind::Skull,
    }
}

/// Uniform in `[0, span)`, or 0 when the playfield is too short.
fn random_top(rng: &mut impl Rng, span: f32) -> f32 {
    if span > 0.0 {
        rng.gen_range(0.0..span).floor()
    } else {
        0.0
    }
}
