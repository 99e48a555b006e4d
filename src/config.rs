/// Gameplay tuning and playfield dimensions.
///
/// Every constant the simulation reads lives in `Tuning`.  The defaults are
/// the reference tuning; a JSON file may override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::EnemyKind;

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Playfield bounds, supplied by the host at startup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    /// The classic 84×48 handset screen.
    fn default() -> Self {
        Self { width: 84.0, height: 48.0 }
    }
}

// ── Per-kind enemy tuning ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub hp: i32,
    pub speed: f32,
    pub score: u32,
    /// Seconds between shots; `None` for kinds that never fire.
    pub fire_interval: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub basic: EnemyTuning,
    pub squid: EnemyTuning,
    pub skull: EnemyTuning,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            basic: EnemyTuning { hp: 1, speed: 15.0, score: 100, fire_interval: None },
            squid: EnemyTuning { hp: 1, speed: 20.0, score: 100, fire_interval: Some(2.5) },
            skull: EnemyTuning { hp: 3, speed: 10.0, score: 300, fire_interval: None },
        }
    }
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyTuning {
        match kind {
            EnemyKind::Basic => &self.basic,
            EnemyKind::Squid => &self.squid,
            EnemyKind::Skull => &self.skull,
        }
    }
}

// ── Spawner tuning ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    /// One random enemy per spawn event, on a decaying interval.
    #[default]
    Single,
    /// One random formation per spawn event, on a fixed interval.
    Waves,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub mode: SpawnMode,
    pub initial_interval: f32,
    pub interval_floor: f32,
    pub decay: f32,
    pub wave_interval: f32,
    /// Seconds of PLAYING before the boss warning.
    pub level_duration: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            mode: SpawnMode::Single,
            initial_interval: 2.0,
            interval_floor: 0.5,
            decay: 0.99,
            wave_interval: 3.0,
            level_duration: 60.0,
        }
    }
}

// ── Boss tuning ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub hp: i32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub fire_interval: f32,
    /// Gap between the resting boss and the right edge.
    pub rest_margin: f32,
    pub bonus: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            hp: 30,
            width: 16.0,
            height: 14.0,
            speed: 10.0,
            fire_interval: 1.2,
            rest_margin: 4.0,
            bonus: 1000,
        }
    }
}

// ── Top-level tuning ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lives: u32,
    pub player_speed: f32,
    pub shot_cooldown: f32,
    pub invulnerability: f32,
    pub projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    /// How far past the far edge a projectile travels before it is dropped.
    pub projectile_margin: f32,
    /// How far past the left edge an enemy travels before it has escaped.
    pub enemy_margin: f32,
    /// Real-time delay between BOSS_WARNING and BOSS.
    pub boss_warning_delay: f32,
    pub enemies: EnemyTable,
    pub spawn: SpawnTuning,
    pub boss: BossTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lives: 3,
            player_speed: 30.0,
            shot_cooldown: 0.3,
            invulnerability: 2.0,
            projectile_speed: 80.0,
            enemy_projectile_speed: 40.0,
            projectile_margin: 16.0,
            enemy_margin: 10.0,
            boss_warning_delay: 3.0,
            enemies: EnemyTable::default(),
            spawn: SpawnTuning::default(),
            boss: BossTuning::default(),
        }
    }
}

impl Tuning {
    /// Read a JSON tuning file.  Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: format!("must be > 0, got {value}") })
            }
        }

        if self.lives == 0 {
            return Err(ConfigError::Invalid { field: "lives", reason: "must be at least 1".into() });
        }
        positive("player_speed", self.player_speed)?;
        positive("shot_cooldown", self.shot_cooldown)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("enemy_projectile_speed", self.enemy_projectile_speed)?;
        positive("boss_warning_delay", self.boss_warning_delay)?;
        positive("spawn.initial_interval", self.spawn.initial_interval)?;
        positive("spawn.interval_floor", self.spawn.interval_floor)?;
        positive("spawn.wave_interval", self.spawn.wave_interval)?;
        positive("spawn.level_duration", self.spawn.level_duration)?;
        positive("boss.width", self.boss.width)?;
        positive("boss.height", self.boss.height)?;
        positive("boss.speed", self.boss.speed)?;
        positive("boss.fire_interval", self.boss.fire_interval)?;

        if !(self.spawn.decay > 0.0 && self.spawn.decay <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "spawn.decay",
                reason: format!("must be in (0, 1], got {}", self.spawn.decay),
            });
        }
        if self.spawn.interval_floor > self.spawn.initial_interval {
            return Err(ConfigError::Invalid {
                field: "spawn.interval_floor",
                reason: "must not exceed spawn.initial_interval".into(),
            });
        }
        if self.boss.hp < 1 {
            return Err(ConfigError::Invalid { field: "boss.hp", reason: "must be at least 1".into() });
        }
        for (field, kind) in [
            ("enemies.basic", &self.enemies.basic),
            ("enemies.squid", &self.enemies.squid),
            ("enemies.skull", &self.enemies.skull),
        ] {
            if kind.hp < 1 {
                return Err(ConfigError::Invalid { field, reason: "hp must be at least 1".into() });
            }
            positive(field, kind.speed)?;
            if let Some(interval) = kind.fire_interval {
                positive(field, interval)?;
            }
        }
        Ok(())
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning file: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}
