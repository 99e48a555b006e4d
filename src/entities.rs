/// Game entity types and the shared geometry contract.
///
/// Per-frame behaviour lives in `kinematics`; this module only holds the data
/// each variant owns, its constructors, and the bounding-box test.

use glam::Vec2;

use crate::config::{BossTuning, EnemyTuning, Playfield, Tuning};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Basic,
    Squid,
    Skull,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Basic => Vec2::new(6.0, 5.0),
            EnemyKind::Squid => Vec2::new(7.0, 5.0),
            EnemyKind::Skull => Vec2::new(7.0, 7.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    BossWarning,
    Boss,
    LevelComplete,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { pos: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap on both axes.  Rectangles that only share an edge do
    /// not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a0, a1) = (self.pos, self.max());
        let (b0, b1) = (other.pos, other.max());
        a0.x < b1.x && a1.x > b0.x && a0.y < b1.y && a1.y > b0.y
    }
}

/// Anything that occupies a rectangle on the playfield.
pub trait Hitbox {
    fn bounds(&self) -> Rect;

    fn intersects(&self, other: &impl Hitbox) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// A hitbox with a one-way deletion flag.  Once marked, an entity is skipped
/// by every update and collision pass and dropped at the end of the frame.
pub trait Entity: Hitbox {
    fn is_deleted(&self) -> bool;
    fn mark_deleted(&mut self);
}

macro_rules! impl_entity {
    ($($ty:ty),*) => {$(
        impl Hitbox for $ty {
            fn bounds(&self) -> Rect {
                Rect { pos: self.pos, size: self.size }
            }
        }

        impl Entity for $ty {
            fn is_deleted(&self) -> bool {
                self.deleted
            }

            fn mark_deleted(&mut self) {
                self.deleted = true;
            }
        }
    )*};
}

impl_entity!(Enemy, Projectile, Boss);

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: Vec2 = Vec2::new(8.0, 5.0);

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Seconds until the next shot is allowed.
    pub shot_cooldown: f32,
    pub lives: u32,
    /// Seconds of remaining contact immunity.
    pub invulnerable_for: f32,
}

impl Player {
    /// A fresh ship at the left edge, vertically centred.
    pub fn spawn(tuning: &Tuning, field: &Playfield) -> Self {
        Self {
            pos: Vec2::new(5.0, ((field.height - PLAYER_SIZE.y) / 2.0).floor().max(0.0)),
            size: PLAYER_SIZE,
            speed: tuning.player_speed,
            shot_cooldown: 0.0,
            lives: tuning.lives,
            invulnerable_for: 0.0,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }
}

impl Hitbox for Player {
    fn bounds(&self) -> Rect {
        Rect { pos: self.pos, size: self.size }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

pub const PROJECTILE_SIZE: Vec2 = Vec2::new(3.0, 1.0);
pub const ENEMY_PROJECTILE_SIZE: Vec2 = Vec2::new(2.0, 1.0);

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub side: Side,
    pub deleted: bool,
}

impl Projectile {
    /// Player shot; travels right.
    pub fn player(pos: Vec2, speed: f32) -> Self {
        Self { pos, size: PROJECTILE_SIZE, speed, side: Side::Player, deleted: false }
    }

    /// Hostile shot; travels left.
    pub fn enemy(pos: Vec2, speed: f32) -> Self {
        Self { pos, size: ENEMY_PROJECTILE_SIZE, speed, side: Side::Enemy, deleted: false }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub kind: EnemyKind,
    /// Seconds until the next shot, for kinds that fire.
    pub fire_timer: Option<f32>,
    pub deleted: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            pos,
            size: kind.size(),
            speed: tuning.speed,
            hp: tuning.hp,
            kind,
            fire_timer: tuning.fire_interval,
            deleted: false,
        }
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// x at which the boss stops advancing and starts firing.
    pub resting_x: f32,
    pub fire_interval: f32,
    pub fire_timer: f32,
    pub deleted: bool,
}

impl Boss {
    /// A boss just off the right edge, vertically centred.
    pub fn spawn(tuning: &BossTuning, field: &Playfield) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        Self {
            pos: Vec2::new(field.width + tuning.rest_margin, ((field.height - size.y) / 2.0).max(0.0)),
            size,
            speed: tuning.speed,
            hp: tuning.hp,
            max_hp: tuning.hp,
            resting_x: (field.width - size.x - tuning.rest_margin).max(0.0),
            fire_interval: tuning.fire_interval,
            fire_timer: tuning.fire_interval,
            deleted: false,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_resting(&self) -> bool {
        self.pos.x <= self.resting_x
    }
}
