/// Per-frame motion for every entity variant.
///
/// Each `update` advances one entity purely from elapsed time (and, for the
/// player, the sampled keys).  Updates that fire return the new projectile
/// instead of pushing into a collection, so entities never reach back into
/// the session that owns them.  Deleted entities are left untouched.

use glam::Vec2;

use crate::config::{Playfield, Tuning};
use crate::entities::{Boss, Enemy, Entity, Player, Projectile, Side};
use crate::input::KeyState;

impl Player {
    /// Move, clamp to the playfield, tick timers, and fire if allowed.
    pub fn update(&mut self, dt: f32, keys: &KeyState, field: &Playfield, tuning: &Tuning) -> Option<Projectile> {
        let step = self.speed * dt;
        if keys.up {
            self.pos.y -= step;
        }
        if keys.down {
            self.pos.y += step;
        }
        if keys.left {
            self.pos.x -= step;
        }
        if keys.right {
            self.pos.x += step;
        }

        // Hard walls, no bounce
        let max = (Vec2::new(field.width, field.height) - self.size).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);

        self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
        if self.shot_cooldown > 0.0 {
            self.shot_cooldown = (self.shot_cooldown - dt).max(0.0);
        }

        if keys.fire && self.shot_cooldown <= 0.0 {
            self.shot_cooldown = tuning.shot_cooldown;
            let muzzle = Vec2::new(self.pos.x + self.size.x, self.pos.y + 2.0);
            return Some(Projectile::player(muzzle, tuning.projectile_speed));
        }
        None
    }
}

impl Projectile {
    /// Straight-line flight; dropped once `margin` units past the far edge.
    pub fn update(&mut self, dt: f32, field: &Playfield, margin: f32) {
        if self.deleted {
            return;
        }
        match self.side {
            Side::Player => {
                self.pos.x += self.speed * dt;
                if self.pos.x > field.width + margin {
                    self.mark_deleted();
                }
            }
            Side::Enemy => {
                self.pos.x -= self.speed * dt;
                if self.pos.x + self.size.x < -margin {
                    self.mark_deleted();
                }
            }
        }
    }
}

impl Enemy {
    /// Drift left.  An enemy past the trailing edge has escaped and is
    /// deleted without penalty.  Armed kinds fire while fully on-field.
    pub fn update(&mut self, dt: f32, field: &Playfield, tuning: &Tuning) -> Option<Projectile> {
        if self.deleted {
            return None;
        }
        self.pos.x -= self.speed * dt;
        if self.pos.x < -tuning.enemy_margin {
            self.mark_deleted();
            return None;
        }

        let interval = tuning.enemies.get(self.kind).fire_interval?;
        let timer = self.fire_timer.get_or_insert(interval);
        *timer -= dt;

        let on_field = self.pos.x >= 0.0 && self.pos.x + self.size.x <= field.width;
        if *timer <= 0.0 && on_field {
            *timer = interval;
            let muzzle = Vec2::new(self.pos.x - 2.0, self.pos.y + (self.size.y / 2.0).floor());
            return Some(Projectile::enemy(muzzle, tuning.enemy_projectile_speed));
        }
        None
    }
}

impl Boss {
    /// Advance to the resting column, then hold and fire on a fixed cadence.
    pub fn update(&mut self, dt: f32, tuning: &Tuning) -> Option<Projectile> {
        if self.deleted {
            return None;
        }
        if !self.is_resting() {
            self.pos.x = (self.pos.x - self.speed * dt).max(self.resting_x);
            return None;
        }

        self.fire_timer -= dt;
        if self.fire_timer <= 0.0 {
            self.fire_timer = self.fire_interval;
            let muzzle = Vec2::new(self.pos.x - 2.0, self.pos.y + (self.size.y / 2.0).floor());
            return Some(Projectile::enemy(muzzle, tuning.enemy_projectile_speed));
        }
        None
    }
}
