/// The game session aggregate and its top-level state machine.
///
/// `GameSession` exclusively owns every entity.  Status only changes through
/// the guarded commands (`confirm`, `restart`, `begin_boss_warning`,
/// `spawn_boss`, `apply_collisions`, `check_transitions`), each of which
/// checks its own precondition and then goes through the private
/// `transition`, which refuses and logs any edge not listed in
/// `GameStatus::can_transition_to`.

use crate::collision::{self, CollisionReport};
use crate::config::{Playfield, Tuning};
use crate::entities::{Boss, Enemy, Entity, GameStatus, Player, Projectile};
use crate::spawner::Spawner;

impl GameStatus {
    pub fn can_transition_to(self, next: GameStatus) -> bool {
        use GameStatus as S;
        matches!(
            (self, next),
            (S::Menu, S::Playing)
                | (S::Playing, S::BossWarning)
                | (S::BossWarning, S::Boss)
                | (S::Boss, S::LevelComplete)
                | (S::Playing | S::BossWarning | S::Boss, S::GameOver)
                | (S::GameOver | S::LevelComplete, S::Playing)
                // restart mid-run
                | (S::Playing | S::BossWarning | S::Boss, S::Playing)
        )
    }

    /// States in which entities move.
    pub fn is_simulating(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::BossWarning | GameStatus::Boss)
    }

    /// States that only wait for Confirm.
    pub fn awaits_confirm(self) -> bool {
        matches!(self, GameStatus::Menu | GameStatus::GameOver | GameStatus::LevelComplete)
    }

    /// States in which collisions are resolved.  BOSS_WARNING is a grace period.
    pub fn resolves_collisions(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Boss)
    }
}

// ── Entity storage ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Player-side shots.
    pub projectiles: Vec<Projectile>,
    /// Enemy- and boss-side shots.
    pub enemy_projectiles: Vec<Projectile>,
    pub boss: Option<Boss>,
}

impl World {
    pub fn new(tuning: &Tuning, field: &Playfield) -> Self {
        Self {
            player: Player::spawn(tuning, field),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            boss: None,
        }
    }

    /// Drop everything marked deleted this frame.
    pub fn cleanup(&mut self) {
        self.enemies.retain(|e| !e.is_deleted());
        self.projectiles.retain(|p| !p.is_deleted());
        self.enemy_projectiles.retain(|p| !p.is_deleted());
        if self.boss.as_ref().is_some_and(|b| b.is_deleted()) {
            self.boss = None;
        }
    }

    /// Remove every enemy and hostile shot ahead of the boss fight.
    pub fn clear_hostiles(&mut self) {
        self.enemies.clear();
        self.enemy_projectiles.clear();
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameSession {
    pub tuning: Tuning,
    pub field: Playfield,
    pub world: World,
    pub spawner: Spawner,
    pub score: u32,
    status: GameStatus,
    /// Bumped on every reset; scheduled events stamped with an older epoch
    /// are stale.
    epoch: u64,
}

impl GameSession {
    /// A session sitting in the menu.
    pub fn new(tuning: Tuning, field: Playfield) -> Self {
        Self {
            world: World::new(&tuning, &field),
            spawner: Spawner::new(&tuning.spawn),
            score: 0,
            status: GameStatus::Menu,
            epoch: 0,
            tuning,
            field,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn lives(&self) -> u32 {
        self.world.player.lives
    }

    pub fn level_timer(&self) -> f32 {
        self.spawner.level_timer
    }

    /// Move to `next` if the edge exists.  Returns whether it happened.
    fn transition(&mut self, next: GameStatus) -> bool {
        if !self.status.can_transition_to(next) {
            log::warn!("refused transition {:?} -> {:?}", self.status, next);
            return false;
        }
        log::info!("status {:?} -> {:?}", self.status, next);
        self.status = next;
        true
    }

    /// Start a fresh run: new player, empty collections, zeroed timers and
    /// score, and a new epoch.
    fn reset(&mut self) -> bool {
        if !self.transition(GameStatus::Playing) {
            return false;
        }
        self.epoch += 1;
        self.world = World::new(&self.tuning, &self.field);
        self.spawner = Spawner::new(&self.tuning.spawn);
        self.score = 0;
        log::info!("session reset (epoch {})", self.epoch);
        true
    }

    /// Confirm input.  Starts a run from MENU, GAMEOVER or LEVEL_COMPLETE;
    /// ignored elsewhere.
    pub fn confirm(&mut self) -> bool {
        self.status.awaits_confirm() && self.reset()
    }

    /// Abandon the current run and start over.  Only meaningful mid-run.
    pub fn restart(&mut self) -> bool {
        self.status.is_simulating() && self.reset()
    }

    /// PLAYING → BOSS_WARNING.  Clears hostiles.  The caller schedules the
    /// boss arrival stamped with the current epoch.
    pub fn begin_boss_warning(&mut self) -> bool {
        if self.status != GameStatus::Playing || !self.transition(GameStatus::BossWarning) {
            return false;
        }
        let cleared = self.world.enemies.len();
        self.world.clear_hostiles();
        log::info!("level clock expired, cleared {cleared} enemies");
        true
    }

    /// BOSS_WARNING → BOSS.  A no-op unless `epoch` is current and the
    /// session is still waiting for its boss.
    pub fn spawn_boss(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            log::warn!("discarding stale boss spawn (epoch {epoch}, current {})", self.epoch);
            return false;
        }
        if self.status != GameStatus::BossWarning || self.world.boss.is_some() {
            return false;
        }
        if !self.transition(GameStatus::Boss) {
            return false;
        }
        self.world.boss = Some(Boss::spawn(&self.tuning.boss, &self.field));
        log::info!("boss spawned with {} hp", self.tuning.boss.hp);
        true
    }

    /// Run the collision pass and bank its outcome.  Does nothing outside
    /// PLAYING and BOSS.
    pub fn apply_collisions(&mut self) -> CollisionReport {
        if !self.status.resolves_collisions() {
            return CollisionReport::default();
        }
        let report = collision::resolve(&mut self.world, &self.tuning, &self.field);
        self.score += report.score;
        if report.player_hit {
            log::info!("player hit, {} lives left", self.lives());
            if self.lives() == 0 {
                self.transition(GameStatus::GameOver);
            }
        }
        // A run that just ended keeps its score without the bonus
        if report.boss_defeated && self.status == GameStatus::Boss && self.transition(GameStatus::LevelComplete) {
            self.score += self.tuning.boss.bonus;
            log::info!("boss defeated, final score {}", self.score);
        }
        report
    }

    /// End-of-frame check for the level clock.  Returns true when the boss
    /// warning began this frame.
    pub fn check_transitions(&mut self) -> bool {
        self.status == GameStatus::Playing && self.spawner.level_elapsed() && self.begin_boss_warning()
    }
}
