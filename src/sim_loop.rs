/// The simulation loop: owns the session, the RNG, the loop clock and the
/// delayed-event queue, and drives one `tick` plus one render per frame.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::{tick, TickReport};
use crate::config::{Playfield, Tuning};
use crate::input::{Input, KeyState};
use crate::render::{draw_frame, Renderer};
use crate::schedule::{Action, Scheduler};
use crate::session::GameSession;

/// Longest frame the simulation will advance in one step.  A stalled host
/// (suspended terminal, debugger) would otherwise tunnel entities through
/// each other.
pub const MAX_FRAME_DT: f32 = 0.1;

pub struct SimulationLoop {
    session: GameSession,
    scheduler: Scheduler,
    rng: StdRng,
    /// Seconds of simulated time since construction, across resets.
    clock: f64,
}

impl SimulationLoop {
    pub fn new(tuning: Tuning, field: Playfield, rng: StdRng) -> Self {
        Self {
            session: GameSession::new(tuning, field),
            scheduler: Scheduler::default(),
            rng,
            clock: 0.0,
        }
    }

    pub fn seeded(tuning: Tuning, field: Playfield, seed: u64) -> Self {
        Self::new(tuning, field, StdRng::seed_from_u64(seed))
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct access for hosts and tests that stage a scenario.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Abandon the current run.  Any boss arrival still in flight belongs to
    /// the old epoch and will be discarded when it fires.
    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    /// Advance one frame without rendering.
    pub fn step(&mut self, keys: KeyState, dt: f32) -> TickReport {
        let dt = sanitize_dt(dt);
        self.clock += f64::from(dt);
        self.fire_due_events();

        let report = tick(&mut self.session, &keys, dt, &mut self.rng);
        if report.boss_warning_started {
            self.scheduler.schedule(
                self.clock,
                self.session.tuning.boss_warning_delay,
                self.session.epoch(),
                Action::SpawnBoss,
            );
        }
        report
    }

    /// One full frame: sample input, step, render.
    pub fn frame(&mut self, dt: f32, input: &impl Input, renderer: &mut impl Renderer) -> TickReport {
        let report = self.step(KeyState::sample(input), dt);
        draw_frame(renderer, &self.session, self.clock);
        report
    }

    /// Runs between ticks, never inside one.
    fn fire_due_events(&mut self) {
        for event in self.scheduler.take_due(self.clock) {
            match event.action {
                Action::SpawnBoss => {
                    self.session.spawn_boss(event.epoch);
                }
            }
        }
    }
}

/// Negative or non-finite deltas become zero; long frames are capped.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}
