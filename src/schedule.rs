/// Delayed events, stamped with the session epoch they were scheduled in.
///
/// The queue never judges staleness itself.  It hands due events back in
/// order and the session decides whether the epoch still matches.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    SpawnBoss,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    /// Loop clock (seconds) at which the event fires.
    pub due: f64,
    pub epoch: u64,
    pub action: Action,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pending: Vec<ScheduledEvent>,
}

impl Scheduler {
    pub fn schedule(&mut self, now: f64, delay: f32, epoch: u64, action: Action) {
        self.pending.push(ScheduledEvent { due: now + f64::from(delay), epoch, action });
    }

    /// Remove and return every event due at `now`, earliest first.
    pub fn take_due(&mut self, now: f64) -> Vec<ScheduledEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|e| e.due <= now);
        self.pending = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
