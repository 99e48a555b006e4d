/// Input collaborator interface.
///
/// The core never sees key events.  It polls a fixed set of logical keys once
/// per tick and works from that snapshot for the rest of the frame.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Confirm,
}

/// Polled key state supplied by the host.
pub trait Input {
    fn is_down(&self, key: LogicalKey) -> bool;
}

/// The keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub confirm: bool,
}

impl KeyState {
    pub fn sample(input: &impl Input) -> Self {
        Self {
            up: input.is_down(LogicalKey::Up),
            down: input.is_down(LogicalKey::Down),
            left: input.is_down(LogicalKey::Left),
            right: input.is_down(LogicalKey::Right),
            fire: input.is_down(LogicalKey::Fire),
            confirm: input.is_down(LogicalKey::Confirm),
        }
    }
}

impl Input for KeyState {
    fn is_down(&self, key: LogicalKey) -> bool {
        match key {
            LogicalKey::Up => self.up,
            LogicalKey::Down => self.down,
            LogicalKey::Left => self.left,
            LogicalKey::Right => self.right,
            LogicalKey::Fire => self.fire,
            LogicalKey::Confirm => self.confirm,
        }
    }
}
