//! Space Impact: a side-scrolling arcade shooter core.
//!
//! - `entities`: entity data and the bounding-box contract
//! - `kinematics`: per-frame motion for each entity variant
//! - `spawner`: enemy timers, formations, difficulty ramp, level clock
//! - `collision`: ordered collision resolution
//! - `session`: the session aggregate and its state machine
//! - `compute`: one simulation tick
//! - `schedule`: epoch-stamped delayed events
//! - `sim_loop`: the frame driver tying the above together
//! - `input` / `render`: host collaborator interfaces
//! - `config`: tuning and playfield

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod kinematics;
pub mod render;
pub mod schedule;
pub mod session;
pub mod sim_loop;
pub mod spawner;

pub use config::{Playfield, Tuning};
pub use session::GameSession;
pub use sim_loop::SimulationLoop;
