//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Time (monotonic or manual clock)
//! - Fixed-step scheduling
//! - Input events to game commands
//! - Draining game events into notifications

pub mod clock;
pub mod input;
pub mod runner;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{InputEvent, Key, MouseButton, translate};
pub use runner::Runner;
pub use scheduler::FixedStep;
