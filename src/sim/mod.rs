//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Row-major, first-match-wins collision scans
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod layout;
pub mod level;
pub mod state;
pub mod tick;

pub use effects::{EffectSpec, PickupKind, Tone};
pub use state::{
    ActiveEffect, Ball, Brick, BrickGrid, GameEvent, GameState, Laser, Mode, Paddle, Pickup,
    Rules, Viewport,
};
pub use tick::{Command, TickInput, apply_command, next_level, start_new_game, tick};
