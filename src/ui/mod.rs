//! Presentation-side descriptors
//!
//! Nothing here draws. Menu hit boxes and HUD text are computed from the game
//! state so any renderer can show them.

pub mod hud;
pub mod menu;

pub use hud::{EffectBadge, Hud, leaderboard_lines};
pub use menu::{MenuItem, item_at};
