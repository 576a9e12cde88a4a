//! Brickfall - A DX-Ball style brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, levels, physics, power-ups, game state)
//! - `ui`: Menu hitboxes and HUD descriptor for whatever draws the game
//! - `platform`: Clock, fixed-step scheduler, input translation, runner
//! - `settings`: Data-driven tuning loaded from JSON
//! - `highscores`: In-process leaderboard
//! - `audio`: Notification pulse sink

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (16 ms, ~60 Hz)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
    /// Viewport floor - smaller sizes are clamped, never rejected
    pub const MIN_WIDTH: f32 = 100.0;
    pub const MIN_HEIGHT: f32 = 80.0;
    /// Reference size for velocity scaling (min(w, h) / 600)
    pub const SPEED_REFERENCE: f32 = 600.0;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_COUNT: usize = BRICK_ROWS * BRICK_COLS;
    /// Number of level patterns before wrapping back to level 1
    pub const LEVEL_COUNT: u32 = 4;
    /// Upper bound on golden-brick placement attempts
    pub const GOLDEN_MAX_ATTEMPTS: u32 = 1000;

    /// Ball displacement per tick = velocity * BALL_SPEED_SCALE * multiplier
    pub const BALL_SPEED_SCALE: f32 = 10.0;
    /// Extra slowdown for gravity-slowed balls
    pub const GRAVITY_SLOW_FACTOR: f32 = 0.7;
    /// Initial unit-scale velocity component
    pub const BALL_START_COMPONENT: f32 = 0.25;
    /// Horizontal deflection range off the paddle
    pub const PADDLE_DEFLECT: f32 = 0.4;
    /// Smallest ball radius in pixels
    pub const MIN_BALL_RADIUS: f32 = 4.0;

    /// Lasers
    pub const LASER_SPEED: f32 = 8.0;
    pub const LASER_LENGTH: f32 = 6.0;

    /// Pickups are caught this far below the paddle's bottom edge
    pub const PICKUP_CATCH_BAND: f32 = 20.0;
    /// Pickups are discarded this far below the field
    pub const PICKUP_OFFSCREEN_MARGIN: f32 = 40.0;

    /// Scoring
    pub const BRICK_SCORE: u64 = 10;
    pub const LEVEL_BONUS: u64 = 50;
    pub const SCORE_BONUS: u64 = 100;

    /// Lives at the start of a game
    pub const STARTING_LIVES: u32 = 3;
}

/// Clamp a span of `width` starting at `x` into `[0, limit]`.
///
/// Unlike `f32::clamp` this never panics when the span is wider than the limit;
/// the span is pinned to the left edge instead.
#[inline]
pub fn clamp_span(x: f32, width: f32, limit: f32) -> f32 {
    x.min(limit - width).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_span_inside() {
        assert_eq!(clamp_span(50.0, 100.0, 800.0), 50.0);
    }

    #[test]
    fn test_clamp_span_edges() {
        assert_eq!(clamp_span(-20.0, 100.0, 800.0), 0.0);
        assert_eq!(clamp_span(750.0, 100.0, 800.0), 700.0);
    }

    #[test]
    fn test_clamp_span_wider_than_limit() {
        assert_eq!(clamp_span(30.0, 900.0, 800.0), 0.0);
    }
}
