//! Power-ups: falling pickups and the timed effects they apply
//!
//! Every kind is described once in [`EffectSpec`], so HUD text, color, duration
//! and revert behavior come from the same table.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::layout::layout_paddle;
use super::state::{ActiveEffect, Ball, GameEvent, GameState, PaddleModifier, Pickup};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    ExtraLife,
    ScoreBonus,
    EnlargePaddle,
    SlowMotion,
    FastMotion,
    Multiball,
    Laser,
    GrabPaddle,
    MegaBall,
    ZapBrick,
    ShrinkPaddle,
    FastBall,
    GravityBall,
}

/// Whether an effect helps or hurts the player (HUD color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Beneficial,
    Detrimental,
}

/// What has to be undone when an effect expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revert {
    /// Instant effect, only the HUD display expires
    None,
    /// Restore paddle width (tracked by the paddle modifier)
    PaddleWidth,
    /// Speed multiplier back to 1, gravity flags cleared
    Speed,
    /// Disable lasers, drop bolts in flight
    Laser,
    /// Cancel a pending grab
    Grab,
    /// Balls back to normal size
    Mega,
}

/// Static description of one pickup kind
#[derive(Debug, Clone, Copy)]
pub struct EffectSpec {
    pub label: &'static str,
    pub short_label: &'static str,
    pub glyph: &'static str,
    pub tone: Tone,
    pub duration_secs: f64,
    pub revert: Revert,
}

impl EffectSpec {
    /// HUD color (RGB)
    pub fn color(&self) -> [f32; 3] {
        match self.tone {
            Tone::Beneficial => [0.0, 1.0, 0.0],
            Tone::Detrimental => [1.0, 0.0, 0.0],
        }
    }
}

const fn spec(
    label: &'static str,
    short_label: &'static str,
    glyph: &'static str,
    tone: Tone,
    duration_secs: f64,
    revert: Revert,
) -> EffectSpec {
    EffectSpec {
        label,
        short_label,
        glyph,
        tone,
        duration_secs,
        revert,
    }
}

/// Indexed by `PickupKind as usize`
static EFFECTS: [EffectSpec; 13] = [
    spec("+1 Life", "+1", "❤️", Tone::Beneficial, 1.0, Revert::None),
    spec("+100", "+100", "⭐", Tone::Beneficial, 1.0, Revert::None),
    spec("Paddle Up", "P+", "🟦", Tone::Beneficial, 10.0, Revert::PaddleWidth),
    spec("Slow Motion", "SLOW", "🐢", Tone::Beneficial, 10.0, Revert::Speed),
    spec("Fast Motion", "FAST", "⚡", Tone::Beneficial, 10.0, Revert::Speed),
    spec("Multiball", "x3", "⚪⚪", Tone::Beneficial, 6.0, Revert::None),
    spec("Laser (F)", "LAS", "🔫", Tone::Beneficial, 12.0, Revert::Laser),
    spec("Grab", "GRB", "👐", Tone::Beneficial, 12.0, Revert::Grab),
    spec("Mega Ball", "MEGA", "🌕", Tone::Beneficial, 8.0, Revert::Mega),
    spec("Zap", "ZAP", "💥", Tone::Beneficial, 1.0, Revert::None),
    spec("Shrunk", "-P", "🔻", Tone::Detrimental, 10.0, Revert::PaddleWidth),
    spec("Fast Ball", "FBL", "🚀", Tone::Detrimental, 10.0, Revert::Speed),
    spec("Gravity", "GRV", "🌧️", Tone::Detrimental, 10.0, Revert::Speed),
];

impl PickupKind {
    pub const ALL: [PickupKind; 13] = [
        PickupKind::ExtraLife,
        PickupKind::ScoreBonus,
        PickupKind::EnlargePaddle,
        PickupKind::SlowMotion,
        PickupKind::FastMotion,
        PickupKind::Multiball,
        PickupKind::Laser,
        PickupKind::GrabPaddle,
        PickupKind::MegaBall,
        PickupKind::ZapBrick,
        PickupKind::ShrinkPaddle,
        PickupKind::FastBall,
        PickupKind::GravityBall,
    ];

    pub fn spec(self) -> &'static EffectSpec {
        &EFFECTS[self as usize]
    }

    /// Uniformly random kind
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Paddle width multipliers
const ENLARGE_FACTOR: f32 = 1.6;
const SHRINK_FACTOR: f32 = 0.55;
/// Speed multipliers
const SLOW_MOTION_SPEED: f32 = 0.55;
const FAST_MOTION_SPEED: f32 = 1.55;
const FAST_BALL_FACTOR: f32 = 1.9;
const GRAVITY_BALL_FACTOR: f32 = 0.6;
/// Mega balls grow by this much
const MEGA_RADIUS_FACTOR: f32 = 1.9;
/// Multiball copies: horizontal and vertical velocity scale
const MULTIBALL_VX: f32 = 1.2;
const MULTIBALL_VY: f32 = 0.9;

/// Roll for a pickup drop at `pos` (usually a destroyed brick's center)
pub fn spawn_pickup_at(state: &mut GameState, pos: Vec2, golden: bool) {
    let chance = if golden {
        state.rules.golden_pickup_chance
    } else {
        state.rules.pickup_chance
    };
    let height = state.viewport.height;

    // random_bool panics outside [0, 1], NaN included
    let chance = if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let rng = state.rng();
    if !rng.random_bool(chance) {
        return;
    }
    let kind = PickupKind::random(rng);
    let jitter = rng.random_range(0..5u32) as f32 / 100.0;

    state.pickups.push(Pickup {
        kind,
        pos,
        fall_speed: height * 0.0075 + jitter * height * 0.01,
        active: true,
    });
    log::debug!("Pickup {:?} dropped at ({:.0}, {:.0})", kind, pos.x, pos.y);
    state.push_event(GameEvent::PickupSpawned { kind });
}

/// Apply a collected pickup's effect
pub fn apply_pickup_effect(state: &mut GameState, kind: PickupKind) {
    state.push_event(GameEvent::Notify);

    match kind {
        PickupKind::ExtraLife => state.lives += 1,
        PickupKind::ScoreBonus => state.score += SCORE_BONUS,
        PickupKind::EnlargePaddle => resize_paddle(state, kind, ENLARGE_FACTOR),
        PickupKind::ShrinkPaddle => resize_paddle(state, kind, SHRINK_FACTOR),
        PickupKind::SlowMotion => state.speed_multiplier = SLOW_MOTION_SPEED,
        PickupKind::FastMotion => state.speed_multiplier = FAST_MOTION_SPEED,
        PickupKind::FastBall => state.speed_multiplier *= FAST_BALL_FACTOR,
        PickupKind::GravityBall => {
            state.speed_multiplier *= GRAVITY_BALL_FACTOR;
            for ball in &mut state.balls {
                ball.gravity_slow = true;
            }
        }
        PickupKind::Multiball => {
            if let Some(base) = state.balls.first().copied() {
                for sign in [1.0, -1.0] {
                    state.balls.push(Ball {
                        vel: Vec2::new(base.vel.x * sign * MULTIBALL_VX, base.vel.y * MULTIBALL_VY),
                        stuck: false,
                        ..base
                    });
                }
            }
        }
        PickupKind::Laser => state.laser_enabled = true,
        PickupKind::GrabPaddle => state.grab_pending = true,
        PickupKind::MegaBall => {
            state.lives += 1;
            for ball in &mut state.balls {
                ball.mega = true;
                ball.radius *= MEGA_RADIUS_FACTOR;
            }
            state.laser_enabled = false;
            state.speed_multiplier = 1.0;
        }
        PickupKind::ZapBrick => state.bricks.clear_unbreakable(),
    }

    let expires_at = state.clock + kind.spec().duration_secs;
    state.active_effect = Some(ActiveEffect { kind, expires_at });
    log::debug!("Effect {:?} active until t={:.2}", kind, expires_at);
}

/// Scale the paddle. Stacked resizes multiply into one factor that a viewport
/// resize keeps applying until it expires.
fn resize_paddle(state: &mut GameState, kind: PickupKind, factor: f32) {
    let expires_at = state.clock + kind.spec().duration_secs;
    let factor = state.paddle_width_factor() * factor;
    state.paddle_modifier = Some(PaddleModifier { factor, expires_at });

    layout_paddle(&mut state.paddle, &state.viewport, factor);
    state.paddle.clamp_into(&state.viewport);
}

/// Undo effects whose time is up. Runs every tick regardless of mode.
pub fn maybe_revert_effects(state: &mut GameState) {
    if let Some(modifier) = state.paddle_modifier {
        if state.clock >= modifier.expires_at {
            state.paddle_modifier = None;
            layout_paddle(&mut state.paddle, &state.viewport, 1.0);
            state.paddle.clamp_into(&state.viewport);
        }
    }

    let Some(effect) = state.active_effect else {
        return;
    };
    if state.clock < effect.expires_at {
        return;
    }

    match effect.kind.spec().revert {
        Revert::None | Revert::PaddleWidth => {}
        Revert::Speed => {
            state.speed_multiplier = 1.0;
            for ball in &mut state.balls {
                ball.gravity_slow = false;
            }
        }
        Revert::Laser => {
            state.laser_enabled = false;
            state.lasers.clear();
        }
        Revert::Grab => state.grab_pending = false,
        Revert::Mega => {
            let radius = Ball::base_radius(&state.viewport);
            for ball in &mut state.balls {
                ball.mega = false;
                ball.radius = radius;
            }
        }
    }

    state.active_effect = None;
    state.push_event(GameEvent::EffectExpired { kind: effect.kind });
    log::debug!("Effect {:?} expired", effect.kind);
}

/// Whether the zap window is open (unbreakable bricks can be broken)
pub fn zap_active(state: &GameState) -> bool {
    state.active_kind() == Some(PickupKind::ZapBrick)
}
