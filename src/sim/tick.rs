//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Input arrives as
//! discrete [`Command`]s applied at the start of a tick.

use std::cmp::Ordering;

use glam::Vec2;

use super::collision::{
    ball_below_field, ball_touches_paddle, bounce_off_paddle, circle_overlaps_rect,
    point_in_rect, resolve_walls,
};
use super::effects::{apply_pickup_effect, maybe_revert_effects, spawn_pickup_at, zap_active};
use super::layout::resize;
use super::level::load_level;
use super::state::{GameEvent, GameState, Laser, Mode};
use crate::consts::*;

/// Discrete player or platform requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Center the paddle on this x (any mode)
    MovePaddle(f32),
    /// Viewport changed to (width, height)
    Resize(f32, f32),
    StartGame,
    Resume,
    ShowHighScores,
    DismissHighScores,
    Quit,
    ReleaseBalls,
    FireLaser,
    /// Esc: Playing goes to the menu, the menu resumes a run in progress
    TogglePause,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x, applied as a paddle move
    pub pointer_x: Option<f32>,
    /// Commands in arrival order
    pub commands: Vec<Command>,
    /// Demo mode - the paddle plays itself
    pub autopilot: bool,
}

impl GameState {
    /// Apply one command, honoring mode guards
    pub fn apply_command(&mut self, command: Command) {
        apply_command(self, command);
    }
}

/// Apply one command, honoring mode guards
pub fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::MovePaddle(x) => {
            let viewport = state.viewport;
            state.paddle.move_to(x, &viewport);
        }
        Command::Resize(width, height) => resize(state, width, height),
        Command::StartGame => {
            if state.mode == Mode::Menu {
                start_new_game(state);
            }
        }
        Command::Resume => {
            if state.resume_available() {
                state.mode = Mode::Playing;
            }
        }
        Command::ShowHighScores => {
            if state.mode == Mode::Menu {
                state.mode = Mode::HighScoreDisplay;
            }
        }
        Command::DismissHighScores => {
            if state.mode == Mode::HighScoreDisplay {
                state.mode = Mode::Menu;
            }
        }
        Command::Quit => {
            log::info!("Quit requested");
            state.quit_requested = true;
        }
        Command::ReleaseBalls => {
            if state.mode == Mode::Playing {
                let viewport = state.viewport;
                for ball in state.balls.iter_mut().filter(|b| b.stuck) {
                    ball.release(&viewport);
                }
            }
        }
        Command::FireLaser => {
            if state.mode == Mode::Playing && state.laser_enabled {
                state.lasers.push(Laser {
                    pos: Vec2::new(state.paddle.center_x(), state.paddle.y),
                    length: LASER_LENGTH,
                });
            }
        }
        Command::TogglePause => match state.mode {
            Mode::Playing => state.mode = Mode::Menu,
            Mode::Menu if state.game_started => state.mode = Mode::Playing,
            _ => {}
        },
    }
}

/// Reset the session for a fresh run and start playing level 1
pub fn start_new_game(state: &mut GameState) {
    state.score = 0;
    state.lives = state.rules.starting_lives;
    state.level = 1;
    state.speed_multiplier = 1.0;
    state.grab_pending = false;
    state.laser_enabled = false;
    state.active_effect = None;
    state.paddle_modifier = None;
    state.lasers.clear();
    state.pickups.clear();

    load_level(state, 1);
    state.reset_balls_to_paddle();
    state.mode = Mode::Playing;
    state.game_started = true;

    log::info!("New game started (seed {})", state.seed);
}

/// Advance to the next level (4 wraps to 1) and pay the level bonus
pub fn next_level(state: &mut GameState) {
    let cleared = state.level;
    state.update_high_score();
    state.level = if state.level >= LEVEL_COUNT {
        1
    } else {
        state.level + 1
    };

    load_level(state, state.level);
    state.reset_balls_to_paddle();
    state.pickups.clear();
    state.score += LEVEL_BONUS;

    state.push_event(GameEvent::LevelCleared { level: cleared });
    log::info!("Level {} cleared, score {}", cleared, state.score);
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.clock += f64::from(dt);

    if let Some(x) = input.pointer_x {
        apply_command(state, Command::MovePaddle(x));
    }
    for &command in &input.commands {
        apply_command(state, command);
    }

    if input.autopilot && state.mode == Mode::Playing {
        autopilot(state);
    }

    maybe_revert_effects(state);

    if state.mode != Mode::Playing {
        return;
    }

    update_pickups(state);
    if state.laser_enabled {
        update_lasers(state);
    }
    update_balls(state);

    // Game over ends the tick
    if state.mode != Mode::Playing {
        return;
    }

    let (paddle, viewport) = (state.paddle, state.viewport);
    for ball in state.balls.iter_mut().filter(|b| b.stuck) {
        ball.follow_paddle(&paddle, &viewport);
    }

    if state.bricks.alive_count() == 0 {
        next_level(state);
    }
}

/// Kill a brick and pay out. Does nothing if it is already dead.
fn break_brick(state: &mut GameState, index: usize) {
    let Some(brick) = state.bricks.destroy(index) else {
        return;
    };
    state.score += BRICK_SCORE;
    state.push_event(GameEvent::BrickDestroyed { index });
    state.push_event(GameEvent::Notify);
    spawn_pickup_at(state, brick.center(), brick.golden);
}

fn update_pickups(state: &mut GameState) {
    let paddle = state.paddle;
    let off_screen = state.viewport.height + PICKUP_OFFSCREEN_MARGIN;

    // Effects are applied after the scan, in scan order
    let mut collected = Vec::new();
    state.pickups.retain_mut(|pickup| {
        if !pickup.active {
            return false;
        }
        pickup.pos.y += pickup.fall_speed;

        let caught = pickup.pos.y >= paddle.y
            && pickup.pos.y <= paddle.bottom() + PICKUP_CATCH_BAND
            && pickup.pos.x >= paddle.x
            && pickup.pos.x <= paddle.right();
        if caught {
            collected.push(pickup.kind);
            return false;
        }

        pickup.pos.y <= off_screen
    });

    for kind in collected {
        log::debug!("Pickup {:?} collected", kind);
        state.push_event(GameEvent::PickupCollected { kind });
        apply_pickup_effect(state, kind);
    }
}

fn update_lasers(state: &mut GameState) {
    let mut lasers = std::mem::take(&mut state.lasers);

    lasers.retain_mut(|laser| {
        laser.pos.y -= LASER_SPEED;
        if laser.pos.y + laser.length < 0.0 {
            return false;
        }

        let hit = state
            .bricks
            .first_alive_where(|b| point_in_rect(laser.pos, b.pos, b.max()));
        match hit {
            Some(index) => {
                let unbreakable = state.bricks.get(index).is_some_and(|b| b.unbreakable);
                if !unbreakable {
                    break_brick(state, index);
                }
                false
            }
            None => true,
        }
    });

    state.lasers = lasers;
}

fn update_balls(state: &mut GameState) {
    let viewport = state.viewport;
    let zap = zap_active(state);

    // Newest ball first, so a later multiball copy claims a shared brick
    for i in (0..state.balls.len()).rev() {
        let mut ball = state.balls[i];
        if ball.stuck {
            continue;
        }

        ball.pos += ball.vel * ball.effective_speed(state.speed_multiplier);
        resolve_walls(&mut ball, &viewport);

        if ball_touches_paddle(&ball, &state.paddle) {
            if state.grab_pending {
                ball.stuck = true;
                ball.follow_paddle(&state.paddle, &viewport);
                state.grab_pending = false;
            } else {
                bounce_off_paddle(&mut ball, &state.paddle, &viewport);
            }
        }

        // At most one brick per ball per tick
        let hit = state
            .bricks
            .first_alive_where(|b| circle_overlaps_rect(ball.pos, ball.radius, b.pos, b.max()));
        if let Some(index) = hit {
            let unbreakable = state.bricks.get(index).is_some_and(|b| b.unbreakable);
            if !unbreakable || ball.mega || zap {
                break_brick(state, index);
            }
            ball.vel.y = -ball.vel.y;
        }

        state.balls[i] = ball;
    }

    state.balls.retain(|ball| !ball_below_field(ball, &viewport));

    if state.balls.is_empty() {
        lose_life(state);
    }
}

/// Last ball gone: take a life, end the run at zero, respawn on the paddle
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.update_high_score();
    state.push_event(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        let rank = state.leaderboard.add_score(state.score, state.level);
        log::info!(
            "Game over: score {} on level {} (rank {:?})",
            state.score,
            state.level,
            rank
        );
        state.push_event(GameEvent::GameOver { score: state.score });
        state.mode = Mode::Menu;
        state.game_started = false;
    } else {
        log::debug!("Life lost, {} left", state.lives);
    }

    state.reset_balls_to_paddle();
}

/// Demo paddle: release, track the lowest falling ball, else chase a pickup
fn autopilot(state: &mut GameState) {
    if state.any_ball_stuck() {
        apply_command(state, Command::ReleaseBalls);
    }
    if state.laser_enabled && state.lasers.is_empty() {
        apply_command(state, Command::FireLaser);
    }

    let paddle = state.paddle;
    let falling_ball = state
        .balls
        .iter()
        .filter(|b| !b.stuck && b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));

    let target = match falling_ball {
        Some(ball) => {
            // Drift off-center over time so rebounds vary their angle
            let t = state.clock as f32;
            let offset = ((t * 0.9).sin() * 0.3 + (t * 0.37).sin() * 0.15) * paddle.width;
            Some(ball.pos.x + offset)
        }
        None => state
            .pickups
            .iter()
            .filter(|p| p.active)
            .min_by(|a, b| {
                let da = (a.pos.x - paddle.center_x()).abs() + (paddle.y - a.pos.y).abs();
                let db = (b.pos.x - paddle.center_x()).abs() + (paddle.y - b.pos.y).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .map(|p| p.pos.x),
    };

    if let Some(x) = target {
        apply_command(state, Command::MovePaddle(x));
    }
}
