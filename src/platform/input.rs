//! Raw input to game commands
//!
//! The window layer reports pointer, click, key and resize events in logical
//! pixels. What they mean depends on the current mode.

use glam::Vec2;

use crate::sim::{Command, GameState, Mode};
use crate::ui::menu::item_at;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    F,
    Other,
}

/// Input events from the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    Click { x: f32, y: f32, button: MouseButton },
    Key(Key),
    Resize { width: f32, height: f32 },
}

/// Map one input event to a command for the current mode
pub fn translate(state: &GameState, event: InputEvent) -> Option<Command> {
    match event {
        InputEvent::PointerMove { x, .. } => Some(Command::MovePaddle(x)),
        InputEvent::Resize { width, height } => Some(Command::Resize(width, height)),
        InputEvent::Click { x, y, button } => match state.mode {
            Mode::Menu => item_at(Vec2::new(x, y), state).map(|item| item.command()),
            Mode::HighScoreDisplay => Some(Command::DismissHighScores),
            Mode::Playing => {
                if state.any_ball_stuck() {
                    Some(Command::ReleaseBalls)
                } else if button == MouseButton::Left && state.laser_enabled {
                    Some(Command::FireLaser)
                } else {
                    None
                }
            }
        },
        InputEvent::Key(key) => match key {
            Key::Escape => Some(Command::TogglePause),
            Key::Space if !state.game_started => Some(Command::StartGame),
            Key::Space => Some(Command::ReleaseBalls),
            Key::F => Some(Command::FireLaser),
            Key::Other => None,
        },
    }
}
