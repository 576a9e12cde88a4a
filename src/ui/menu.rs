//! Main menu layout and hit testing

use glam::Vec2;

use crate::sim::collision::point_in_rect;
use crate::sim::{Command, GameState, Viewport};

/// Box size as a fraction of the viewport
const ITEM_WIDTH_FRAC: f32 = 0.30;
const ITEM_HEIGHT_FRAC: f32 = 0.08;
/// Top of the first box and the gap between boxes
const FIRST_ITEM_Y_FRAC: f32 = 0.28;
const ITEM_GAP_FRAC: f32 = 0.02;

/// Menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Resume,
    HighScore,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::Resume,
        MenuItem::HighScore,
        MenuItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Resume => "Resume",
            MenuItem::HighScore => "High Score",
            MenuItem::Exit => "Exit",
        }
    }

    /// Top-left corner and size of this item's box
    pub fn bounds(self, viewport: &Viewport) -> (Vec2, Vec2) {
        let size = Vec2::new(
            viewport.width * ITEM_WIDTH_FRAC,
            viewport.height * ITEM_HEIGHT_FRAC,
        );
        let slot = self as usize as f32;
        let top = viewport.height * FIRST_ITEM_Y_FRAC
            + slot * (size.y + viewport.height * ITEM_GAP_FRAC);
        (Vec2::new((viewport.width - size.x) * 0.5, top), size)
    }

    /// Resume is greyed out unless a run is in progress
    pub fn enabled(self, state: &GameState) -> bool {
        match self {
            MenuItem::Resume => state.resume_available(),
            _ => true,
        }
    }

    /// Command issued when the item is clicked
    pub fn command(self) -> Command {
        match self {
            MenuItem::Start => Command::StartGame,
            MenuItem::Resume => Command::Resume,
            MenuItem::HighScore => Command::ShowHighScores,
            MenuItem::Exit => Command::Quit,
        }
    }
}

/// Enabled menu item under `pos`, if any
pub fn item_at(pos: Vec2, state: &GameState) -> Option<MenuItem> {
    MenuItem::ALL.into_iter().find(|item| {
        let (min, size) = item.bounds(&state.viewport);
        item.enabled(state) && point_in_rect(pos, min, min + size)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_of(item: MenuItem, viewport: &Viewport) -> Vec2 {
        let (min, size) = item.bounds(viewport);
        min + size * 0.5
    }

    #[test]
    fn test_item_geometry() {
        let vp = Viewport::new(800.0, 600.0);
        let (min, size) = MenuItem::Start.bounds(&vp);
        assert!((min.x - 280.0).abs() < 1e-3);
        assert!((min.y - 168.0).abs() < 1e-3);
        assert!((size.x - 240.0).abs() < 1e-3);
        assert!((size.y - 48.0).abs() < 1e-3);

        let (exit_min, _) = MenuItem::Exit.bounds(&vp);
        assert!((exit_min.y - (168.0 + 3.0 * 60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_hit_testing() {
        let state = GameState::new(1);
        let vp = state.viewport;
        assert_eq!(item_at(center_of(MenuItem::Start, &vp), &state), Some(MenuItem::Start));
        assert_eq!(item_at(center_of(MenuItem::Exit, &vp), &state), Some(MenuItem::Exit));
        assert_eq!(
            item_at(center_of(MenuItem::HighScore, &vp), &state),
            Some(MenuItem::HighScore)
        );
        assert_eq!(item_at(Vec2::new(5.0, 5.0), &state), None);
    }

    #[test]
    fn test_resume_needs_game_in_progress() {
        let mut state = GameState::new(1);
        let pos = center_of(MenuItem::Resume, &state.viewport);
        assert_eq!(item_at(pos, &state), None);

        state.apply_command(Command::StartGame);
        state.apply_command(Command::TogglePause);
        assert!(MenuItem::Resume.enabled(&state));
        assert_eq!(item_at(pos, &state), Some(MenuItem::Resume));
        assert_eq!(MenuItem::Resume.command(), Command::Resume);
    }
}
