//! Heads-up display descriptor

use std::fmt;

use crate::highscores::HighScores;
use crate::sim::GameState;

/// Active power-up shown next to the stats line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectBadge {
    pub label: &'static str,
    /// Compact form for narrow viewports
    pub short_label: &'static str,
    /// RGB, green for beneficial and red for detrimental
    pub color: [f32; 3],
}

/// Snapshot of what the HUD shows this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub high_score: u64,
    pub effect: Option<EffectBadge>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let effect = state.active_kind().map(|kind| {
            let spec = kind.spec();
            EffectBadge {
                label: spec.label,
                short_label: spec.short_label,
                color: spec.color(),
            }
        });

        Self {
            score: state.score,
            lives: state.lives,
            level: state.level,
            high_score: state.high_score.max(state.score),
            effect,
        }
    }
}

impl From<&GameState> for Hud {
    fn from(state: &GameState) -> Self {
        Self::from_state(state)
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {}  Lives: {}  Level: {}  High: {}",
            self.score, self.lives, self.level, self.high_score
        )
    }
}

/// Text rows for the high score screen, best first
pub fn leaderboard_lines(scores: &HighScores, best: u64) -> Vec<String> {
    let mut lines = vec![format!("High Score: {best}")];
    lines.extend(
        scores
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{:>2}. {:>8}  (level {})", i + 1, e.score, e.level)),
    );
    lines
}
