//! Level patterns: which bricks start alive, golden or unbreakable

use rand::Rng;

use super::state::{BrickGrid, GameState};
use crate::consts::*;

/// Level 2 arch, one string per row
const ARCH_PATTERN: [&str; BRICK_ROWS] = [
    "..XXXXXX..",
    ".XXXXXXXX.",
    "XXXXXXXXXX",
    ".XX.XX.XX.",
    "..XXXXXX..",
];

/// Flat indices divisible by this are unbreakable on level 4
const UNBREAKABLE_STRIDE: usize = 7;

/// Named brick layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Full,
    Arch,
    Checkerboard,
    Columns,
}

impl Pattern {
    /// Pattern for a level index. Unknown indices fall back to a full grid.
    pub fn for_level(level: u32) -> Self {
        match level {
            1 => Pattern::Full,
            2 => Pattern::Arch,
            3 => Pattern::Checkerboard,
            4 => Pattern::Columns,
            other => {
                log::warn!("No pattern for level {other}, using full grid");
                Pattern::Full
            }
        }
    }

    /// Whether the brick at (row, col) starts alive
    pub fn is_alive(self, row: usize, col: usize) -> bool {
        match self {
            Pattern::Full => true,
            Pattern::Arch => ARCH_PATTERN[row].as_bytes().get(col) == Some(&b'X'),
            Pattern::Checkerboard => (row + col) % 2 == 0,
            Pattern::Columns => col % 2 == 0,
        }
    }

    /// Whether the brick at flat `index` starts unbreakable
    pub fn is_unbreakable(self, index: usize) -> bool {
        self == Pattern::Columns && index % UNBREAKABLE_STRIDE == 0
    }
}

/// Number of golden bricks requested for a level
#[inline]
pub fn golden_count(level: u32) -> u32 {
    1 + level % 3
}

/// Reset the grid to `level`'s pattern and sprinkle golden bricks.
/// Returns how many golden bricks were actually placed.
pub fn apply_pattern<R: Rng>(grid: &mut BrickGrid, level: u32, rng: &mut R) -> u32 {
    let pattern = Pattern::for_level(level);

    for (i, brick) in grid.bricks_mut().iter_mut().enumerate() {
        let (row, col) = BrickGrid::row_col(i);
        brick.alive = pattern.is_alive(row, col);
        brick.golden = false;
        brick.unbreakable = pattern.is_unbreakable(i);
    }
    grid.recount();

    mark_golden(grid, golden_count(level), rng)
}

/// Mark up to `wanted` alive, non-golden bricks golden by random probing.
///
/// Gives up after `GOLDEN_MAX_ATTEMPTS` tries, so a sparse grid may get fewer.
pub fn mark_golden<R: Rng>(grid: &mut BrickGrid, wanted: u32, rng: &mut R) -> u32 {
    let bricks = grid.bricks_mut();
    let mut remaining = wanted;
    let mut attempts = 0;

    while remaining > 0 && attempts < GOLDEN_MAX_ATTEMPTS {
        let idx = rng.random_range(0..bricks.len());
        let brick = &mut bricks[idx];
        if brick.alive && !brick.golden {
            brick.golden = true;
            remaining -= 1;
        }
        attempts += 1;
    }

    wanted - remaining
}

/// Lay out and populate the grid for `level`
pub fn load_level(state: &mut GameState, level: u32) {
    super::layout::recompute_layout(state);

    let mut grid = std::mem::take(&mut state.bricks);
    let golden = apply_pattern(&mut grid, level, state.rng());
    state.bricks = grid;

    log::info!(
        "Level {} loaded: {} bricks, {} golden",
        level,
        state.bricks.alive_count(),
        golden
    );
}
