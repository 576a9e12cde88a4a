//! Viewport-proportional geometry for the paddle and brick grid
//!
//! Layout only ever touches positions and sizes. Brick flags belong to the level.

use glam::Vec2;

use super::level::load_level;
use super::state::{BrickGrid, GameState, Paddle, Viewport};
use crate::consts::*;

/// Paddle sizing relative to the viewport
const PADDLE_WIDTH_FRAC: f32 = 0.125;
const PADDLE_HEIGHT_FRAC: f32 = 0.025;
const PADDLE_BOTTOM_GAP_FRAC: f32 = 0.03;

/// Brick grid margins and padding
const MARGIN_X_FRAC: f32 = 0.06;
const MARGIN_TOP_FRAC: f32 = 0.08;
const PAD_X_FRAC: f32 = 0.00625;
const PAD_Y_FRAC: f32 = 0.02;
const BRICK_HEIGHT_FRAC: f32 = 0.04;
const BRICK_HEIGHT_CAP_FRAC: f32 = 0.08;

/// Resize the paddle for the viewport, keeping its x inside the field.
///
/// `width_factor` scales the base width (enlarge/shrink), capped at the field
/// width. A negative x means "never placed" and centers the paddle.
pub fn layout_paddle(paddle: &mut Paddle, viewport: &Viewport, width_factor: f32) {
    paddle.width = (viewport.width * PADDLE_WIDTH_FRAC * width_factor).min(viewport.width);
    paddle.height = viewport.height * PADDLE_HEIGHT_FRAC;
    paddle.y = viewport.height - paddle.height - viewport.height * PADDLE_BOTTOM_GAP_FRAC;

    if paddle.x < 0.0 {
        paddle.x = (viewport.width - paddle.width) * 0.5;
    }
    if paddle.right() > viewport.width {
        paddle.x = viewport.width - paddle.width;
    }
}

/// Position every brick on the fixed grid. Returns the recounted alive total.
pub fn layout_bricks(grid: &mut BrickGrid, viewport: &Viewport) -> usize {
    let (w, h) = (viewport.width, viewport.height);
    let margin_x = w * MARGIN_X_FRAC;
    let margin_top = h * MARGIN_TOP_FRAC;
    let pad_x = w * PAD_X_FRAC;
    let pad_y = h * PAD_Y_FRAC;

    let avail_w = w - margin_x * 2.0 - pad_x * (BRICK_COLS as f32 - 1.0);
    let brick_w = avail_w / BRICK_COLS as f32;
    let brick_h = (h * BRICK_HEIGHT_FRAC).min(h * BRICK_HEIGHT_CAP_FRAC);

    for (i, brick) in grid.bricks_mut().iter_mut().enumerate() {
        let (row, col) = BrickGrid::row_col(i);
        brick.size = Vec2::new(brick_w, brick_h);
        brick.pos = Vec2::new(
            margin_x + col as f32 * (brick_w + pad_x),
            margin_top + row as f32 * (brick_h + pad_y),
        );
    }

    grid.recount()
}

/// Recompute paddle and brick geometry from the current viewport
pub fn recompute_layout(state: &mut GameState) {
    let factor = state.paddle_width_factor();
    layout_paddle(&mut state.paddle, &state.viewport, factor);
    layout_bricks(&mut state.bricks, &state.viewport);
}

/// Handle a viewport change
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.viewport = Viewport::new(width, height);
    recompute_layout(state);
    log::debug!(
        "Viewport resized to {}x{}",
        state.viewport.width,
        state.viewport.height
    );

    if state.bricks.alive_count() == 0 {
        load_level(state, state.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inside(min: Vec2, max: Vec2, vp: &Viewport) -> bool {
        min.x >= 0.0 && min.y >= 0.0 && max.x <= vp.width + 1e-3 && max.y <= vp.height + 1e-3
    }

    #[test]
    fn test_paddle_proportions() {
        let vp = Viewport::new(800.0, 600.0);
        let mut paddle = Paddle {
            x: -1.0,
            ..Default::default()
        };
        layout_paddle(&mut paddle, &vp, 1.0);
        assert!((paddle.width - 100.0).abs() < 1e-3);
        assert!((paddle.height - 15.0).abs() < 1e-3);
        assert!((paddle.y - (600.0 - 15.0 - 18.0)).abs() < 1e-3);
        assert!((paddle.x - 350.0).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_pulled_back_on_shrink() {
        let mut paddle = Paddle {
            x: 1100.0,
            ..Default::default()
        };
        layout_paddle(&mut paddle, &Viewport::new(1200.0, 600.0), 1.0);
        assert!((paddle.right() - 1200.0).abs() < 1e-3);

        let vp = Viewport::new(800.0, 600.0);
        layout_paddle(&mut paddle, &vp, 1.0);
        assert!((paddle.right() - vp.width).abs() < 1e-3);
    }

    #[test]
    fn test_layout_preserves_flags() {
        let mut state = GameState::new(3);
        let golden: Vec<bool> = state.bricks.iter().map(|b| b.golden).collect();
        state.bricks.destroy(0);
        resize(&mut state, 1024.0, 768.0);

        assert_eq!(state.bricks.alive_count(), BRICK_COUNT - 1);
        assert!(!state.bricks.get(0).is_some_and(|b| b.alive));
        for (i, brick) in state.bricks.iter().enumerate().skip(1) {
            assert_eq!(brick.golden, golden[i]);
        }
    }

    #[test]
    fn test_resize_reloads_empty_level() {
        let mut state = GameState::new(3);
        for i in 0..BRICK_COUNT {
            state.bricks.destroy(i);
        }
        assert_eq!(state.bricks.alive_count(), 0);
        resize(&mut state, 640.0, 480.0);
        assert_eq!(state.bricks.alive_count(), BRICK_COUNT);
    }

    #[test]
    fn test_width_factor_follows_viewport() {
        let mut paddle = Paddle {
            x: -1.0,
            ..Default::default()
        };
        layout_paddle(&mut paddle, &Viewport::new(800.0, 600.0), 1.6);
        assert!((paddle.width - 160.0).abs() < 1e-3);

        layout_paddle(&mut paddle, &Viewport::new(1600.0, 600.0), 1.6);
        assert!((paddle.width - 320.0).abs() < 1e-3);

        layout_paddle(&mut paddle, &Viewport::new(400.0, 600.0), 20.0);
        assert!((paddle.width - 400.0).abs() < 1e-3);
        assert_eq!(paddle.x, 0.0);
    }

    #[test]
    fn test_bricks_row_major() {
        let mut grid = BrickGrid::new();
        layout_bricks(&mut grid, &Viewport::default());
        let a = grid.get(BrickGrid::index(0, 0)).map(|b| b.pos);
        let b = grid.get(BrickGrid::index(0, 1)).map(|b| b.pos);
        let c = grid.get(BrickGrid::index(1, 0)).map(|b| b.pos);
        let (a, b, c) = (a.unwrap_or_default(), b.unwrap_or_default(), c.unwrap_or_default());
        assert!(b.x > a.x && (b.y - a.y).abs() < 1e-6);
        assert!(c.y > a.y && (c.x - a.x).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_everything_inside_viewport(
            w in 100.0f32..4000.0,
            h in 80.0f32..3000.0,
            x in -500.0f32..5000.0,
            factor in 0.3f32..10.0,
        ) {
            let vp = Viewport::new(w, h);
            let mut paddle = Paddle { x, ..Default::default() };
            layout_paddle(&mut paddle, &vp, factor);
            prop_assert!(inside(
                Vec2::new(paddle.x, paddle.y),
                Vec2::new(paddle.right(), paddle.bottom()),
                &vp
            ));

            let mut grid = BrickGrid::new();
            layout_bricks(&mut grid, &vp);
            for brick in grid.iter() {
                prop_assert!(inside(brick.pos, brick.max(), &vp));
            }
        }
    }
}
