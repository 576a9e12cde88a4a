//! Collision detection and response for axis-aligned geometry
//!
//! Balls are tested by their bounding box against bricks and the paddle, which
//! is all a grid of rectangles needs at one-tick resolution.

use glam::Vec2;

use super::state::{Ball, Paddle, Viewport};
use crate::consts::PADDLE_DEFLECT;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Point inside a rectangle, edges included
#[inline]
pub fn point_in_rect(point: Vec2, min: Vec2, max: Vec2) -> bool {
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Circle bounding box strictly overlaps a rectangle
#[inline]
pub fn circle_overlaps_rect(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    center.x + radius > min.x
        && center.x - radius < max.x
        && center.y + radius > min.y
        && center.y - radius < max.y
}

/// Bounce a ball off the left, right and top edges. The bottom is open.
pub fn resolve_walls(ball: &mut Ball, viewport: &Viewport) {
    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel = reflect_velocity(ball.vel, Vec2::X);
    }
    if ball.pos.x + ball.radius > viewport.width {
        ball.pos.x = viewport.width - ball.radius;
        ball.vel = reflect_velocity(ball.vel, Vec2::NEG_X);
    }
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel = reflect_velocity(ball.vel, Vec2::Y);
    }
}

/// Ball is vertically within the paddle band and horizontally over it
pub fn ball_touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.y + ball.radius >= paddle.y
        && ball.pos.y - ball.radius <= paddle.bottom()
        && ball.pos.x >= paddle.x
        && ball.pos.x <= paddle.right()
}

/// Send the ball back up, angled by where it struck the paddle.
///
/// Center hits go straight up, edge hits leave at the full deflection.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, viewport: &Viewport) {
    ball.vel.y = -ball.vel.y.abs();
    let half = paddle.width * 0.5;
    let hit_offset = if half > 0.0 {
        ((ball.pos.x - paddle.center_x()) / half).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    ball.vel.x = hit_offset * PADDLE_DEFLECT * viewport.speed_scale();
}

/// Ball has dropped fully below the field
#[inline]
pub fn ball_below_field(ball: &Ball, viewport: &Viewport) -> bool {
    ball.pos.y - ball.radius > viewport.height
}
