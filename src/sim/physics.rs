//! Frame-normalized integration for the ball and the player paddle

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Elapsed milliseconds expressed in nominal frames, capped after a stall
pub fn frame_factor(elapsed_ms: f64) -> f32 {
    ((elapsed_ms / FRAME_MS) as f32).clamp(0.0, MAX_FRAME_FACTOR)
}

/// Number of substeps so the ball never travels more than its radius at once
pub fn substeps_for(ball: &Ball, factor: f32) -> u32 {
    let travel = ball.speed() * factor;
    if travel <= ball.radius {
        return 1;
    }
    ((travel / ball.radius).ceil() as u32).clamp(1, MAX_SUBSTEPS)
}

#[inline]
pub fn integrate_ball(ball: &mut Ball, factor: f32) {
    ball.pos += ball.vel * factor;
}

/// Key direction for the player paddle: -1 up, +1 down, 0 none
pub fn drive_paddle_keys(paddle: &mut Paddle, axis: f32, factor: f32) {
    if axis == 0.0 {
        paddle.key_hold = 0.0;
        paddle.vy = 0.0;
        return;
    }
    let accel = (1.0 + paddle.key_hold * KEY_ACCEL_PER_FRAME).min(KEY_ACCEL_MAX);
    let dy = paddle.move_to(paddle.y + axis.signum() * KEY_PADDLE_SPEED * factor * accel);
    paddle.key_hold += factor;
    paddle.vy = if factor > 0.0 { dy / factor } else { 0.0 };
}

/// Snap the paddle center to a pointer position (clamped)
pub fn apply_pointer(paddle: &mut Paddle, pointer_y: f32, factor: f32) {
    let dy = paddle.move_to(pointer_y);
    paddle.key_hold = 0.0;
    paddle.vy = if factor > 0.0 { dy / factor } else { 0.0 };
}
