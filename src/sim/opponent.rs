//! Scripted opponent
//!
//! A proportional tracker with saturation: aim at where the ball will be a
//! few frames from now (straight-line extrapolation), add some noise, and
//! close the gap no faster than a per-frame cap. Longer rallies make it look
//! further ahead, aim better and move faster.

use rand::Rng;

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Frames of velocity extrapolation for the current rally length
pub fn lead_factor(hit_count: u32) -> f32 {
    (AI_LEAD_BASE + hit_count as f32 * AI_LEAD_PER_HIT).min(AI_LEAD_MAX)
}

/// Half-width of the uniform aiming error
pub fn error_magnitude(hit_count: u32) -> f32 {
    (AI_ERROR_BASE - hit_count as f32 * AI_ERROR_DECAY).max(AI_ERROR_MIN)
}

/// Largest move per nominal frame
pub fn max_move(hit_count: u32) -> f32 {
    (AI_MOVE_BASE + hit_count as f32 * AI_MOVE_PER_HIT).min(AI_MOVE_MAX)
}

/// Where the opponent wants its center, before noise
pub fn target_y(ball: &Ball, hit_count: u32) -> f32 {
    ball.pos.y + ball.vel.y * lead_factor(hit_count)
}

/// Move the opponent paddle one step toward its noisy target.
///
/// Returns the displacement applied.
pub fn drive_opponent<R: Rng>(
    paddle: &mut Paddle,
    ball: &Ball,
    hit_count: u32,
    factor: f32,
    rng: &mut R,
) -> f32 {
    let spread = error_magnitude(hit_count);
    let target = target_y(ball, hit_count) + rng.random_range(-spread..=spread);
    let limit = max_move(hit_count) * factor;
    let step = (target - paddle.y).clamp(-limit, limit);
    let dy = paddle.move_to(paddle.y + step);
    paddle.vy = if factor > 0.0 { dy / factor } else { 0.0 };
    dy
}
