//! Collision detection and response
//!
//! Two paddle shapes share one pipeline: detect overlap, pick a contact
//! normal, apply the shape's response model, then bump the ball speed.
//! Rectangles use a horizontal bounce plus offset spin; circular heads use a
//! true mirror reflection about the contact normal.

use glam::Vec2;

use super::state::{Ball, Paddle, PaddleShape};
use crate::consts::*;
use crate::with_speed;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at the contact, pointing toward the ball center
    pub normal: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
        }
    }
}

/// Check overlap between a ball and a paddle of either shape
pub fn ball_paddle_collision(ball_pos: Vec2, ball_radius: f32, paddle: &Paddle) -> CollisionResult {
    match paddle.shape {
        PaddleShape::Rectangle { width, height } => {
            let half = Vec2::new(width, height) / 2.0;
            ball_rect_collision(ball_pos, ball_radius, paddle.center(), half, paddle.facing())
        }
        PaddleShape::Circle { radius, .. } => {
            ball_circle_collision(ball_pos, ball_radius, paddle.center(), radius, paddle.facing())
        }
    }
}

/// Ball against an axis-aligned rectangle given by center and half extents.
///
/// `fallback` is used as the normal when the ball center lies on or inside
/// the rectangle.
pub fn ball_rect_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    half: Vec2,
    fallback: Vec2,
) -> CollisionResult {
    let closest = ball_pos.clamp(center - half, center + half);
    let delta = ball_pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON { delta / dist } else { fallback };
    CollisionResult { hit: true, normal }
}

/// Ball against a circle. `fallback` is used when the centers coincide.
pub fn ball_circle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    radius: f32,
    fallback: Vec2,
) -> CollisionResult {
    let delta = ball_pos - center;
    let dist = delta.length();
    let reach = radius + ball_radius;

    if dist > reach {
        return CollisionResult::miss();
    }

    let normal = if dist > f32::EPSILON { delta / dist } else { fallback };
    CollisionResult { hit: true, normal }
}

/// Does the ball overlap the paddle?
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball_paddle_collision(ball.pos, ball.radius, paddle).hit
}

/// Normal used for the response, pointing from the paddle toward the ball.
///
/// Falls back to the paddle's facing direction when the geometry is
/// degenerate or the ball is not touching.
pub fn contact_normal(ball: &Ball, paddle: &Paddle) -> Vec2 {
    let result = ball_paddle_collision(ball.pos, ball.radius, paddle);
    if result.hit { result.normal } else { paddle.facing() }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Add the per-hit speed increment, keep the direction, cap at `max_speed`
pub fn apply_hit_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = (velocity.length() + BALL_SPEED_INCREMENT).min(max_speed);
    with_speed(velocity, speed)
}

/// Resolve a ball/paddle contact in place.
///
/// Returns true when the ball was returned. A ball already moving away from
/// the paddle is left alone so one contact counts as one hit.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, max_speed: f32) -> bool {
    let result = ball_paddle_collision(ball.pos, ball.radius, paddle);
    if !result.hit {
        return false;
    }

    match paddle.shape {
        PaddleShape::Rectangle { height, .. } => {
            let facing = paddle.facing();
            if ball.vel.x * facing.x >= 0.0 {
                return false;
            }
            ball.vel.x = -ball.vel.x;
            let offset = ((ball.pos.y - paddle.y) / (height / 2.0)).clamp(-1.0, 1.0);
            ball.vel.y += offset * RECT_SPIN;
            // Out in front of the face, whichever edge was struck
            ball.pos.x = paddle.face_x() + facing.x * (ball.radius + SEPARATION_EPSILON);
        }
        PaddleShape::Circle { radius, .. } => {
            let normal = result.normal;
            if ball.vel.dot(normal) >= 0.0 {
                return false;
            }
            ball.vel = reflect_velocity(ball.vel, normal);
            ball.vel.y += normal.y * CIRCLE_SPIN;
            ball.pos = paddle.center() + normal * (radius + ball.radius + SEPARATION_EPSILON);
        }
    }

    ball.vel = apply_hit_speed(ball.vel, max_speed);
    log::debug!(
        "{:?} paddle hit, speed {:.2}",
        paddle.side,
        ball.vel.length()
    );
    true
}

/// Push a ball that a wall clamp wedged into `paddle` back out sideways.
///
/// The ball keeps its speed but leaves horizontally, away from the paddle
/// center, so the same contact is not returned twice. Returns true when the
/// ball had to be moved.
pub fn escape_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if !ball_hits_paddle(ball, paddle) {
        return false;
    }

    let offset = ball.pos.x - paddle.x;
    let dir = if offset.abs() > f32::EPSILON {
        offset.signum()
    } else {
        paddle.facing().x
    };
    let reach = match paddle.shape {
        PaddleShape::Rectangle { width, .. } => width / 2.0 + ball.radius + SEPARATION_EPSILON,
        PaddleShape::Circle { radius, .. } => {
            let full = radius + ball.radius + SEPARATION_EPSILON;
            let dy = ball.pos.y - paddle.y;
            (full * full - dy * dy).max(0.0).sqrt()
        }
    };
    ball.pos.x = paddle.x + dir * reach;
    ball.vel = Vec2::new(dir * ball.vel.length(), 0.0);
    log::debug!("{:?} paddle: ball squeezed out against the wall", paddle.side);
    true
}

/// Bounce off the top and bottom boundaries.
///
/// Returns true when the vertical velocity was flipped.
pub fn ball_wall_collision(ball: &mut Ball, height: f32) -> bool {
    if ball.pos.y - ball.radius < 0.0 {
        ball.pos.y = ball.radius;
        if ball.vel.y < 0.0 {
            ball.vel.y = -ball.vel.y;
            return true;
        }
    } else if ball.pos.y + ball.radius > height {
        ball.pos.y = height - ball.radius;
        if ball.vel.y > 0.0 {
            ball.vel.y = -ball.vel.y;
            return true;
        }
    }
    false
}
