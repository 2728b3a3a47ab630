//! Beep Pong - two paddles, one ball, a scripted opponent
//!
//! Core modules:
//! - `sim`: Simulation (collision, physics, opponent, match rules, step loop)
//! - `game`: Frame driver that buffers input between frames
//! - `presentation`: Render/sound collaborator interface
//! - `audio`: Beep tones for sound events
//! - `settings`: Startup settings (paddle variant, speed factor, seed)

pub mod audio;
pub mod game;
pub mod presentation;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use presentation::{PresentError, Presenter, WorldView};
pub use settings::{PaddleVariant, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Velocities are in pixels per nominal frame (60 Hz); the step function
/// scales them by the frame factor.
pub mod consts {
    /// Nominal frame duration in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame factor applied after a stall
    pub const MAX_FRAME_FACTOR: f32 = 4.0;
    /// Maximum ball substeps per frame
    pub const MAX_SUBSTEPS: u32 = 16;
    /// Idle tick interval while paused (milliseconds)
    pub const IDLE_TICK_MS: f64 = 50.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Distance from the side edge to each paddle's center line
    pub const PADDLE_INSET: f32 = 24.0;
    /// Rectangle paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    /// Circular paddle head
    pub const PADDLE_HEAD_RADIUS: f32 = 30.0;
    /// Handle below the head (rendering only)
    pub const PADDLE_HANDLE_LENGTH: f32 = 36.0;
    pub const PADDLE_HANDLE_WIDTH: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_SPEED: f32 = 4.2;
    /// Added to the ball speed on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 0.25;
    pub const MAX_BALL_SPEED: f32 = 12.0;
    /// Serve angle range around the horizontal (radians)
    pub const SERVE_ANGLE_RANGE: f32 = 0.3;

    /// Vertical velocity added by a rectangle edge hit (full offset)
    pub const RECT_SPIN: f32 = 3.0;
    /// Vertical velocity added per unit of normal.y on a circular head
    pub const CIRCLE_SPIN: f32 = 2.0;
    /// Gap left between ball and paddle after a hit
    pub const SEPARATION_EPSILON: f32 = 0.5;

    /// Keyboard paddle speed (pixels per frame)
    pub const KEY_PADDLE_SPEED: f32 = 7.0;
    /// Acceleration gained per frame while a key is held
    pub const KEY_ACCEL_PER_FRAME: f32 = 0.04;
    pub const KEY_ACCEL_MAX: f32 = 1.8;

    /// Opponent lead (frames of extrapolation)
    pub const AI_LEAD_BASE: f32 = 2.0;
    pub const AI_LEAD_PER_HIT: f32 = 1.5;
    pub const AI_LEAD_MAX: f32 = 14.0;
    /// Opponent tracking error (pixels)
    pub const AI_ERROR_BASE: f32 = 36.0;
    pub const AI_ERROR_DECAY: f32 = 3.0;
    pub const AI_ERROR_MIN: f32 = 6.0;
    /// Opponent max move (pixels per frame)
    pub const AI_MOVE_BASE: f32 = 4.5;
    pub const AI_MOVE_PER_HIT: f32 = 0.2;
    pub const AI_MOVE_MAX: f32 = 7.5;

    /// Speed factor bounds
    pub const MIN_SPEED_FACTOR: f32 = 0.25;
    pub const MAX_SPEED_FACTOR: f32 = 3.0;
}

/// Playfield center point
#[inline]
pub fn playfield_center() -> Vec2 {
    Vec2::new(consts::PLAYFIELD_WIDTH / 2.0, consts::PLAYFIELD_HEIGHT / 2.0)
}

/// Unit vector for an angle measured from the +x axis
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Rescale a velocity to `speed`, keeping its direction.
///
/// A zero velocity has no direction and is returned unchanged.
#[inline]
pub fn with_speed(vel: Vec2, speed: f32) -> Vec2 {
    let len = vel.length();
    if len <= f32::EPSILON {
        return vel;
    }
    vel * (speed / len)
}
