//! World state and core simulation types
//!
//! Everything a step reads or writes lives in [`World`]; there is no hidden
//! module-level state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::frame_factor;
use super::rules::{self, MatchState, RunState};
use crate::consts::*;
use crate::playfield_center;
use crate::presentation::WorldView;

/// Which end of the playfield a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled paddle on the left edge
    Player,
    /// Scripted paddle on the right edge
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Horizontal direction pointing at this side's edge (-1 left, +1 right)
    pub fn sign(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// Sound-worthy things that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEvent {
    WallBounce,
    PaddleHit(Side),
    /// The given side scored
    Score(Side),
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: playfield_center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Paddle geometry used for collision
///
/// The handle of the circular variant only matters for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaddleShape {
    Rectangle {
        width: f32,
        height: f32,
    },
    Circle {
        radius: f32,
        handle_length: f32,
        handle_width: f32,
    },
}

impl PaddleShape {
    pub fn rectangle() -> Self {
        PaddleShape::Rectangle {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn circle() -> Self {
        PaddleShape::Circle {
            radius: PADDLE_HEAD_RADIUS,
            handle_length: PADDLE_HANDLE_LENGTH,
            handle_width: PADDLE_HANDLE_WIDTH,
        }
    }

    /// Vertical half extent (used to clamp the paddle into the playfield)
    pub fn half_height(&self) -> f32 {
        match *self {
            PaddleShape::Rectangle { height, .. } => height / 2.0,
            PaddleShape::Circle { radius, .. } => radius,
        }
    }

    /// Horizontal half extent
    pub fn half_width(&self) -> f32 {
        match *self {
            PaddleShape::Rectangle { width, .. } => width / 2.0,
            PaddleShape::Circle { radius, .. } => radius,
        }
    }
}

/// A paddle sliding along one vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Fixed horizontal center
    pub x: f32,
    /// Vertical center
    pub y: f32,
    /// Vertical velocity over the last step (pixels per frame)
    pub vy: f32,
    pub shape: PaddleShape,
    /// Frames the current movement key has been held
    #[serde(skip)]
    pub key_hold: f32,
}

impl Paddle {
    pub fn new(side: Side, shape: PaddleShape) -> Self {
        let x = match side {
            Side::Player => PADDLE_INSET,
            Side::Opponent => PLAYFIELD_WIDTH - PADDLE_INSET,
        };
        Self {
            side,
            x,
            y: PLAYFIELD_HEIGHT / 2.0,
            vy: 0.0,
            shape,
            key_hold: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Unit vector pointing from this paddle toward the playfield center
    #[inline]
    pub fn facing(&self) -> Vec2 {
        Vec2::new(-self.side.sign(), 0.0)
    }

    /// X coordinate of the face the ball is returned from
    #[inline]
    pub fn face_x(&self) -> f32 {
        self.x + self.facing().x * self.shape.half_width()
    }

    /// Clamp a center position so the shape stays inside the playfield
    pub fn clamp_y(&self, y: f32) -> f32 {
        let half = self.shape.half_height();
        y.clamp(half, PLAYFIELD_HEIGHT - half)
    }

    /// Move to `y` (clamped) and return the displacement actually applied
    pub fn move_to(&mut self, y: f32) -> f32 {
        let new_y = self.clamp_y(y);
        let dy = new_y - self.y;
        self.y = new_y;
        dy
    }
}

/// Reference clock for frame-normalized elapsed time
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Make `now_ms` the reference point
    pub fn restart(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Frame factor since the previous call, then move the reference to `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let factor = match self.last_ms {
            Some(last) => frame_factor(now_ms - last),
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        factor
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub rules: MatchState,
    /// Multiplier on serve speed and the max speed clamp
    pub speed_factor: f32,
    pub clock: FrameClock,
    /// Seeded RNG for serve angles and opponent error
    pub rng: Pcg32,
}

impl World {
    /// New match: paused, scores at zero, ball served toward the opponent
    pub fn new(seed: u64, shape: PaddleShape, speed_factor: f32) -> Self {
        let mut world = Self {
            player: Paddle::new(Side::Player, shape),
            opponent: Paddle::new(Side::Opponent, shape),
            ball: Ball::default(),
            rules: MatchState::new(),
            speed_factor: clamp_speed_factor(speed_factor).unwrap_or(1.0),
            clock: FrameClock::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        world.serve();
        world
    }

    /// Current cap on ball speed
    #[inline]
    pub fn max_ball_speed(&self) -> f32 {
        MAX_BALL_SPEED * self.speed_factor
    }

    /// Place the ball at center with a fresh velocity toward `rules.serve_toward`
    pub fn serve(&mut self) {
        rules::serve(
            &mut self.ball,
            self.rules.serve_toward,
            self.rules.hit_count,
            self.speed_factor,
            &mut self.rng,
        );
    }

    /// Change the speed factor mid-rally, rescaling the ball proportionally.
    ///
    /// Non-finite values are ignored; others are clamped into range.
    pub fn set_speed_factor(&mut self, factor: f32) {
        let Some(factor) = clamp_speed_factor(factor) else {
            log::warn!("Ignoring speed factor {factor}");
            return;
        };
        let ratio = factor / self.speed_factor;
        self.ball.vel *= ratio;
        self.speed_factor = factor;
        log::debug!("Speed factor set to {factor:.2}");
    }

    pub fn is_running(&self) -> bool {
        self.rules.run_state == RunState::Running
    }

    /// Snapshot handed to the presenter
    pub fn view(&self) -> WorldView {
        WorldView {
            player: self.player,
            opponent: self.opponent,
            ball: self.ball,
            score: self.rules.score,
            hit_count: self.rules.hit_count,
            run_state: self.rules.run_state,
            speed_factor: self.speed_factor,
        }
    }
}

fn clamp_speed_factor(factor: f32) -> Option<f32> {
    factor
        .is_finite()
        .then(|| factor.clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR))
}
