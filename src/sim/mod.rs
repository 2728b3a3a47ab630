//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Explicit `World` passed into every step
//! - Seeded RNG only
//! - Input arrives as a snapshot per step

pub mod collision;
pub mod opponent;
pub mod physics;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, ball_hits_paddle, ball_paddle_collision, ball_wall_collision, contact_normal,
    reflect_velocity, resolve_paddle_hit,
};
pub use physics::frame_factor;
pub use rules::{MatchState, RunState, Score};
pub use state::{Ball, FrameClock, Paddle, PaddleShape, Side, SoundEvent, World};
pub use tick::{StepPhase, TickInput, step};
