//! Presentation collaborator interface
//!
//! The simulation never draws or plays audio itself. A [`Presenter`] gets a
//! snapshot every step and a notification per sound event. Its failures are
//! logged by the caller and never stop the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Ball, Paddle, RunState, Score, SoundEvent};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub hit_count: u32,
    pub run_state: RunState,
    pub speed_factor: f32,
}

/// Errors a presenter may report
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("render failed: {0}")]
    Render(String),
    #[error("audio failed: {0}")]
    Audio(String),
}

/// Draws the world and plays sound cues
pub trait Presenter {
    fn render(&mut self, view: &WorldView) -> Result<(), PresentError>;

    /// Fire-and-forget: must return without waiting for the sound to finish
    fn notify_sound(&mut self, event: SoundEvent) -> Result<(), PresentError>;
}
