//! Match state machine: scores, hit counter, run state, serves

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Side};
use crate::consts::*;
use crate::{direction_from_angle, playfield_center};

/// Whether the rally is being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }
}

/// Scores, rally length and run state for one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub score: Score,
    /// Successful returns since the last point
    pub hit_count: u32,
    pub run_state: RunState,
    /// Direction of the next serve
    pub serve_toward: Side,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            score: Score::default(),
            hit_count: 0,
            run_state: RunState::Paused,
            serve_toward: Side::Opponent,
        }
    }

    /// Flip between paused and running, returning the new state
    pub fn toggle(&mut self) -> RunState {
        self.run_state = match self.run_state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };
        log::info!("Run state -> {:?}", self.run_state);
        self.run_state
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
            log::info!("Paused");
        }
    }

    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    /// Zero both scores and stop play. Ball, paddles and rally are untouched.
    pub fn reset_scores(&mut self) {
        self.score = Score::default();
        self.run_state = RunState::Paused;
        log::info!("Scores reset");
    }

    /// Credit `scorer`, end the rally and aim the next serve at the side that lost
    pub fn award_point(&mut self, scorer: Side) {
        self.score.award(scorer);
        self.hit_count = 0;
        self.run_state = RunState::Paused;
        self.serve_toward = scorer.opposite();
        log::info!(
            "{:?} scores: {} - {}",
            scorer,
            self.score.player,
            self.score.opponent
        );
    }
}

/// Side that scored if the ball has fully left the playfield
pub fn check_crossing(ball: &Ball, width: f32) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Opponent)
    } else if ball.pos.x - ball.radius > width {
        Some(Side::Player)
    } else {
        None
    }
}

/// Serve speed for the given rally length
pub fn serve_speed(hit_count: u32, speed_factor: f32) -> f32 {
    let base = BALL_START_SPEED + hit_count as f32 * BALL_SPEED_INCREMENT;
    base.min(MAX_BALL_SPEED) * speed_factor
}

/// Put the ball at center heading toward `toward` at a shallow random angle
pub fn serve<R: Rng>(
    ball: &mut Ball,
    toward: Side,
    hit_count: u32,
    speed_factor: f32,
    rng: &mut R,
) {
    let angle = rng.random_range(-SERVE_ANGLE_RANGE..=SERVE_ANGLE_RANGE);
    let dir = direction_from_angle(angle);
    ball.pos = playfield_center();
    ball.vel = Vec2::new(dir.x * toward.sign(), dir.y) * serve_speed(hit_count, speed_factor);
}
