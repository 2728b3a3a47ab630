//! Per-frame simulation step
//!
//! One function serves both cadences: the display-synced `Active` frame and
//! the slower `Idle` tick that runs while paused.

use super::collision::{ball_wall_collision, escape_paddle, resolve_paddle_hit};
use super::opponent::drive_opponent;
use super::physics::{apply_pointer, drive_paddle_keys, integrate_ball, substeps_for};
use super::rules::{RunState, check_crossing};
use super::state::{Side, SoundEvent, World};
use crate::consts::*;

/// Input snapshot sampled once at the top of a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest pointer position mapped to the player paddle center
    pub pointer_y: Option<f32>,
    /// Move-up key held
    pub up: bool,
    /// Move-down key held
    pub down: bool,
    /// Serve/pause toggle
    pub toggle: bool,
    /// Zero the scores and pause
    pub reset: bool,
    /// New speed multiplier
    pub speed_factor: Option<f32>,
    /// Drawing surface lost focus
    pub focus_lost: bool,
}

impl TickInput {
    /// Key direction: -1 up, +1 down, 0 when neither or both are held
    pub fn key_axis(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Which cadence is calling the step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// Display refresh tick
    Active,
    /// Low-frequency tick while paused
    Idle,
}

/// Advance the world by one step and return the sound events it produced
///
/// Commands apply in a fixed order: toggle, reset, focus lost, speed factor.
/// Reset and focus lost come after the toggle so a snapshot carrying either
/// always ends paused.
///
/// Each run state has one owning cadence: `Active` while running, `Idle`
/// while paused. Only the owner advances the frame clock and drives the
/// paddle from held keys; the other cadence sees a zero frame factor.
pub fn step(world: &mut World, input: &TickInput, now_ms: f64, phase: StepPhase) -> Vec<SoundEvent> {
    let mut events = Vec::new();

    if input.toggle && world.rules.toggle() == RunState::Running {
        world.clock.restart(now_ms);
    }
    if input.reset {
        world.rules.reset_scores();
    }
    if input.focus_lost {
        world.rules.pause();
    }
    if let Some(factor) = input.speed_factor {
        world.set_speed_factor(factor);
    }

    let running = world.is_running();
    let owns_clock = match phase {
        StepPhase::Active => running,
        StepPhase::Idle => !running,
    };
    let factor = if owns_clock { world.clock.advance(now_ms) } else { 0.0 };

    if let Some(y) = input.pointer_y {
        apply_pointer(&mut world.player, y, factor);
    } else if owns_clock {
        drive_paddle_keys(&mut world.player, input.key_axis(), factor);
    }

    if phase == StepPhase::Active && running {
        advance_rally(world, factor, &mut events);
    }

    events
}

/// Opponent, ball motion, collisions and scoring for one running frame
fn advance_rally(world: &mut World, factor: f32, events: &mut Vec<SoundEvent>) {
    drive_opponent(
        &mut world.opponent,
        &world.ball,
        world.rules.hit_count,
        factor,
        &mut world.rng,
    );

    let substeps = substeps_for(&world.ball, factor);
    let dt = factor / substeps as f32;

    for _ in 0..substeps {
        integrate_ball(&mut world.ball, dt);

        let max_speed = world.max_ball_speed();
        let mut returned_by = None;
        for paddle in [&world.player, &world.opponent] {
            if resolve_paddle_hit(&mut world.ball, paddle, max_speed) {
                world.rules.record_hit();
                events.push(SoundEvent::PaddleHit(paddle.side));
                returned_by = Some(paddle.side);
            }
        }

        // After paddles: a head hit near a wall can push the ball past it
        if ball_wall_collision(&mut world.ball, PLAYFIELD_HEIGHT) {
            events.push(SoundEvent::WallBounce);
        }
        // The clamp may have put it back inside the head it just left
        if let Some(side) = returned_by {
            let paddle = match side {
                Side::Player => &world.player,
                Side::Opponent => &world.opponent,
            };
            escape_paddle(&mut world.ball, paddle);
        }

        if let Some(scorer) = check_crossing(&world.ball, PLAYFIELD_WIDTH) {
            world.rules.award_point(scorer);
            world.serve();
            events.push(SoundEvent::Score(scorer));
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rules::Score;
    use crate::playfield_center;
    use crate::sim::collision::ball_hits_paddle;
    use crate::sim::state::PaddleShape;
    use glam::Vec2;

    fn running_world(shape: PaddleShape) -> World {
        let mut world = World::new(12345, shape, 1.0);
        let toggle = TickInput {
            toggle: true,
            ..Default::default()
        };
        step(&mut world, &toggle, 0.0, StepPhase::Active);
        world
    }

    #[test]
    fn test_toggle_starts_and_pauses() {
        let mut world = World::new(12345, PaddleShape::rectangle(), 1.0);
        assert_eq!(world.rules.run_state, RunState::Paused);

        let ball_before = world.ball;
        let toggle = TickInput {
            toggle: true,
            ..Default::default()
        };
        step(&mut world, &toggle, 1_000.0, StepPhase::Active);
        assert_eq!(world.rules.run_state, RunState::Running);
        // Clock restarted on entering Running, so nothing moved yet
        assert_eq!(world.ball, ball_before);

        step(&mut world, &TickInput::default(), 1_000.0 + FRAME_MS, StepPhase::Active);
        assert!((world.ball.pos - ball_before.pos - ball_before.vel).length() < 1e-3);

        step(&mut world, &toggle, 1_050.0, StepPhase::Active);
        assert_eq!(world.rules.run_state, RunState::Paused);
    }

    #[test]
    fn test_paused_steps_do_not_move_ball() {
        let mut world = World::new(1, PaddleShape::rectangle(), 1.0);
        let ball = world.ball;
        for i in 0..10 {
            step(&mut world, &TickInput::default(), i as f64 * FRAME_MS, StepPhase::Active);
            step(&mut world, &TickInput::default(), i as f64 * FRAME_MS, StepPhase::Idle);
        }
        assert_eq!(world.ball, ball);
    }

    #[test]
    fn test_idle_tick_moves_player_only_while_paused() {
        let mut world = World::new(1, PaddleShape::rectangle(), 1.0);
        let down = TickInput {
            down: true,
            ..Default::default()
        };
        let start = world.player.y;
        step(&mut world, &down, 0.0, StepPhase::Idle);
        step(&mut world, &down, IDLE_TICK_MS, StepPhase::Idle);
        assert!(world.player.y > start);

        let mut world = running_world(PaddleShape::rectangle());
        let start = world.player.y;
        step(&mut world, &down, IDLE_TICK_MS, StepPhase::Idle);
        assert_eq!(world.player.y, start);
    }

    #[test]
    fn test_pointer_moves_player_even_when_paused() {
        let mut world = World::new(1, PaddleShape::circle(), 1.0);
        let input = TickInput {
            pointer_y: Some(100.0),
            ..Default::default()
        };
        step(&mut world, &input, 0.0, StepPhase::Active);
        assert_eq!(world.player.y, 100.0);
    }

    #[test]
    fn test_left_crossing_scores_once() {
        let mut world = running_world(PaddleShape::rectangle());
        world.rules.hit_count = 4;
        // Above the player paddle so it cannot be returned
        world.ball.pos = Vec2::new(-BALL_RADIUS + 1.0, 20.0);
        world.ball.vel = Vec2::new(-5.0, 0.0);
        world.player.move_to(PLAYFIELD_HEIGHT);

        let events = step(&mut world, &TickInput::default(), FRAME_MS, StepPhase::Active);
        assert_eq!(events, vec![SoundEvent::Score(Side::Opponent)]);
        assert_eq!(world.rules.score, Score { player: 0, opponent: 1 });
        assert_eq!(world.rules.hit_count, 0);
        assert_eq!(world.rules.run_state, RunState::Paused);
        assert_eq!(world.ball.pos, playfield_center());
        assert!(world.ball.vel.x < 0.0);

        for i in 2..20 {
            let events = step(&mut world, &TickInput::default(), i as f64 * FRAME_MS, StepPhase::Active);
            assert!(events.is_empty());
        }
        assert_eq!(world.rules.score, Score { player: 0, opponent: 1 });
    }

    #[test]
    fn test_right_crossing_scores_for_player() {
        let mut world = running_world(PaddleShape::circle());
        world.ball.pos = Vec2::new(PLAYFIELD_WIDTH + BALL_RADIUS - 1.0, 20.0);
        world.ball.vel = Vec2::new(5.0, 0.0);
        world.opponent.move_to(PLAYFIELD_HEIGHT);

        let events = step(&mut world, &TickInput::default(), FRAME_MS, StepPhase::Active);
        assert!(events.contains(&SoundEvent::Score(Side::Player)));
        assert_eq!(world.rules.score.player, 1);
        assert!(world.ball.vel.x > 0.0);
    }

    #[test]
    fn test_reset_mid_rally() {
        let mut world = running_world(PaddleShape::rectangle());
        world.rules.score = Score { player: 3, opponent: 5 };
        world.rules.hit_count = 7;
        let ball = world.ball;
        let player = world.player;

        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        step(&mut world, &reset, 0.0, StepPhase::Active);
        assert_eq!(world.rules.score, Score::default());
        assert_eq!(world.rules.run_state, RunState::Paused);
        assert_eq!(world.ball, ball);
        assert_eq!(world.player, player);
    }

    #[test]
    fn test_toggle_with_reset_ends_paused() {
        let mut world = World::new(3, PaddleShape::rectangle(), 1.0);
        world.rules.score = Score { player: 2, opponent: 4 };
        let input = TickInput {
            toggle: true,
            reset: true,
            ..Default::default()
        };
        step(&mut world, &input, 0.0, StepPhase::Active);
        assert_eq!(world.rules.run_state, RunState::Paused);
        assert_eq!(world.rules.score, Score::default());

        let input = TickInput {
            toggle: true,
            focus_lost: true,
            ..Default::default()
        };
        step(&mut world, &input, FRAME_MS, StepPhase::Active);
        assert_eq!(world.rules.run_state, RunState::Paused);

        // Same from running: the toggle pauses and the reset keeps it paused
        let mut world = running_world(PaddleShape::circle());
        let input = TickInput {
            toggle: true,
            reset: true,
            ..Default::default()
        };
        step(&mut world, &input, FRAME_MS, StepPhase::Active);
        assert_eq!(world.rules.run_state, RunState::Paused);
    }

    #[test]
    fn test_frames_while_paused_do_not_eat_idle_time() {
        let down = TickInput {
            down: true,
            ..Default::default()
        };

        // Display frames keep arriving between idle ticks
        let mut mixed = World::new(8, PaddleShape::rectangle(), 1.0);
        for ms in 0..=150u32 {
            if ms % 16 == 0 {
                step(&mut mixed, &down, ms as f64, StepPhase::Active);
            }
            if ms % 50 == 0 {
                step(&mut mixed, &down, ms as f64, StepPhase::Idle);
            }
        }

        let mut idle_only = World::new(8, PaddleShape::rectangle(), 1.0);
        let start = idle_only.player.y;
        for ms in [0.0, 50.0, 100.0, 150.0] {
            step(&mut idle_only, &down, ms, StepPhase::Idle);
        }

        assert!(idle_only.player.y > start);
        assert_eq!(mixed.player.y, idle_only.player.y);
    }

    #[test]
    fn test_idle_ticks_while_running_do_not_eat_frame_time() {
        let mut world = running_world(PaddleShape::rectangle());
        world.ball.pos = Vec2::new(400.0, 250.0);
        world.ball.vel = Vec2::new(3.0, 0.0);
        step(&mut world, &TickInput::default(), 10.0, StepPhase::Idle);
        step(&mut world, &TickInput::default(), FRAME_MS, StepPhase::Active);
        assert!((world.ball.pos.x - 403.0).abs() < 1e-3);
    }

    #[test]
    fn test_head_hit_against_wall_counts_once() {
        let mut world = running_world(PaddleShape::circle());
        // Head pinned to the top wall, fast rally so it stays put
        world.opponent.move_to(0.0);
        world.rules.hit_count = 100;
        let normal = Vec2::new(-0.726, -0.6875).normalize();
        world.ball.pos = world.opponent.center() + normal * 32.0 - Vec2::new(5.0, 0.0);
        world.ball.vel = Vec2::new(5.0, 0.0);

        let events = step(&mut world, &TickInput::default(), FRAME_MS, StepPhase::Active);
        let hits = events
            .iter()
            .filter(|e| **e == SoundEvent::PaddleHit(Side::Opponent))
            .count();
        assert_eq!(hits, 1);
        assert_eq!(world.rules.hit_count, 101);
        assert!(!ball_hits_paddle(&world.ball, &world.opponent));
        assert!(world.ball.vel.x < 0.0);

        for i in 2..32 {
            let events = step(&mut world, &TickInput::default(), i as f64 * FRAME_MS, StepPhase::Active);
            assert!(!events.contains(&SoundEvent::PaddleHit(Side::Opponent)));
            assert!(world.ball.pos.y >= BALL_RADIUS - 1e-3);
        }
        assert_eq!(world.rules.hit_count, 101);
    }

    #[test]
    fn test_focus_lost_pauses() {
        let mut world = running_world(PaddleShape::rectangle());
        let input = TickInput {
            focus_lost: true,
            ..Default::default()
        };
        step(&mut world, &input, FRAME_MS, StepPhase::Active);
        assert_eq!(world.rules.run_state, RunState::Paused);
    }

    #[test]
    fn test_paddle_hit_emits_event_and_counts() {
        let mut world = running_world(PaddleShape::rectangle());
        world.player.move_to(250.0);
        world.ball.pos = Vec2::new(world.player.face_x() + BALL_RADIUS + 2.0, 250.0);
        world.ball.vel = Vec2::new(-BALL_START_SPEED, 0.0);

        let events = step(&mut world, &TickInput::default(), FRAME_MS, StepPhase::Active);
        assert!(events.contains(&SoundEvent::PaddleHit(Side::Player)));
        assert_eq!(world.rules.hit_count, 1);
        assert!(world.ball.vel.x > 0.0);
    }

    #[test]
    fn test_wall_bounce_event() {
        let mut world = running_world(PaddleShape::rectangle());
        world.ball.pos = Vec2::new(400.0, BALL_RADIUS + 1.0);
        world.ball.vel = Vec2::new(3.0, -3.0);

        let events = step(&mut world, &TickInput::default(), FRAME_MS, StepPhase::Active);
        assert_eq!(events, vec![SoundEvent::WallBounce]);
        assert!(world.ball.vel.y > 0.0);
    }

    #[test]
    fn test_stall_does_not_tunnel_through_paddle() {
        let mut world = running_world(PaddleShape::rectangle());
        world.set_speed_factor(MAX_SPEED_FACTOR);
        world.player.move_to(250.0);
        world.ball.pos = Vec2::new(world.player.face_x() + 60.0, 250.0);
        world.ball.vel = Vec2::new(-MAX_BALL_SPEED * MAX_SPEED_FACTOR, 0.0);

        // Long stall: capped at MAX_FRAME_FACTOR frames of travel
        let events = step(&mut world, &TickInput::default(), 5_000.0, StepPhase::Active);
        assert!(events.contains(&SoundEvent::PaddleHit(Side::Player)));
        assert_eq!(world.rules.score, Score::default());
    }

    #[test]
    fn test_speed_factor_input() {
        let mut world = running_world(PaddleShape::circle());
        let speed = world.ball.speed();
        let input = TickInput {
            speed_factor: Some(1.5),
            ..Default::default()
        };
        step(&mut world, &input, 0.0, StepPhase::Active);
        assert!((world.ball.speed() - speed * 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_long_match_keeps_invariants() {
        for shape in [PaddleShape::rectangle(), PaddleShape::circle()] {
            let mut world = running_world(shape);
            let mut now = 0.0;
            for _ in 0..5_000 {
                now += FRAME_MS;
                let input = TickInput {
                    pointer_y: Some(world.ball.pos.y),
                    toggle: !world.is_running(),
                    ..Default::default()
                };
                step(&mut world, &input, now, StepPhase::Active);
                assert!(world.ball.speed() <= world.max_ball_speed() + 1e-3);
                assert!(world.ball.pos.y >= BALL_RADIUS - 1e-3);
                assert!(world.ball.pos.y <= PLAYFIELD_HEIGHT - BALL_RADIUS + 1e-3);
            }
        }
    }
}
