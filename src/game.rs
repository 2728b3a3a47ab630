//! Frame driver
//!
//! Input callbacks only record into a buffer; the buffer becomes the
//! [`TickInput`] snapshot for the next step. One-shot commands are cleared
//! after each step, held keys persist until released.

use crate::presentation::{Presenter, WorldView};
use crate::settings::Settings;
use crate::sim::{SoundEvent, StepPhase, TickInput, World, step};

/// Directional keys for the player paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A match plus the collaborator that shows it
pub struct Game<P: Presenter> {
    world: World,
    presenter: P,
    input: TickInput,
}

impl<P: Presenter> Game<P> {
    pub fn new(settings: &Settings, presenter: P) -> Self {
        let seed = settings.resolve_seed();
        log::info!(
            "New match: {} paddles, speed factor {:.2}, seed {}",
            settings.variant.as_str(),
            settings.speed_factor,
            seed
        );
        Self::with_world(
            World::new(seed, settings.variant.shape(), settings.speed_factor),
            presenter,
        )
    }

    pub fn with_world(world: World, presenter: P) -> Self {
        Self {
            world,
            presenter,
            input: TickInput::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // === Input ===

    pub fn pointer_moved(&mut self, y: f32) {
        self.input.pointer_y = Some(y);
    }

    pub fn key_down(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.input.up = true,
            Direction::Down => self.input.down = true,
        }
    }

    pub fn key_up(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.input.up = false,
            Direction::Down => self.input.down = false,
        }
    }

    /// Serve/pause
    pub fn toggle(&mut self) {
        self.input.toggle = true;
    }

    pub fn reset(&mut self) {
        self.input.reset = true;
    }

    pub fn set_speed_factor(&mut self, factor: f32) {
        self.input.speed_factor = Some(factor);
    }

    pub fn focus_lost(&mut self) {
        self.input.focus_lost = true;
    }

    // === Stepping ===

    /// Display refresh tick
    pub fn frame(&mut self, now_ms: f64) {
        self.run_step(now_ms, StepPhase::Active);
    }

    /// Low-frequency tick while paused
    pub fn idle(&mut self, now_ms: f64) {
        self.run_step(now_ms, StepPhase::Idle);
    }

    fn run_step(&mut self, now_ms: f64, phase: StepPhase) {
        let input = self.input.clone();
        let events = step(&mut self.world, &input, now_ms, phase);

        // Clear one-shot inputs after processing
        self.input.pointer_y = None;
        self.input.toggle = false;
        self.input.reset = false;
        self.input.speed_factor = None;
        self.input.focus_lost = false;

        for event in events {
            self.notify(event);
        }
        let view: WorldView = self.world.view();
        if let Err(e) = self.presenter.render(&view) {
            log::warn!("Render error: {e}");
        }
    }

    fn notify(&mut self, event: SoundEvent) {
        if let Err(e) = self.presenter.notify_sound(event) {
            log::warn!("Sound error for {event:?}: {e}");
        }
    }
}
