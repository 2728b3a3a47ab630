//! Beep Pong entry point
//!
//! Native build runs a headless demo match: an autopilot steers the player
//! paddle with the pointer, a logging presenter stands in for canvas and
//! speakers. Pass a settings JSON path as the first argument.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;

    use beep_pong::audio::BeepBank;
    use beep_pong::consts::*;
    use beep_pong::sim::SoundEvent;
    use beep_pong::{Game, PresentError, Presenter, Settings, WorldView};

    /// Frames to simulate (about two minutes at 60 Hz)
    const DEMO_FRAMES: u32 = 60 * 120;
    /// Match ends early when either side reaches this
    const DEMO_POINTS: u32 = 7;
    /// Idle ticks to wait before serving again
    const SERVE_DELAY_TICKS: u32 = 10;
    /// Autopilot reaction lag (fraction of the gap closed per frame)
    const AUTOPILOT_GAIN: f32 = 0.35;

    /// Logs frames and beeps instead of drawing and playing them
    struct LogPresenter {
        beeps: BeepBank,
        frames: u64,
    }

    impl Presenter for LogPresenter {
        fn render(&mut self, view: &WorldView) -> Result<(), PresentError> {
            self.frames += 1;
            if log::log_enabled!(log::Level::Trace) {
                let json = serde_json::to_string(view)
                    .map_err(|e| PresentError::Render(e.to_string()))?;
                log::trace!("frame {}: {}", self.frames, json);
            }
            Ok(())
        }

        fn notify_sound(&mut self, event: SoundEvent) -> Result<(), PresentError> {
            if let Some(beep) = self.beeps.beep_for(event) {
                log::debug!(
                    "{:?}: {:.0} Hz {:?} for {} ms",
                    event,
                    beep.frequency_hz,
                    beep.waveform,
                    beep.duration_ms
                );
            }
            Ok(())
        }
    }

    pub fn run() {
        let settings = std::env::args()
            .nth(1)
            .map(|path| Settings::load_or_default(Path::new(&path)))
            .unwrap_or_default();

        let presenter = LogPresenter {
            beeps: BeepBank::from(&settings),
            frames: 0,
        };
        let mut game = Game::new(&settings, presenter);

        let mut now = 0.0;
        let mut waited = 0;
        for _ in 0..DEMO_FRAMES {
            let world = game.world();
            let score = world.rules.score;
            if score.player >= DEMO_POINTS || score.opponent >= DEMO_POINTS {
                break;
            }

            if world.is_running() {
                let target = world.player.y + (world.ball.pos.y - world.player.y) * AUTOPILOT_GAIN;
                game.pointer_moved(target);
                now += FRAME_MS;
                game.frame(now);
            } else {
                now += IDLE_TICK_MS;
                waited += 1;
                if waited >= SERVE_DELAY_TICKS {
                    waited = 0;
                    game.toggle();
                }
                game.idle(now);
            }
        }

        let score = game.world().rules.score;
        log::info!(
            "Demo finished after {} rendered frames",
            game.presenter().frames
        );
        println!("Final score: player {} - opponent {}", score.player, score.opponent);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beep Pong (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `beep_pong::Game` directly
}
