//! Beep cues for sound events
//!
//! The simulation only says what happened; this maps each event to a short
//! synthesized tone a presenter can hand to whatever audio backend it has.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Side, SoundEvent};

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// A single tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beep {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
    /// Output gain (0.0 - 1.0), volume already applied
    pub gain: f32,
}

/// Maps events to tones and applies volume
#[derive(Debug, Clone)]
pub struct BeepBank {
    master_volume: f32,
    muted: bool,
}

impl Default for BeepBank {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Settings> for BeepBank {
    fn from(settings: &Settings) -> Self {
        let mut bank = Self::new();
        bank.set_master_volume(settings.master_volume);
        bank.set_muted(settings.muted);
        bank
    }
}

impl BeepBank {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Tone for an event, or `None` when silent
    pub fn beep_for(&self, event: SoundEvent) -> Option<Beep> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }

        let (frequency_hz, duration_ms, waveform, level) = match event {
            // Wall - short high ping
            SoundEvent::WallBounce => (660.0, 40, Waveform::Sine, 0.3),
            // Paddles - square blip, lower pitch for the opponent
            SoundEvent::PaddleHit(Side::Player) => (440.0, 60, Waveform::Square, 0.5),
            SoundEvent::PaddleHit(Side::Opponent) => (330.0, 60, Waveform::Square, 0.5),
            // Points - rising for the player, falling for the opponent
            SoundEvent::Score(Side::Player) => (880.0, 220, Waveform::Triangle, 0.6),
            SoundEvent::Score(Side::Opponent) => (220.0, 300, Waveform::Triangle, 0.6),
        };

        Some(Beep {
            frequency_hz,
            duration_ms,
            waveform,
            gain: vol * level,
        })
    }
}
