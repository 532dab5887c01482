//! Tempo and transport state shared by every schedule.

use crate::error::{Result, TutorError};
use crate::model::pattern::MusicalTime;
use log::debug;
use std::time::Duration;

pub const DEFAULT_TEMPO_BPM: f64 = 80.0;
pub const MIN_TEMPO_BPM: f64 = 40.0;
pub const MAX_TEMPO_BPM: f64 = 240.0;

/// Accepts tempos the scheduler can turn into deadlines.
pub fn check_tempo(bpm: f64) -> Result<f64> {
    if (MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&bpm) {
        Ok(bpm)
    } else {
        Err(TutorError::InvalidTempo(bpm))
    }
}

/// Seconds from pattern start for `time` at `bpm`.
pub fn to_seconds(time: MusicalTime, bpm: f64, beats_per_bar: u32) -> f64 {
    time.to_beats(beats_per_bar) * (60.0 / bpm)
}

/// Current tempo plus a reference-counted transport.
///
/// The transport keeps running while any schedule holds it, so the
/// metronome and a pattern session cannot switch it off under each other.
#[derive(Debug)]
pub struct TempoClock {
    bpm: f64,
    running: bool,
    holders: u32,
}

impl Default for TempoClock {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPO_BPM)
    }
}

impl TempoClock {
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            running: false,
            holders: 0,
        }
    }

    /// Callers clamp against exercise bounds, the clock takes whatever it is given.
    pub fn set_tempo(&mut self, bpm: f64) {
        debug!("Tempo set to {:.1} bpm..!", bpm);
        self.bpm = bpm;
    }

    pub fn tempo(&self) -> f64 {
        self.bpm
    }

    pub fn to_seconds(&self, time: MusicalTime, bpm: f64, beats_per_bar: u32) -> f64 {
        to_seconds(time, bpm, beats_per_bar)
    }

    pub fn beat_duration(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.bpm)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn holders(&self) -> u32 {
        self.holders
    }

    pub fn acquire(&mut self) {
        self.holders += 1;
        if !self.running {
            debug!("Transport started..!");
        }
        self.start();
    }

    pub fn release(&mut self) {
        self.holders = self.holders.saturating_sub(1);
        if self.holders == 0 && self.running {
            debug!("Transport stopped, no schedules left..!");
            self.stop();
        }
    }
}
