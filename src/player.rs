use crate::clock::{MAX_TEMPO_BPM, MIN_TEMPO_BPM};
use crate::engine::{SoundTrigger, VisualFeedback};
use crate::error::Result;
use crate::library::{Exercise, PatternLibrary, TempoRange};
use crate::model::pattern::{InstrumentId, Pattern};
use crate::progress::{self, ChecklistState, ProgressRecord, ProgressStore, ProgressSummary};
use crate::scheduler::{PlaybackSession, Scheduler};
use log::{debug, info, warn};
use spin_sleep::{SpinSleeper, SpinStrategy};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

pub const PAD_VELOCITY: f64 = 1.0;
const MAX_SLEEP_CHUNK_S: f64 = 0.050;

/// Requests other threads may send to the run loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMsg {
    Stop,
    Pad(InstrumentId),
    ToggleMetronome,
    NudgeTempo(f64),
}

/// Everything a practice session needs, wired together and owned in one place.
pub struct Player<S: SoundTrigger, V: VisualFeedback, P: ProgressStore> {
    scheduler: Scheduler<S, V>,
    library: PatternLibrary,
    progress: P,
    current: Option<&'static Exercise>,
    verbose: bool,
}

impl<S: SoundTrigger, V: VisualFeedback, P: ProgressStore> Player<S, V, P> {
    pub fn new(sound: S, visual: V, progress: P, verbose: bool) -> Self {
        Self::with_scheduler(Scheduler::new(sound, visual), progress, verbose)
    }

    pub fn with_scheduler(scheduler: Scheduler<S, V>, progress: P, verbose: bool) -> Self {
        Self {
            scheduler,
            library: PatternLibrary::new(),
            progress,
            current: None,
            verbose,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.scheduler.initialize()
    }

    pub fn scheduler(&self) -> &Scheduler<S, V> {
        &self.scheduler
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// The exercise most recently started with [`Player::play`].
    pub fn current_exercise(&self) -> Option<&'static Exercise> {
        self.current
    }

    /// Demonstrates `exercise_id`, at its target tempo unless overridden.
    pub fn play(&mut self, exercise_id: &str, tempo_override: Option<f64>, looping: bool) -> Result<()> {
        let exercise = self.library.require(exercise_id)?;
        let pattern = exercise.pattern()?;
        let tempo = tempo_override.unwrap_or(exercise.target_tempo as f64);

        self.scheduler.play(pattern, tempo, looping)?;
        self.current = Some(exercise);
        info!("Playing '{}' (grade {})..!", exercise.name, exercise.grade);

        Ok(())
    }

    pub fn play_pattern(&mut self, pattern: Pattern, tempo_bpm: f64, looping: bool) -> Result<()> {
        self.scheduler.play(pattern, tempo_bpm, looping)?;
        self.current = None;
        Ok(())
    }

    pub fn play_one_shot(&mut self, instrument: InstrumentId, velocity: f64) -> Result<()> {
        self.scheduler.play_one_shot(instrument, velocity)
    }

    pub fn stop(&mut self) -> Option<PlaybackSession> {
        self.scheduler.stop()
    }

    pub fn stop_all(&mut self) {
        self.scheduler.stop_all();
    }

    pub fn set_tempo(&mut self, bpm: f64) -> Result<()> {
        self.scheduler.set_tempo(bpm)
    }

    pub fn tempo(&self) -> f64 {
        self.scheduler.clock().tempo()
    }

    pub fn toggle_metronome(&mut self) -> Result<bool> {
        self.scheduler.toggle_metronome()
    }

    pub fn tempo_range(&self, exercise_id: &str) -> Result<TempoRange> {
        self.library.tempo_range(exercise_id)
    }

    /// Stores `checklist` for `exercise_id`, dropping ticks for items the exercise does not have.
    pub fn save_progress(&mut self, exercise_id: &str, checklist: ChecklistState) -> Result<ProgressRecord> {
        let exercise = self.library.require(exercise_id)?;
        let total = exercise.checklist_items.len();
        let checklist: ChecklistState = checklist.into_iter().filter(|(item, _)| *item < total).collect();

        let record = ProgressRecord::new(exercise.id, checklist);
        self.progress.save(&record)?;
        info!(
            "Saved progress for '{}': {}/{} items..!",
            exercise.id, record.completed_items, total
        );

        Ok(record)
    }

    pub fn load_progress(&self, exercise_id: &str) -> Result<Option<ProgressRecord>> {
        let exercise = self.library.require(exercise_id)?;
        self.progress.load(exercise.id)
    }

    pub fn progress_summary(&self) -> ProgressSummary {
        progress::summarize(&self.progress, self.library.exercises())
    }

    fn handle(&mut self, msg: ControlMsg) -> bool {
        match msg {
            ControlMsg::Stop => {
                self.stop_all();
                warn!("Playback stopped via control message..!");
                return false;
            }
            ControlMsg::Pad(instrument) => {
                if let Err(why) = self.play_one_shot(instrument, PAD_VELOCITY) {
                    warn!("Pad hit failed for {} | why: {:?}", instrument, why);
                }
            }
            ControlMsg::ToggleMetronome => {
                if let Err(why) = self.toggle_metronome() {
                    warn!("Metronome toggle failed | why: {:?}", why);
                }
            }
            ControlMsg::NudgeTempo(delta) => {
                let bpm = (self.tempo() + delta).clamp(MIN_TEMPO_BPM, MAX_TEMPO_BPM);
                match self.scheduler.set_tempo(bpm) {
                    Ok(()) => info!("Tempo now {:.0} bpm..!", bpm),
                    Err(why) => warn!("Tempo nudge failed | why: {:?}", why),
                }
            }
        }
        true
    }

    /// Drives the scheduler in real time until stopped.
    ///
    /// Returns once nothing is scheduled, unless `hold_open` keeps it waiting
    /// for pads and control messages until a [`ControlMsg::Stop`] arrives.
    pub fn run(&mut self, control_rx: &Receiver<ControlMsg>, hold_open: bool) -> anyhow::Result<()> {
        let sleeper = SpinSleeper::new(100_000).with_spin_strategy(SpinStrategy::YieldThread);
        let mut last_frame = self.scheduler.now();

        loop {
            loop {
                match control_rx.try_recv() {
                    Ok(msg) => {
                        if !self.handle(msg) {
                            return Ok(());
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if hold_open {
                            debug!("Control channel closed, stopping..!");
                            self.stop_all();
                            return Ok(());
                        }
                        break;
                    }
                }
            }

            let dispatched = self.scheduler.poll();
            if self.verbose && dispatched > 0 {
                info!(
                    "Dispatched {} job(s) at {:>9.3}s..!",
                    dispatched,
                    self.scheduler.now().as_secs_f64()
                );
            }

            if !hold_open && !self.scheduler.is_active() {
                info!("Nothing left to play..!");
                return Ok(());
            }

            let now = self.scheduler.now();
            self.scheduler
                .visual_mut()
                .advance(now.saturating_sub(last_frame).as_secs_f64());
            last_frame = now;

            let remaining = self
                .scheduler
                .next_deadline()
                .map_or(MAX_SLEEP_CHUNK_S, |deadline| {
                    deadline.saturating_sub(now).as_secs_f64()
                });

            let chunk = if remaining > MAX_SLEEP_CHUNK_S {
                MAX_SLEEP_CHUNK_S
            } else {
                remaining
            };

            if chunk > 0.0 {
                sleeper.sleep(Duration::from_secs_f64(chunk));
            }
        }
    }
}
