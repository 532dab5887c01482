use crate::clock::{TempoClock, check_tempo};
use crate::engine::{SoundTrigger, VisualFeedback};
use crate::error::{Result, TutorError};
use crate::model::pattern::{InstrumentId, Pattern};
use crate::timer::{MonotonicTime, ScheduleToken, TimeSource, TimerQueue};
use log::{debug, info, trace, warn};
use std::time::Duration;

/// How long a one-shot session lingers after its last hit before going idle.
pub const AUTO_STOP_BUFFER: Duration = Duration::from_secs(1);
pub const CLICK_VELOCITY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Scheduled,
    /// Terminal status of a session handed back by [`Scheduler::stop`].
    Stopped,
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub pattern: Pattern,
    pub tempo_bpm: f64,
    pub looping: bool,
    pub started_at: Duration,
    pub status: SessionStatus,
    /// Number of pattern passes armed so far, starting at 1.
    pub iterations: u64,
    token: ScheduleToken,
}

#[derive(Debug, Clone, Copy)]
enum Job {
    Hit { instrument: InstrumentId, velocity: f64 },
    Rearm { epoch: Duration },
    AutoStop,
    Click,
}

/// Owns the tempo clock, the pending jobs and at most one playback session.
///
/// All state is touched from a single thread: whoever drives [`Scheduler::poll`].
/// The metronome is a second, independent schedule that only shares the
/// transport with the session.
pub struct Scheduler<S: SoundTrigger, V: VisualFeedback> {
    clock: TempoClock,
    queue: TimerQueue<Job>,
    sound: S,
    visual: V,
    time: Box<dyn TimeSource>,
    session: Option<PlaybackSession>,
    metronome: Option<ScheduleToken>,
    next_token: u64,
    ready: bool,
}

impl<S: SoundTrigger, V: VisualFeedback> Scheduler<S, V> {
    pub fn new(sound: S, visual: V) -> Self {
        Self::with_time_source(sound, visual, MonotonicTime::new())
    }

    pub fn with_time_source(sound: S, visual: V, time: impl TimeSource + 'static) -> Self {
        Self {
            clock: TempoClock::default(),
            queue: TimerQueue::new(),
            sound,
            visual,
            time: Box::new(time),
            session: None,
            metronome: None,
            next_token: 0,
            ready: false,
        }
    }

    /// Prepares both backends. Nothing can be triggered before this succeeds.
    pub fn initialize(&mut self) -> Result<()> {
        if self.ready {
            return Ok(());
        }

        self.sound.initialize().map_err(TutorError::Backend)?;
        self.visual.initialize().map_err(TutorError::Backend)?;
        self.ready = true;
        info!("Playback backends initialized..!");

        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready { Ok(()) } else { Err(TutorError::NotReady) }
    }

    pub fn clock(&self) -> &TempoClock {
        &self.clock
    }

    /// Applies from the next loop pass and the next metronome tick.
    pub fn set_tempo(&mut self, bpm: f64) -> Result<()> {
        self.clock.set_tempo(check_tempo(bpm)?);
        Ok(())
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    pub fn now(&self) -> Duration {
        self.time.now()
    }

    pub fn status(&self) -> SessionStatus {
        self.session.as_ref().map_or(SessionStatus::Idle, |s| s.status)
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_metronome_enabled(&self) -> bool {
        self.metronome.is_some()
    }

    /// True while a session or the metronome still has work scheduled.
    pub fn is_active(&self) -> bool {
        self.session.is_some() || self.metronome.is_some()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn fresh_token(&mut self) -> ScheduleToken {
        self.next_token += 1;
        ScheduleToken(self.next_token)
    }

    fn loop_period(pattern: &Pattern, bpm: f64) -> Duration {
        Duration::from_secs_f64(pattern.loop_length_beats() * 60.0 / bpm)
    }

    /// Registers one pass of `pattern` starting at `epoch`, returns the latest hit deadline.
    fn arm_iteration(
        queue: &mut TimerQueue<Job>,
        pattern: &Pattern,
        token: ScheduleToken,
        epoch: Duration,
        bpm: f64,
    ) -> Duration {
        let bpb = pattern.beats_per_bar();
        let mut last = epoch;

        for event in pattern.in_time_order() {
            let offset = crate::clock::to_seconds(event.time, bpm, bpb);
            let deadline = epoch + Duration::from_secs_f64(offset);
            queue.schedule(
                deadline,
                token,
                Job::Hit {
                    instrument: event.instrument,
                    velocity: event.velocity,
                },
            );
            last = last.max(deadline);
        }

        last
    }

    /// Starts `pattern` at `tempo_bpm`, replacing any session that is still running.
    pub fn play(&mut self, pattern: Pattern, tempo_bpm: f64, looping: bool) -> Result<()> {
        self.ensure_ready()?;
        let tempo_bpm = check_tempo(tempo_bpm)?;

        self.stop();

        if pattern.is_empty() {
            debug!("Ignoring empty pattern..!");
            return Ok(());
        }

        self.clock.set_tempo(tempo_bpm);
        let token = self.fresh_token();
        let now = self.time.now();

        let last = Self::arm_iteration(&mut self.queue, &pattern, token, now, tempo_bpm);
        if looping {
            let next = now + Self::loop_period(&pattern, tempo_bpm);
            self.queue.schedule(next, token, Job::Rearm { epoch: next });
        } else {
            self.queue.schedule(last + AUTO_STOP_BUFFER, token, Job::AutoStop);
        }
        self.clock.acquire();

        info!(
            "Scheduled {} hits at {:.1} bpm ({})..!",
            pattern.len(),
            tempo_bpm,
            if looping { "looping" } else { "once" }
        );

        self.session = Some(PlaybackSession {
            pattern,
            tempo_bpm,
            looping,
            started_at: now,
            status: SessionStatus::Scheduled,
            iterations: 1,
            token,
        });

        Ok(())
    }

    /// Cancels everything the current session still has pending and hands it back.
    ///
    /// Leaves the metronome running, and with it the transport.
    pub fn stop(&mut self) -> Option<PlaybackSession> {
        let mut session = self.session.take()?;
        let cancelled = self.queue.cancel(session.token);
        self.clock.release();
        session.status = SessionStatus::Stopped;

        info!(
            "Stopped playback after {} pass(es), {} pending job(s) cancelled..!",
            session.iterations, cancelled
        );
        Some(session)
    }

    /// Stops the session and the metronome.
    pub fn stop_all(&mut self) {
        self.stop();
        if let Some(token) = self.metronome.take() {
            self.queue.cancel(token);
            self.clock.release();
            info!("Metronome off..!");
        }
    }

    /// Immediate hit, independent of any schedule.
    pub fn play_one_shot(&mut self, instrument: InstrumentId, velocity: f64) -> Result<()> {
        self.ensure_ready()?;
        if !(0.0..=1.0).contains(&velocity) {
            return Err(TutorError::InvalidVelocity(velocity));
        }

        self.fire(instrument, velocity);
        Ok(())
    }

    /// Flips the metronome and returns whether it is now enabled.
    pub fn toggle_metronome(&mut self) -> Result<bool> {
        self.ensure_ready()?;

        if let Some(token) = self.metronome.take() {
            self.queue.cancel(token);
            self.clock.release();
            info!("Metronome off..!");
            return Ok(false);
        }

        let token = self.fresh_token();
        self.queue.schedule(self.time.now(), token, Job::Click);
        self.clock.acquire();
        self.metronome = Some(token);
        info!("Metronome on at {:.1} bpm..!", self.clock.tempo());

        Ok(true)
    }

    /// Dispatches every job that is due, in deadline order. Returns how many ran.
    pub fn poll(&mut self) -> usize {
        let now = self.time.now();
        let mut dispatched = 0;

        while let Some((deadline, token, job)) = self.queue.pop_due(now) {
            self.dispatch(deadline, token, job);
            dispatched += 1;
        }

        dispatched
    }

    fn dispatch(&mut self, deadline: Duration, token: ScheduleToken, job: Job) {
        match job {
            Job::Hit { instrument, velocity } => {
                trace!(
                    "Hit {} v={:.2} due {:.3}s fired {:.3}s",
                    instrument,
                    velocity,
                    deadline.as_secs_f64(),
                    self.time.now().as_secs_f64()
                );
                self.fire(instrument, velocity);
            }
            Job::Rearm { epoch } => self.rearm(token, epoch),
            Job::AutoStop => {
                if self.session.as_ref().is_some_and(|s| s.token == token) {
                    self.session = None;
                    self.queue.cancel(token);
                    self.clock.release();
                    info!("Demonstration finished..!");
                }
            }
            Job::Click => {
                if self.metronome != Some(token) {
                    return;
                }
                if let Err(why) = self.sound.trigger(InstrumentId::Click, CLICK_VELOCITY) {
                    warn!("Metronome click failed | why: {:?}", why);
                }
                let beat = self.clock.beat_duration();
                let mut next = deadline + beat;
                let now = self.time.now();
                if next < now {
                    // stalled, skip the ticks that were missed but stay on the grid
                    let behind = ((now - next).as_secs_f64() / beat.as_secs_f64()).floor();
                    next += beat.mul_f64(behind + 1.0);
                }
                self.queue.schedule(next, token, Job::Click);
            }
        }
    }

    fn rearm(&mut self, token: ScheduleToken, epoch: Duration) {
        let bpm = self.clock.tempo();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.token != token {
            return;
        }

        session.tempo_bpm = bpm;
        session.iterations += 1;
        Self::arm_iteration(&mut self.queue, &session.pattern, token, epoch, bpm);

        let next = epoch + Self::loop_period(&session.pattern, bpm);
        self.queue.schedule(next, token, Job::Rearm { epoch: next });
        debug!("Loop pass {} armed at {:.1} bpm..!", session.iterations, bpm);
    }

    fn fire(&mut self, instrument: InstrumentId, velocity: f64) {
        if let Err(why) = self.sound.trigger(instrument, velocity) {
            warn!("Sound trigger failed for {} | why: {:?}", instrument, why);
        }
        if let Err(why) = self.visual.on_hit(instrument, velocity) {
            warn!("Visual feedback failed for {} | why: {:?}", instrument, why);
        }
    }
}


#[cfg(test)]
mod test {
    use super::testing::*;
    use super::*;
    use crate::engine::Silent;

    fn single_stroke() -> Pattern {
        let rows = [
            ("snare-right", "0:0:0", 1.0),
            ("snare-left", "0:0:2", 1.0),
            ("snare-right", "0:1:0", 1.0),
            ("snare-left", "0:1:2", 1.0),
            ("snare-right", "0:2:0", 1.0),
            ("snare-left", "0:2:2", 1.0),
            ("snare-right", "0:3:0", 1.0),
            ("snare-left", "0:3:2", 1.0),
        ];
        Pattern::from_table(&rows, 4).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn one_shot_single_stroke_fires_on_time_then_auto_stops() {
        env_logger::try_init().unwrap_or(());
        let (mut s, time) = scheduler();

        s.play(single_stroke(), 80.0, false).unwrap();
        assert_eq!(s.status(), SessionStatus::Scheduled);
        assert!(s.clock().is_running());

        run_until(&mut s, &time, 3.6);
        let hits = s.sound().hits.borrow().clone();
        let expected = [0.0, 0.375, 0.75, 1.125, 1.5, 1.875, 2.25, 2.625];
        assert_eq!(hits.len(), expected.len());
        for (i, ((at, instrument, _), want)) in hits.iter().zip(expected).enumerate() {
            assert!(close(*at, want), "hit {} at {} expected {}", i, at, want);
            let hand = if i % 2 == 0 { InstrumentId::SnareRight } else { InstrumentId::SnareLeft };
            assert_eq!(*instrument, hand);
        }

        // still settling
        assert_eq!(s.status(), SessionStatus::Scheduled);

        run_until(&mut s, &time, 3.625);
        assert_eq!(s.status(), SessionStatus::Idle);
        assert!(!s.clock().is_running());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn visual_feedback_sees_the_same_hits() {
        let (mut s, time) = scheduler();
        s.play(single_stroke(), 120.0, false).unwrap();
        run_until(&mut s, &time, 10.0);
        assert_eq!(s.visual().instruments(), s.sound().instruments());
    }

    #[test]
    fn replaying_cancels_the_previous_session() {
        let (mut s, time) = scheduler();
        let a = Pattern::from_table(&[("bass", "0:0:1", 1.0), ("bass", "0:2:0", 1.0)], 4).unwrap();
        let b = Pattern::from_table(&[("hihat", "0:1:0", 1.0)], 4).unwrap();

        s.play(a, 80.0, true).unwrap();
        s.play(b, 80.0, true).unwrap();
        run_until(&mut s, &time, 30.0);

        let instruments = s.sound().instruments();
        assert!(!instruments.is_empty());
        assert!(instruments.iter().all(|i| *i == InstrumentId::HiHat));
        assert_eq!(s.clock().holders(), 1);
    }

    #[test]
    fn stop_cancels_hits_that_are_already_due() {
        let (mut s, time) = scheduler();
        s.play(single_stroke(), 80.0, true).unwrap();

        run_until(&mut s, &time, 0.4);
        let before = s.sound().count();
        assert_eq!(before, 2);

        // deadlines pass without a poll, then stop
        time.set_secs(2.0);
        let stopped = s.stop().unwrap();
        assert_eq!(stopped.status, SessionStatus::Stopped);

        run_until(&mut s, &time, 60.0);
        assert_eq!(s.sound().count(), before);
        assert_eq!(s.status(), SessionStatus::Idle);
        assert!(!s.clock().is_running());
    }

    #[test]
    fn stop_on_idle_is_a_no_op() {
        let (mut s, _time) = scheduler();
        assert!(s.stop().is_none());
        assert!(s.stop().is_none());
        assert_eq!(s.status(), SessionStatus::Idle);
        assert_eq!(s.clock().holders(), 0);
    }

    #[test]
    fn looping_pattern_rearms_each_bar() {
        let (mut s, time) = scheduler();
        let pattern = single_stroke();
        let n = pattern.len();
        s.play(pattern, 80.0, true).unwrap();

        // one bar at 80 bpm is 3s
        run_until(&mut s, &time, 2.0 * 3.0 - 0.001);
        let hits = s.sound().hits.borrow().clone();
        assert_eq!(hits.len(), 2 * n);
        for i in 0..n {
            assert!(close(hits[i + n].0 - hits[i].0, 3.0));
        }
        assert_eq!(s.session().map(|s| s.iterations), Some(2));
        assert_eq!(s.status(), SessionStatus::Scheduled);
    }

    #[test]
    fn tempo_change_applies_from_the_next_pass() {
        let (mut s, time) = scheduler();
        s.play(single_stroke(), 80.0, true).unwrap();

        run_until(&mut s, &time, 0.1);
        s.set_tempo(120.0).unwrap();
        run_until(&mut s, &time, 3.0 + 2.0 - 0.001);

        let hits = s.sound().hits.borrow().clone();
        // first pass keeps its 80 bpm deadlines
        assert!(close(hits[7].0, 2.625));
        // second pass starts at 3s and runs at 0.25s per eighth
        assert!(close(hits[8].0, 3.0));
        assert!(close(hits[9].0, 3.25));
        assert_eq!(hits.len(), 16);
    }

    #[test]
    fn grace_notes_fire_before_their_main_stroke() {
        let (mut s, time) = scheduler();
        let flam = Pattern::from_table(
            &[("snare-right", "0:0:0.1", 1.0), ("snare-left", "0:0:0", 0.4)],
            4,
        )
        .unwrap();
        s.play(flam, 90.0, false).unwrap();
        run_until(&mut s, &time, 5.0);

        assert_eq!(
            s.sound().instruments(),
            vec![InstrumentId::SnareLeft, InstrumentId::SnareRight]
        );
    }

    #[test]
    fn metronome_and_session_share_the_transport() {
        let (mut s, time) = scheduler();
        s.set_tempo(120.0).unwrap();
        assert!(s.toggle_metronome().unwrap());

        s.play(single_stroke(), 120.0, false).unwrap();
        assert_eq!(s.clock().holders(), 2);

        run_until(&mut s, &time, 10.0);
        // session finished, metronome keeps the transport alive
        assert_eq!(s.status(), SessionStatus::Idle);
        assert!(s.clock().is_running());

        let clicks = s.sound().hits.borrow().iter().filter(|h| h.1 == InstrumentId::Click).count();
        assert_eq!(clicks, 21);

        // clicks never reach the visual side
        assert!(!s.visual().instruments().contains(&InstrumentId::Click));

        assert!(!s.toggle_metronome().unwrap());
        assert!(!s.clock().is_running());
        assert!(!s.is_active());
    }

    #[test]
    fn stopping_the_session_keeps_the_metronome() {
        let (mut s, time) = scheduler();
        s.toggle_metronome().unwrap();
        s.play(single_stroke(), 80.0, true).unwrap();
        s.stop();

        assert!(s.is_metronome_enabled());
        assert!(s.clock().is_running());

        run_until(&mut s, &time, 1.0);
        let clicks = s.sound().count();
        assert_eq!(clicks, 2);

        s.stop_all();
        run_until(&mut s, &time, 5.0);
        assert!(!s.clock().is_running());
        assert_eq!(s.sound().count(), clicks);
    }

    #[test]
    fn failing_backend_does_not_derail_the_session() {
        let time = ManualTime::default();
        let mut sound = Recorder::new(&time);
        sound.fail_every = Some(2);
        let mut s = Scheduler::with_time_source(sound, Recorder::new(&time), time.clone());
        s.initialize().unwrap();

        s.play(single_stroke(), 80.0, false).unwrap();
        run_until(&mut s, &time, 10.0);

        assert_eq!(s.sound().count(), 4);
        assert_eq!(s.visual().count(), 8);
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn empty_pattern_still_stops_the_old_session() {
        let (mut s, time) = scheduler();
        s.play(single_stroke(), 80.0, true).unwrap();
        s.play(Pattern::empty(), 80.0, true).unwrap();

        assert_eq!(s.status(), SessionStatus::Idle);
        run_until(&mut s, &time, 10.0);
        assert_eq!(s.sound().count(), 0);
    }

    #[test]
    fn nothing_plays_before_initialize() {
        let mut s = Scheduler::new(Silent, Silent);
        assert!(matches!(s.play(single_stroke(), 80.0, true), Err(TutorError::NotReady)));
        assert!(matches!(s.play_one_shot(InstrumentId::Bass, 1.0), Err(TutorError::NotReady)));
        assert!(matches!(s.toggle_metronome(), Err(TutorError::NotReady)));
        assert!(s.stop().is_none());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn bad_tempo_is_rejected_without_touching_the_session() {
        let (mut s, _time) = scheduler();
        s.play(single_stroke(), 80.0, true).unwrap();
        assert!(matches!(s.play(single_stroke(), 0.0, true), Err(TutorError::InvalidTempo(_))));
        assert_eq!(s.status(), SessionStatus::Scheduled);
    }

    #[test]
    fn tempos_that_cannot_be_timed_are_rejected() {
        let (mut s, time) = scheduler();
        let pattern = Pattern::from_table(&[("bass", "0:0:0", 1.0), ("bass", "0:2:0", 1.0)], 4).unwrap();
        s.play(pattern.clone(), 80.0, true).unwrap();

        for bad in [1e-19, 1e6, -120.0] {
            assert!(matches!(s.play(pattern.clone(), bad, true), Err(TutorError::InvalidTempo(_))));
        }
        assert_eq!(s.status(), SessionStatus::Scheduled);
        assert_eq!(s.session().map(|s| s.tempo_bpm), Some(80.0));

        run_until(&mut s, &time, 6.0 - 0.001);
        assert_eq!(s.sound().count(), 4);
    }

    #[test]
    fn bad_tempo_change_keeps_the_metronome_and_loop_running() {
        let (mut s, time) = scheduler();
        s.toggle_metronome().unwrap();
        s.play(single_stroke(), 80.0, true).unwrap();

        for bad in [0.0, -1.0, f64::NAN, 1e-19] {
            assert!(matches!(s.set_tempo(bad), Err(TutorError::InvalidTempo(_))));
        }
        assert_eq!(s.clock().tempo(), 80.0);

        // clicks at 0, 0.75 .. 5.25 and two loop passes of 8 hits
        run_until(&mut s, &time, 6.0 - 0.001);
        let clicks = s.sound().hits.borrow().iter().filter(|h| h.1 == InstrumentId::Click).count();
        assert_eq!(clicks, 8);
        assert_eq!(s.sound().count() - clicks, 16);

        s.set_tempo(120.0).unwrap();
        run_until(&mut s, &time, 8.0 - 0.001);
        // third pass armed at 6s runs at 0.25s per eighth
        let hits = s.sound().hits.borrow().clone();
        let third: Vec<f64> = hits
            .iter()
            .filter(|h| h.1 != InstrumentId::Click && h.0 >= 6.0 - 1e-9)
            .map(|h| h.0)
            .collect();
        assert_eq!(third.len(), 8);
        assert!(close(third[1] - third[0], 0.25));
    }

    #[test]
    fn stalled_metronome_skips_missed_ticks() {
        let (mut s, time) = scheduler();
        s.toggle_metronome().unwrap();

        time.set_secs(10.0);
        assert_eq!(s.poll(), 1);
        assert_eq!(s.sound().count(), 1);

        // 80 bpm grid: 0.75 * 14
        let next = s.next_deadline().unwrap().as_secs_f64();
        assert!(close(next, 10.5), "next click at {}", next);
    }

    #[test]
    fn one_shots_leave_the_session_alone() {
        let (mut s, time) = scheduler();
        s.play(single_stroke(), 80.0, false).unwrap();
        time.set_secs(0.1);
        s.play_one_shot(InstrumentId::Crash, 0.7).unwrap();

        assert_eq!(s.status(), SessionStatus::Scheduled);
        assert_eq!(s.sound().instruments(), vec![InstrumentId::Crash]);
        assert!(s.play_one_shot(InstrumentId::Crash, 1.5).is_err());
    }
}
