//! Deferred jobs keyed by deadline, cancellable by schedule token.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Identifies every job registered by one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleToken(pub u64);

/// A monotonic time base measured from some epoch.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    epoch: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }

    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

#[derive(Debug)]
struct Entry<J> {
    token: ScheduleToken,
    job: J,
}

/// Jobs ordered by (deadline, registration order).
#[derive(Debug)]
pub struct TimerQueue<J> {
    entries: BTreeMap<(Duration, u64), Entry<J>>,
    next_seq: u64,
}

impl<J> Default for TimerQueue<J> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J> TimerQueue<J> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, deadline: Duration, token: ScheduleToken, job: J) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((deadline, seq), Entry { token, job });
    }

    /// Drops every pending job registered under `token`, returns how many.
    pub fn cancel(&mut self, token: ScheduleToken) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.token != token);
        before - self.entries.len()
    }

    /// Removes and returns the earliest job whose deadline is not after `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, ScheduleToken, J)> {
        let (&(deadline, _), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }

        let ((deadline, _), entry) = self.entries.pop_first()?;
        Some((deadline, entry.token, entry.job))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first_key_value().map(|(&(deadline, _), _)| deadline)
    }

    pub fn pending(&self, token: ScheduleToken) -> usize {
        self.entries.values().filter(|e| e.token == token).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
