//! One-shot commit timer
//!
//! The processor runs on a cooperative loop, so a timer is just a deadline
//! that the loop checks on every poll. The handle is owned by the in-flight
//! state and must be consumed exactly once, either by [`CommitTimer::fire`]
//! or [`CommitTimer::cancel`]. Once it is gone nothing can commit on its
//! behalf.

use std::time::{Duration, Instant};

/// Pending commit deadline for the key currently in flight
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a commit timer must be fired or cancelled"]
pub struct CommitTimer {
    started: Instant,
    delay: Duration,
}

impl CommitTimer {
    /// Arm a timer that expires `delay` after `started`
    pub fn start(started: Instant, delay: Duration) -> Self {
        Self { started, delay }
    }

    pub fn deadline(&self) -> Instant {
        self.started + self.delay
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// Consume the timer at its deadline, returning the instant it fired
    pub fn fire(self) -> Instant {
        self.deadline()
    }

    /// Consume the timer without firing
    pub fn cancel(self) {
        log::trace!("commit timer cancelled ({}ms)", self.delay.as_millis());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_is_due_at_deadline() {
        let t0 = Instant::now();
        let timer = CommitTimer::start(t0, Duration::from_millis(100));

        assert!(!timer.is_due(t0));
        assert!(!timer.is_due(t0 + Duration::from_millis(99)));
        assert!(timer.is_due(t0 + Duration::from_millis(100)));
        assert_eq!(timer.deadline(), t0 + Duration::from_millis(100));
    }

    #[test]
    fn cancel_consumes_timer() {
        let t0 = Instant::now();
        let timer = CommitTimer::start(t0, Duration::from_millis(50));
        assert!(!timer.is_due(t0 + Duration::from_millis(49)));
        timer.cancel();
    }

    #[test]
    fn fire_returns_deadline() {
        let t0 = Instant::now();
        let timer = CommitTimer::start(t0, Duration::from_millis(200));
        assert_eq!(timer.fire(), t0 + Duration::from_millis(200));
    }
}
