//! Delayed processor: the single sequential worker that commits queued keys
//!
//! The processor is either [`ProcessorState::Idle`] or holding exactly one
//! in-flight key together with its [`CommitTimer`]. Work only starts from
//! the `Idle` arm of [`DelayedProcessor::poll`], so there is never more than
//! one key in flight.

use super::error::{KeyboardError, Result};
use super::{CommitTimer, KeyEvent, KeyQueue};
use std::time::{Duration, Instant};

/// Shortest allowed per-key delay
pub const MIN_DELAY_MS: u64 = 50;
/// Longest allowed per-key delay
pub const MAX_DELAY_MS: u64 = 1000;
/// Delay used when nothing else is configured
pub const DEFAULT_DELAY_MS: u64 = 200;
/// Granularity of delay stepping
pub const DELAY_STEP_MS: u64 = 50;

/// Check that `ms` lies in `MIN_DELAY_MS..=MAX_DELAY_MS`
pub fn validate_delay(ms: u64) -> Result<Duration> {
    if (MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms) {
        Ok(Duration::from_millis(ms))
    } else {
        Err(KeyboardError::InvalidDelay {
            ms,
            min: MIN_DELAY_MS,
            max: MAX_DELAY_MS,
        })
    }
}

/// The key currently being applied
#[derive(Debug, PartialEq, Eq)]
pub struct InFlight {
    event: KeyEvent,
    timer: CommitTimer,
}

impl InFlight {
    pub fn event(&self) -> KeyEvent {
        self.event
    }

    pub fn deadline(&self) -> Instant {
        self.timer.deadline()
    }
}

/// Processor state
#[derive(Debug, Default, PartialEq, Eq)]
pub enum ProcessorState {
    #[default]
    Idle,
    Processing(InFlight),
}

/// A key that was committed to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub event: KeyEvent,
    /// Instant the commit timer expired
    pub committed_at: Instant,
    /// Time from submission to commit
    pub latency: Duration,
}

/// Sequential delayed-commit worker
#[derive(Debug)]
pub struct DelayedProcessor {
    state: ProcessorState,
    delay: Duration,
}

impl DelayedProcessor {
    pub fn new(delay_ms: u64) -> Result<Self> {
        Ok(Self {
            state: ProcessorState::Idle,
            delay: validate_delay(delay_ms)?,
        })
    }

    pub fn state(&self) -> &ProcessorState {
        &self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }

    /// Change the delay used for the next key that starts processing.
    ///
    /// A key already in flight keeps the delay it started with.
    pub fn set_delay(&mut self, delay_ms: u64) -> Result<()> {
        self.delay = validate_delay(delay_ms)?;
        Ok(())
    }

    /// Key currently in flight, if any
    pub fn in_flight(&self) -> Option<KeyEvent> {
        match &self.state {
            ProcessorState::Processing(in_flight) => Some(in_flight.event()),
            ProcessorState::Idle => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ProcessorState::Processing(_))
    }

    /// When the in-flight key is due to commit
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            ProcessorState::Processing(in_flight) => Some(in_flight.deadline()),
            ProcessorState::Idle => None,
        }
    }

    /// Advance the state machine to `now`.
    ///
    /// Starts the queue head when idle and commits the in-flight key once its
    /// timer is due. After each commit the processor goes idle and
    /// immediately picks up the next head, starting its timer at the instant
    /// the previous one fired. A late poll therefore commits every key whose
    /// deadline has already passed, in order.
    pub fn poll(&mut self, queue: &mut KeyQueue, text: &mut String, now: Instant) -> Vec<Commit> {
        let mut commits = Vec::new();
        let mut resume_at: Option<Instant> = None;

        loop {
            match std::mem::take(&mut self.state) {
                ProcessorState::Idle => {
                    let Some(head) = queue.head() else {
                        break;
                    };
                    let started = resume_at
                        .map(|fired| fired.max(head.submitted_at))
                        .unwrap_or(now);
                    log::debug!(
                        "processing {} (delay {}ms, {} queued)",
                        head.event,
                        self.delay.as_millis(),
                        queue.len()
                    );
                    self.state = ProcessorState::Processing(InFlight {
                        event: head.event,
                        timer: CommitTimer::start(started, self.delay),
                    });
                }
                ProcessorState::Processing(in_flight) => {
                    if !in_flight.timer.is_due(now) {
                        self.state = ProcessorState::Processing(in_flight);
                        break;
                    }

                    let InFlight { event, timer } = in_flight;
                    let fired_at = timer.fire();
                    resume_at = Some(fired_at);

                    let Some(head) = queue.pop_head() else {
                        log::error!("queue emptied while {} was in flight", event);
                        continue;
                    };
                    debug_assert_eq!(head.event, event, "queue head changed while in flight");

                    event.apply_to(text);
                    let latency = fired_at.saturating_duration_since(head.submitted_at);
                    log::debug!("committed {} after {}ms", event, latency.as_millis());
                    commits.push(Commit {
                        event,
                        committed_at: fired_at,
                        latency,
                    });
                }
            }
        }

        commits
    }

    /// Abandon the in-flight key without committing it.
    ///
    /// Cancels the pending timer and returns the discarded key. This is the
    /// only way a key leaves the in-flight state other than being committed.
    pub fn cancel(&mut self) -> Option<KeyEvent> {
        match std::mem::take(&mut self.state) {
            ProcessorState::Processing(InFlight { event, timer }) => {
                timer.cancel();
                Some(event)
            }
            ProcessorState::Idle => None,
        }
    }
}

impl Default for DelayedProcessor {
    fn default() -> Self {
        Self {
            state: ProcessorState::Idle,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup(keys: &[KeyEvent], t0: Instant) -> (DelayedProcessor, KeyQueue, String) {
        let mut queue = KeyQueue::new();
        for &key in keys {
            queue.push(key, t0);
        }
        (DelayedProcessor::new(100).unwrap(), queue, String::new())
    }

    #[test]
    fn validate_delay_bounds() {
        assert!(validate_delay(MIN_DELAY_MS).is_ok());
        assert!(validate_delay(MAX_DELAY_MS).is_ok());
        assert!(validate_delay(49).is_err());
        assert!(validate_delay(1001).is_err());
        assert!(validate_delay(0).is_err());
    }

    #[test]
    fn idle_with_empty_queue_stays_idle() {
        let t0 = Instant::now();
        let (mut proc, mut queue, mut text) = setup(&[], t0);

        assert!(proc.poll(&mut queue, &mut text, t0).is_empty());
        assert_eq!(proc.state(), &ProcessorState::Idle);
        assert!(proc.next_deadline().is_none());
    }

    #[test]
    fn poll_starts_head_immediately() {
        let t0 = Instant::now();
        let (mut proc, mut queue, mut text) = setup(&[KeyEvent::Char('a')], t0);

        proc.poll(&mut queue, &mut text, t0);

        assert!(proc.is_busy());
        assert_eq!(proc.in_flight(), Some(KeyEvent::Char('a')));
        assert_eq!(proc.next_deadline(), Some(t0 + ms(100)));
        assert_eq!(queue.len(), 1);
        assert_eq!(text, "");
    }

    #[test]
    fn commit_happens_at_deadline_not_before() {
        let t0 = Instant::now();
        let (mut proc, mut queue, mut text) = setup(&[KeyEvent::Char('a')], t0);
        proc.poll(&mut queue, &mut text, t0);

        assert!(proc.poll(&mut queue, &mut text, t0 + ms(99)).is_empty());
        assert_eq!(text, "");

        let commits = proc.poll(&mut queue, &mut text, t0 + ms(100));
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].latency, ms(100));
        assert_eq!(text, "a");
        assert!(queue.is_empty());
        assert!(!proc.is_busy());
    }

    #[test]
    fn next_key_starts_where_previous_fired() {
        let t0 = Instant::now();
        let (mut proc, mut queue, mut text) =
            setup(&[KeyEvent::Char('a'), KeyEvent::Char('b')], t0);
        proc.poll(&mut queue, &mut text, t0);

        proc.poll(&mut queue, &mut text, t0 + ms(130));
        assert_eq!(text, "a");
        assert_eq!(proc.in_flight(), Some(KeyEvent::Char('b')));
        assert_eq!(proc.next_deadline(), Some(t0 + ms(200)));
    }

    #[test]
    fn late_poll_catches_up_in_order() {
        let t0 = Instant::now();
        let keys = [KeyEvent::Char('H'), KeyEvent::Char('i'), KeyEvent::Backspace];
        let (mut proc, mut queue, mut text) = setup(&keys, t0);
        proc.poll(&mut queue, &mut text, t0);

        let commits = proc.poll(&mut queue, &mut text, t0 + ms(1000));
        let events: Vec<KeyEvent> = commits.iter().map(|c| c.event).collect();
        assert_eq!(events, keys);
        assert_eq!(text, "H");
        assert_eq!(commits[2].committed_at, t0 + ms(300));
    }

    #[test]
    fn delay_change_applies_to_next_key_only() {
        let t0 = Instant::now();
        let (mut proc, mut queue, mut text) =
            setup(&[KeyEvent::Char('a'), KeyEvent::Char('b')], t0);
        proc.poll(&mut queue, &mut text, t0);

        proc.set_delay(500).unwrap();
        assert_eq!(proc.next_deadline(), Some(t0 + ms(100)));

        proc.poll(&mut queue, &mut text, t0 + ms(100));
        assert_eq!(proc.next_deadline(), Some(t0 + ms(600)));
    }

    #[test]
    fn set_delay_rejects_out_of_range() {
        let mut proc = DelayedProcessor::default();
        assert!(proc.set_delay(10).is_err());
        assert_eq!(proc.delay_ms(), DEFAULT_DELAY_MS);
    }

    #[test]
    fn cancel_discards_in_flight_key() {
        let t0 = Instant::now();
        let (mut proc, mut queue, mut text) = setup(&[KeyEvent::Char('a')], t0);
        proc.poll(&mut queue, &mut text, t0);

        assert_eq!(proc.cancel(), Some(KeyEvent::Char('a')));
        assert!(!proc.is_busy());
        assert_eq!(proc.cancel(), None);
        assert_eq!(text, "");
    }
}
