//! Slow keyboard: queue controller plus observable state
//!
//! [`SlowKeyboard`] owns the key queue, the committed text and the delayed
//! processor. Presentation code drives it with [`SlowKeyboard::submit`],
//! [`SlowKeyboard::clear`] and [`SlowKeyboard::set_delay`], calls
//! [`SlowKeyboard::tick`] from its event loop, and reads state back through
//! the observable accessors or a [`KeyboardSnapshot`].

use super::error::Result;
use super::processor::{
    validate_delay, DelayedProcessor, DELAY_STEP_MS, MAX_DELAY_MS, MIN_DELAY_MS,
};
use super::{Commit, KeyEvent, KeyQueue, SessionStats};
use std::time::Instant;

/// Busy/ready status derived from the processor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardStatus {
    Ready,
    Busy,
}

impl KeyboardStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Busy => "BUSY",
        }
    }
}

/// Read-only copy of everything an observer can see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    pub committed_text: String,
    /// Pending keys in order; the first one is in flight while busy
    pub pending: Vec<KeyEvent>,
    pub processing: Option<KeyEvent>,
    pub status: KeyboardStatus,
    pub delay_ms: u64,
}

/// Keyboard that commits one queued key at a time after a delay
#[derive(Debug)]
pub struct SlowKeyboard {
    queue: KeyQueue,
    text: String,
    processor: DelayedProcessor,
    stats: SessionStats,
}

impl SlowKeyboard {
    /// Create an empty keyboard with the given per-key delay
    pub fn new(delay_ms: u64) -> Result<Self> {
        Ok(Self {
            queue: KeyQueue::new(),
            text: String::new(),
            processor: DelayedProcessor::new(delay_ms)?,
            stats: SessionStats::default(),
        })
    }

    /// Queue a key, starting it right away if the processor is idle
    pub fn submit(&mut self, event: KeyEvent) -> Result<()> {
        self.submit_at(event, Instant::now())
    }

    /// Queue a key submitted at `now`
    pub fn submit_at(&mut self, event: KeyEvent, now: Instant) -> Result<()> {
        if let Err(e) = event.validate() {
            self.reject(&e);
            return Err(e);
        }
        self.tick_at(now);
        self.queue.push(event, now);
        self.stats.submitted += 1;
        self.tick_at(now);
        Ok(())
    }

    /// Parse a key token (`"A"`, `"Space"`, `"Enter"`, `"Backspace"`) and queue it
    pub fn submit_token(&mut self, token: &str) -> Result<()> {
        match KeyEvent::parse(token) {
            Ok(event) => self.submit(event),
            Err(e) => {
                self.reject(&e);
                Err(e)
            }
        }
    }

    /// Queue one key per character of `text`.
    ///
    /// Spaces become `Space` and newlines `Enter`. The whole string is
    /// checked first; if any character is rejected nothing is queued.
    pub fn submit_text(&mut self, text: &str) -> Result<()> {
        self.submit_text_at(text, Instant::now())
    }

    pub fn submit_text_at(&mut self, text: &str, now: Instant) -> Result<()> {
        let events = match text.chars().map(KeyEvent::from_char).collect::<Result<Vec<_>>>() {
            Ok(events) => events,
            Err(e) => {
                self.reject(&e);
                return Err(e);
            }
        };

        self.tick_at(now);
        for event in events {
            self.queue.push(event, now);
            self.stats.submitted += 1;
        }
        self.tick_at(now);
        Ok(())
    }

    /// Drop every pending key, cancel the one in flight and empty the text
    pub fn clear(&mut self) {
        let cancelled = self.processor.cancel();
        let discarded = self.queue.clear();
        self.text.clear();

        self.stats.discarded += discarded as u64;
        self.stats.clears += 1;
        if let Some(event) = cancelled {
            log::info!("cleared: cancelled {} and discarded {} queued key(s)", event, discarded);
        } else {
            log::info!("cleared: discarded {} queued key(s)", discarded);
        }
    }

    /// Set the per-key delay, effective from the next key that starts
    pub fn set_delay(&mut self, delay_ms: u64) -> Result<()> {
        self.set_delay_at(delay_ms, Instant::now())
    }

    /// Set the per-key delay at `now`.
    ///
    /// Overdue commits are applied first so that a key whose predecessor
    /// already fired keeps the delay it started under.
    pub fn set_delay_at(&mut self, delay_ms: u64, now: Instant) -> Result<()> {
        if let Err(e) = validate_delay(delay_ms) {
            log::warn!("{}", e);
            return Err(e);
        }
        self.tick_at(now);
        self.processor.set_delay(delay_ms)?;
        log::info!("delay set to {}ms", delay_ms);
        Ok(())
    }

    /// Move the delay by `steps` increments of `DELAY_STEP_MS`, clamped to range
    pub fn step_delay(&mut self, steps: i64) -> u64 {
        self.step_delay_at(steps, Instant::now())
    }

    pub fn step_delay_at(&mut self, steps: i64, now: Instant) -> u64 {
        let current = self.processor.delay_ms() as i64;
        let target = current
            .saturating_add(steps.saturating_mul(DELAY_STEP_MS as i64))
            .clamp(MIN_DELAY_MS as i64, MAX_DELAY_MS as i64) as u64;
        if target != self.processor.delay_ms() && self.set_delay_at(target, now).is_err() {
            return self.processor.delay_ms();
        }
        target
    }

    /// Advance processing to the current time
    pub fn tick(&mut self) -> Vec<Commit> {
        self.tick_at(Instant::now())
    }

    /// Advance processing to `now`, returning the keys committed on the way
    pub fn tick_at(&mut self, now: Instant) -> Vec<Commit> {
        let commits = self.processor.poll(&mut self.queue, &mut self.text, now);
        for commit in &commits {
            self.stats.record_commit(commit);
        }
        commits
    }

    /// When the next commit is due, for sizing the event loop's poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.processor.next_deadline()
    }

    pub fn committed_text(&self) -> &str {
        &self.text
    }

    pub fn pending_queue(&self) -> Vec<KeyEvent> {
        self.queue.snapshot()
    }

    /// Borrowing view of the pending keys, oldest first
    pub fn pending_keys(&self) -> impl Iterator<Item = KeyEvent> + '_ {
        self.queue.events()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn currently_processing(&self) -> Option<KeyEvent> {
        self.processor.in_flight()
    }

    pub fn is_busy(&self) -> bool {
        self.processor.is_busy()
    }

    pub fn status(&self) -> KeyboardStatus {
        if self.is_busy() {
            KeyboardStatus::Busy
        } else {
            KeyboardStatus::Ready
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.processor.delay_ms()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn snapshot(&self) -> KeyboardSnapshot {
        KeyboardSnapshot {
            committed_text: self.text.clone(),
            pending: self.pending_queue(),
            processing: self.currently_processing(),
            status: self.status(),
            delay_ms: self.delay_ms(),
        }
    }

    fn reject(&mut self, err: &super::KeyboardError) {
        self.stats.rejected += 1;
        log::warn!("rejected submission: {}", err);
    }
}

impl Default for SlowKeyboard {
    fn default() -> Self {
        Self {
            queue: KeyQueue::new(),
            text: String::new(),
            processor: DelayedProcessor::default(),
            stats: SessionStats::default(),
        }
    }
}
