//! FIFO of keys waiting to be committed

use super::KeyEvent;
use std::collections::VecDeque;
use std::time::Instant;

/// A key waiting in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedKey {
    /// The key itself
    pub event: KeyEvent,
    /// When the key was submitted (for commit latency)
    pub submitted_at: Instant,
}

/// Ordered, unbounded queue of pending keys.
///
/// Keys are appended at the tail and only ever leave from the head, or all
/// at once through [`KeyQueue::clear`].
#[derive(Debug, Default)]
pub struct KeyQueue {
    keys: VecDeque<QueuedKey>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: KeyEvent, submitted_at: Instant) {
        self.keys.push_back(QueuedKey {
            event,
            submitted_at,
        });
    }

    /// Oldest key not yet committed
    pub fn head(&self) -> Option<&QueuedKey> {
        self.keys.front()
    }

    pub fn pop_head(&mut self) -> Option<QueuedKey> {
        self.keys.pop_front()
    }

    /// Drop every pending key, returning how many were discarded
    pub fn clear(&mut self) -> usize {
        let discarded = self.keys.len();
        self.keys.clear();
        discarded
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Pending keys in submission order, without copying the queue
    pub fn events(&self) -> impl Iterator<Item = KeyEvent> + '_ {
        self.keys.iter().map(|k| k.event)
    }

    /// Copy of the pending keys in submission order
    pub fn snapshot(&self) -> Vec<KeyEvent> {
        self.events().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_leave_in_arrival_order() {
        let now = Instant::now();
        let mut queue = KeyQueue::new();
        queue.push(KeyEvent::Char('a'), now);
        queue.push(KeyEvent::Space, now);
        queue.push(KeyEvent::Char('b'), now);

        assert_eq!(queue.head().map(|k| k.event), Some(KeyEvent::Char('a')));
        assert_eq!(queue.pop_head().map(|k| k.event), Some(KeyEvent::Char('a')));
        assert_eq!(queue.pop_head().map(|k| k.event), Some(KeyEvent::Space));
        assert_eq!(queue.pop_head().map(|k| k.event), Some(KeyEvent::Char('b')));
        assert!(queue.pop_head().is_none());
    }

    #[test]
    fn clear_reports_discarded_count() {
        let now = Instant::now();
        let mut queue = KeyQueue::new();
        queue.push(KeyEvent::Enter, now);
        queue.push(KeyEvent::Backspace, now);

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);
    }

    #[test]
    fn snapshot_keeps_duplicates() {
        let now = Instant::now();
        let mut queue = KeyQueue::new();
        queue.push(KeyEvent::Char('x'), now);
        queue.push(KeyEvent::Char('x'), now);

        assert_eq!(queue.snapshot(), vec![KeyEvent::Char('x'), KeyEvent::Char('x')]);
        assert_eq!(queue.len(), 2);
    }
}
