//! Session counters and commit latency statistics

use super::Commit;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Running totals for a typing session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Keys accepted into the queue
    pub submitted: u64,
    /// Keys committed to the text
    pub committed: u64,
    /// Keys dropped unapplied by a clear
    pub discarded: u64,
    /// Submissions rejected as invalid
    pub rejected: u64,
    /// Number of clears
    pub clears: u64,
    /// Fastest submission-to-commit time (ms)
    pub min_latency_ms: Option<u64>,
    /// Slowest submission-to-commit time (ms)
    pub max_latency_ms: Option<u64>,
    /// Sum of all latencies (ms), for averaging
    pub total_latency_ms: u64,
}

impl SessionStats {
    pub fn record_commit(&mut self, commit: &Commit) {
        self.committed += 1;
        let latency_ms = duration_ms(commit.latency);
        self.total_latency_ms += latency_ms;
        self.min_latency_ms = Some(self.min_latency_ms.map(|m| m.min(latency_ms)).unwrap_or(latency_ms));
        self.max_latency_ms = Some(self.max_latency_ms.map(|m| m.max(latency_ms)).unwrap_or(latency_ms));
    }

    /// Average submission-to-commit time in milliseconds
    pub fn avg_latency_ms(&self) -> Option<f64> {
        if self.committed == 0 {
            return None;
        }
        Some(self.total_latency_ms as f64 / self.committed as f64)
    }
}

fn duration_ms(d: Duration) -> u64 {
    d.as_millis().min(u64::MAX as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyEvent;
    use std::time::Instant;

    fn commit(latency_ms: u64) -> Commit {
        Commit {
            event: KeyEvent::Char('a'),
            committed_at: Instant::now(),
            latency: Duration::from_millis(latency_ms),
        }
    }

    #[test]
    fn empty_stats_have_no_average() {
        let stats = SessionStats::default();
        assert_eq!(stats.avg_latency_ms(), None);
        assert_eq!(stats.min_latency_ms, None);
    }

    #[test]
    fn latency_min_max_avg() {
        let mut stats = SessionStats::default();
        for latency in [200, 400, 300] {
            stats.record_commit(&commit(latency));
        }

        assert_eq!(stats.committed, 3);
        assert_eq!(stats.min_latency_ms, Some(200));
        assert_eq!(stats.max_latency_ms, Some(400));
        assert_eq!(stats.avg_latency_ms(), Some(300.0));
    }
}
