//! Session report and export functionality

use crate::keyboard::{SessionStats, SlowKeyboard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Complete session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// State of the keyboard when the report was taken
    pub summary: SessionSummary,
    /// Running counters
    pub stats: SessionStats,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Session duration in seconds
    pub duration_secs: f64,
}

/// Keyboard state at report time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Per-key delay in effect
    pub delay_ms: u64,
    /// Characters in the committed text
    pub text_chars: usize,
    /// Keys still waiting
    pub pending_keys: usize,
    /// "BUSY" or "READY"
    pub status: String,
    /// Average submission-to-commit time
    pub avg_latency_ms: Option<f64>,
}

impl SessionReport {
    /// Create a new session report
    pub fn new(start_time: Instant, keyboard: &SlowKeyboard) -> Self {
        let now: DateTime<Utc> = Utc::now();
        let stats = keyboard.stats().clone();

        Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                duration_secs: start_time.elapsed().as_secs_f64(),
            },
            summary: SessionSummary {
                delay_ms: keyboard.delay_ms(),
                text_chars: keyboard.committed_text().chars().count(),
                pending_keys: keyboard.pending_len(),
                status: keyboard.status().label().to_string(),
                avg_latency_ms: stats.avg_latency_ms(),
            },
            stats,
        }
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
