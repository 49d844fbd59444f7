use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use super::model::LogFormat;

/// Pipeline counters, updated per line on the hot path.
///
/// Relaxed ordering throughout: counters are advisory and never
/// synchronize other memory.
#[derive(Debug, Default)]
pub struct ParserMetrics {
    /// Complete non-blank lines handed to a grammar parser
    pub lines: AtomicU64,
    /// Blank lines skipped by the pipeline
    pub blank: AtomicU64,
    /// Successfully parsed entries, per format
    pub access_entries: AtomicU64,
    pub playlist_entries: AtomicU64,
    /// Lines that failed their grammar
    pub failures: AtomicU64,
}

impl ParserMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(&self) {
        self.lines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_blank(&self) {
        self.blank.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_entry(&self, format: LogFormat) {
        match format {
            LogFormat::Access => self.access_entries.fetch_add(1, Ordering::Relaxed),
            LogFormat::Playlist => self.playlist_entries.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines: self.lines.load(Ordering::Relaxed),
            blank: self.blank.load(Ordering::Relaxed),
            access_entries: self.access_entries.load(Ordering::Relaxed),
            playlist_entries: self.playlist_entries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters, for logging or JSON export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lines: u64,
    pub blank: u64,
    pub access_entries: u64,
    pub playlist_entries: u64,
    pub failures: u64,
}
