//! Sliding-window brute force detection.
//!
//! Groups failed login attempts by source identity and flags sources that
//! reach the attempt threshold inside a bounded time window.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{BruteForceReport, LoginEvent, OffenderStats};

/// Errors from invalid detector parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("window must be at least 1 minute, got {0}")]
    InvalidWindow(i64),

    #[error("threshold must be at least 1 attempt, got {0}")]
    InvalidThreshold(usize),
}

/// Flags sources whose failed login attempts cluster inside a time window.
///
/// The detector is a pure function over its input batch: it reads the
/// events, never mutates them, and allocates a fresh report per call.
pub struct BruteForceDetector {
    /// Window length in minutes
    window_minutes: i64,
    /// Attempts within the window required to flag a source
    threshold: usize,
}

impl BruteForceDetector {
    pub const DEFAULT_WINDOW_MINUTES: i64 = 5;
    pub const DEFAULT_THRESHOLD: usize = 5;

    /// Detector with the default 5-attempts-in-5-minutes rule.
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_WINDOW_MINUTES, Self::DEFAULT_THRESHOLD)
    }

    /// Detector with custom window and threshold.
    pub fn with_config(window_minutes: i64, threshold: usize) -> Self {
        BruteForceDetector {
            window_minutes,
            threshold,
        }
    }

    /// Run detection over one ordered batch of events.
    ///
    /// Events without a failed-login source count toward `total_lines` but
    /// never toward grouping. Rejects a non-positive window or threshold
    /// instead of producing a trivially empty report.
    pub fn detect(&self, events: &[LoginEvent]) -> Result<BruteForceReport, DetectionError> {
        if self.window_minutes < 1 {
            return Err(DetectionError::InvalidWindow(self.window_minutes));
        }
        if self.threshold < 1 {
            return Err(DetectionError::InvalidThreshold(self.threshold));
        }

        let failed: Vec<&LoginEvent> = events.iter().filter(|e| e.is_failed_attempt()).collect();

        let mut report = BruteForceReport::empty();
        report.total_lines = events.len();
        report.failed_login_count = failed.len();

        // Append-only grouping in one pass, then one sort per group.
        let mut grouped: HashMap<&str, Vec<&LoginEvent>> = HashMap::new();
        for event in failed {
            grouped.entry(source_key(event)).or_default().push(event);
        }

        let window_seconds = self.window_minutes * 60;

        for (key, mut group) in grouped {
            // A group below the threshold can never trip the window test.
            if group.len() < self.threshold {
                continue;
            }

            // Stable sort: same-timestamp events keep their input order.
            group.sort_by_key(|e| e.timestamp);

            if self.has_dense_window(&group, window_seconds) {
                // Stats cover the whole group, not just the triggering
                // window, so a flagged source shows its full activity span.
                report.offenders.insert(
                    key.to_string(),
                    OffenderStats {
                        count: group.len(),
                        first_seen: group[0].timestamp,
                        last_seen: group[group.len() - 1].timestamp,
                    },
                );
            }
        }

        Ok(report)
    }

    /// Two-pointer scan over a timestamp-sorted group. True as soon as any
    /// window of `window_seconds` holds at least `threshold` events. Events
    /// exactly `window_seconds` apart are inside the window.
    fn has_dense_window(&self, sorted: &[&LoginEvent], window_seconds: i64) -> bool {
        let mut i = 0;
        for j in 0..sorted.len() {
            while (sorted[j].timestamp - sorted[i].timestamp).num_seconds() > window_seconds {
                i += 1;
            }
            if j - i + 1 >= self.threshold {
                return true;
            }
        }
        false
    }
}

impl Default for BruteForceDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Grouping identity: IP first, then username, then a fallback for events
/// that matched the failed-login pattern only partially.
fn source_key(event: &LoginEvent) -> &str {
    event
        .ip_address
        .as_deref()
        .or(event.username.as_deref())
        .unwrap_or("unknown")
}
