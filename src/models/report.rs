use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one brute-force detection pass over a batch of events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BruteForceReport {
    /// Events handed to the detector in this batch.
    pub total_lines: usize,
    /// Events that carried a failed-login username or source IP.
    pub failed_login_count: usize,
    /// Source key -> stats for every source that tripped the window test.
    pub offenders: BTreeMap<String, OffenderStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffenderStats {
    /// All failed attempts from this source, not just the triggering window.
    pub count: usize,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
}

impl BruteForceReport {
    /// Report for an empty batch.
    pub fn empty() -> Self {
        BruteForceReport {
            total_lines: 0,
            failed_login_count: 0,
            offenders: BTreeMap::new(),
        }
    }

    pub fn has_offenders(&self) -> bool {
        !self.offenders.is_empty()
    }
}
