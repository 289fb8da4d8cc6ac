//! Syslog-style auth.log line parsing.
//!
//! Turns one raw text line into at most one [`LoginEvent`]. Lines that do
//! not match the structural grammar are skipped silently; auth logs
//! routinely interleave unrelated formats. Callers decide whether skipped
//! lines are worth logging.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::models::LoginEvent;

/// Syslog header: "Mon DD HH:MM:SS hostname process[PID]: message".
/// The bracketed PID is optional.
static BASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<month>[A-Z][a-z]{2})\s+(?P<day>\d{1,2})\s+(?P<time>\d{2}:\d{2}:\d{2})\s+(?P<hostname>\S+)\s+(?P<process>\S+?)(?:\[(?P<pid>\d+)\])?:\s+(?P<message>.*)$",
    )
    .expect("regex")
});

/// "Failed password for <user> from <ip>"
static FAILED_LOGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Failed password for (?P<username>\S+) from (?P<ip>\d+\.\d+\.\d+\.\d+)")
        .expect("regex")
});

/// Parses auth.log lines into structured [`LoginEvent`]s.
///
/// The syslog timestamp carries no year, so the parser holds a reference
/// year and stamps it onto every line it parses.
pub struct LineParser {
    year: i32,
}

impl LineParser {
    /// Parser stamped with the current wall-clock year.
    ///
    /// The year is captured once here and applied to the whole batch. A log
    /// spanning a December to January boundary will be misdated by this
    /// policy; use [`LineParser::with_year`] when the log's year is known.
    pub fn new() -> Self {
        Self::with_year(Local::now().year())
    }

    /// Parser with an explicit reference year. Parsing is then fully
    /// deterministic.
    pub fn with_year(year: i32) -> Self {
        LineParser { year }
    }

    /// Parse one line into a structured event.
    ///
    /// Returns `None` for blank lines, lines that do not match the
    /// structural grammar, and lines whose month/day/time is impossible
    /// for the reference year (e.g. "Feb 30"). A line without a bracketed
    /// PID still parses; its `pid` field is 0.
    pub fn parse_line(&self, line: &str) -> Option<LoginEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let caps = BASE_PATTERN.captures(line)?;

        let month = month_number(&caps["month"])?;
        let day: u32 = caps["day"].parse().ok()?;
        let timestamp = build_timestamp(self.year, month, day, &caps["time"])?;

        let pid = match caps.name("pid") {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };

        let message = caps["message"].to_string();

        // Username and IP are extracted from one sub-match, so they are
        // populated together or not at all.
        let (username, ip_address) = match FAILED_LOGIN_PATTERN.captures(&message) {
            Some(sub) => (
                Some(sub["username"].to_string()),
                Some(sub["ip"].to_string()),
            ),
            None => (None, None),
        };

        Some(LoginEvent {
            timestamp,
            hostname: caps["hostname"].to_string(),
            process: caps["process"].to_string(),
            pid,
            message,
            raw_line: line.to_string(),
            username,
            ip_address,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// English month abbreviations only; the log format is locale-fixed.
fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn build_timestamp(year: i32, month: u32, day: u32, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S").ok()?;
    Some(date.and_time(time))
}
