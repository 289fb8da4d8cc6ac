use chrono::NaiveDateTime;

/// A single parsed auth.log record.
///
/// `username` and `ip_address` come from one failed-login sub-match on the
/// message, so they are either both set or both unset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginEvent {
    pub timestamp: NaiveDateTime,
    pub hostname: String,
    pub process: String,
    /// Bracketed PID from the line, or 0 when the line carries none.
    pub pid: u32,
    pub message: String,
    /// Original trimmed line, kept for traceability.
    pub raw_line: String,
    pub username: Option<String>,
    pub ip_address: Option<String>,
}

impl LoginEvent {
    /// True when the line recorded a failed login with an extractable source.
    pub fn is_failed_attempt(&self) -> bool {
        self.username.is_some() || self.ip_address.is_some()
    }
}
