//! Core data structure for representing one extracted log line.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A structured record extracted from one nginx combined-format log line.
///
/// Every field is optional: `None` means the governing pattern found no
/// match in the line, while `Some(String::new())` means the pattern
/// matched an empty value. The two are kept distinct so callers can
/// tell "not matched" apart from "matched and empty"; no field is ever
/// defaulted to a sentinel.
///
/// A record is created fresh per input line, populated field-by-field by
/// independent extraction steps, and handed to the caller as a plain
/// value; nothing is shared between records.
///
/// # Example
///
/// ```rust
/// use nxcomb::LogRecord;
///
/// let record = LogRecord::new();
/// assert!(record.ip.is_none());
/// assert!(!record.is_fully_populated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogRecord {
    /// First IP literal found in the line.
    pub ip: Option<String>,
    /// Access time, normalized to `YYYY-MM-DD HH:MM:SS` (24h, no zone).
    pub timestamp: Option<String>,
    /// HTTP method token from the request line.
    pub method: Option<String>,
    /// Request-target token from the request line.
    pub path: Option<String>,
    /// HTTP status code, kept as text.
    pub status: Option<String>,
    /// Response time token, kept as text.
    pub response_time_ms: Option<String>,
    /// Raw user-agent string, quotes stripped.
    pub user_agent: Option<String>,
}

impl LogRecord {
    /// Create a new record with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether all seven fields were extracted.
    ///
    /// A well-formed combined-format line yields a fully populated
    /// record; anything less means at least one pattern missed.
    pub fn is_fully_populated(&self) -> bool {
        self.ip.is_some()
            && self.timestamp.is_some()
            && self.method.is_some()
            && self.path.is_some()
            && self.status.is_some()
            && self.response_time_ms.is_some()
            && self.user_agent.is_some()
    }
}
