//! Record types stored by the tracing database.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::UnixMillis;

/// One matched exposure day.
///
/// A row is written whenever the matching engine determines the user was
/// near a reported case on a given day. `exposed_at` is the start of that
/// day; `reported_at` is when the match was computed locally. Rows expire
/// once `exposed_at` falls behind the retention cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureDay {
    /// Row identifier assigned by the store.
    pub id: i64,
    /// The day the exposure happened (Unix ms).
    pub exposed_at: UnixMillis,
    /// When the match was computed (Unix ms).
    pub reported_at: UnixMillis,
}

/// Severity of a diagnostic log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Convert to u8 for storage.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from u8.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// A diagnostic log record, present only when the log store is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Row identifier assigned by the store.
    pub id: i64,
    /// When the entry was recorded (Unix ms).
    pub logged_at: UnixMillis,
    /// Entry severity.
    pub level: LogLevel,
    /// Free-form message from the tracing subsystem.
    pub message: String,
}
