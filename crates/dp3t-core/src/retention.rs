//! Retention window arithmetic.

use serde::{Deserialize, Serialize};

use crate::time::{now_millis, UnixMillis, MILLIS_PER_DAY};

/// Number of days exposure data is kept by default.
pub const DEFAULT_RETENTION_DAYS: u32 = 21;

/// How long exposure days are kept before they are eligible for deletion.
///
/// The window is never persisted; the cutoff is recomputed against the wall
/// clock every time a sweep runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    days: u32,
}

impl RetentionPolicy {
    /// Create a policy keeping data for the given number of days.
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    /// The configured window length in days.
    pub const fn days(self) -> u32 {
        self.days
    }

    /// The cutoff relative to an explicit "now".
    ///
    /// Records strictly older than the returned timestamp are expired.
    pub fn cutoff_from(self, now: UnixMillis) -> UnixMillis {
        now - self.days as i64 * MILLIS_PER_DAY
    }

    /// The cutoff relative to the wall clock.
    pub fn cutoff(self) -> UnixMillis {
        self.cutoff_from(now_millis())
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_DAYS)
    }
}
