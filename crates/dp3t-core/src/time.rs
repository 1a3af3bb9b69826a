//! Wall-clock helpers.
//!
//! All timestamps in the store are Unix milliseconds. Exposure dates are
//! compared against a retention cutoff in the same unit, so no calendar or
//! timezone handling is needed anywhere.

/// A Unix timestamp in milliseconds.
pub type UnixMillis = i64;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Get current time in milliseconds.
pub fn now_millis() -> UnixMillis {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
