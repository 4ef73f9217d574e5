//! Wall-clock helper.
//!
//! Engine operations take explicit epoch-millisecond timestamps so tests can
//! drive time deterministically; live callers use [`now_ms`].

use chrono::Utc;

/// Current time as milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}
