/*!
 Contains date constants and conversions for Apple's reference date.
*/

use chrono::{DateTime, Utc};

/// Seconds between the Unix epoch and `2001-01-01T00:00:00Z`, the reference date Foundation archives against
pub const APPLE_EPOCH_OFFSET: i64 = 978_307_200;

/// Convert seconds since the Apple reference date into a UTC timestamp
///
/// Returns [`None`] if the value is not finite or falls outside of the range [`DateTime`] can represent.
pub fn from_apple_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
    let unix = (whole as i64).checked_add(APPLE_EPOCH_OFFSET)?;
    // Rounding can carry a full second into the nanosecond field
    if nanos >= 1_000_000_000 {
        return DateTime::from_timestamp(unix.checked_add(1)?, 0);
    }
    DateTime::from_timestamp(unix, nanos)
}
