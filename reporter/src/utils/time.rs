//! Time precision and duration conversion helpers

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp precision for push-backend points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePrecision {
    Nanoseconds,
    Microseconds,
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimePrecision {
    /// Wire form used in backend write requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nanoseconds => "n",
            Self::Microseconds => "u",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
        }
    }

    /// Convert an instant to an integer timestamp at this precision
    pub fn timestamp(&self, at: DateTime<Utc>) -> i64 {
        match self {
            // Nanosecond range overflows i64 past 2262; fall back to
            // millisecond-derived nanos for out-of-range instants.
            Self::Nanoseconds => at
                .timestamp_nanos_opt()
                .unwrap_or_else(|| at.timestamp_millis().saturating_mul(1_000_000)),
            Self::Microseconds => at.timestamp_micros(),
            Self::Milliseconds => at.timestamp_millis(),
            Self::Seconds => at.timestamp(),
            Self::Minutes => at.timestamp() / 60,
            Self::Hours => at.timestamp() / 3600,
        }
    }
}

impl fmt::Display for TimePrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a duration to whole milliseconds, saturated to `i32::MAX`.
///
/// Timeout plumbing downstream is 32-bit; values exceeding the range clamp
/// to the maximum representable instead of wrapping negative.
pub fn saturated_millis(d: Duration) -> i32 {
    d.as_millis().min(i32::MAX as u128) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_saturated_millis_in_range() {
        assert_eq!(saturated_millis(Duration::from_secs(5)), 5_000);
        assert_eq!(saturated_millis(Duration::from_millis(0)), 0);
    }

    #[test]
    fn test_saturated_millis_clamps_at_i32_max() {
        // 3,000,000,000 ms does not fit in i32; must clamp, not wrap negative
        let d = Duration::from_millis(3_000_000_000);
        assert_eq!(saturated_millis(d), i32::MAX);
    }

    #[test]
    fn test_saturated_millis_exact_boundary() {
        assert_eq!(saturated_millis(Duration::from_millis(i32::MAX as u64)), i32::MAX);
        assert_eq!(
            saturated_millis(Duration::from_millis(i32::MAX as u64 + 1)),
            i32::MAX
        );
    }

    #[test]
    fn test_timestamp_precision() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(TimePrecision::Seconds.timestamp(at), 1_704_067_200);
        assert_eq!(TimePrecision::Milliseconds.timestamp(at), 1_704_067_200_000);
        assert_eq!(TimePrecision::Minutes.timestamp(at), 1_704_067_200 / 60);
        assert_eq!(
            TimePrecision::Nanoseconds.timestamp(at),
            1_704_067_200_000_000_000
        );
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(TimePrecision::Milliseconds.as_str(), "ms");
        assert_eq!(TimePrecision::Nanoseconds.to_string(), "n");
    }
}
