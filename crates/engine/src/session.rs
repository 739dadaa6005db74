use chrono::{DateTime, Timelike, Utc};

/// Trading-session tag for a timestamp, by UTC hour.
///
/// Coarse fixed-offset approximation of the session clocks (no DST
/// handling); the tag is informational metadata on the signal, not a filter.
pub fn session_tag(timestamp: DateTime<Utc>) -> &'static str {
    match timestamp.hour() {
        0..=6 => "tokyo",
        7..=12 => "london",
        13..=20 => "newyork",
        _ => "sydney",
    }
}
