use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;

/// Absolute release time, followed by a rough age while it is under 25 hours old.
pub fn format_release(released_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let stamp = released_at.format("%Y/%m/%d %H:%M:%S %z").to_string();
    let elapsed = (now - released_at).num_seconds();
    match elapsed {
        secs if secs <= 0 => stamp,
        secs if secs < MINUTE => format!("{stamp} (~ {secs}s ago)"),
        secs if secs < HOUR => format!("{stamp} (~ {}m ago)", secs / MINUTE),
        secs if secs < 25 * HOUR => format!("{stamp} (~ {}h ago)", secs / HOUR),
        _ => stamp,
    }
}
