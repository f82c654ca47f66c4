//! Time formatting and due date helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format a duration in seconds as `1h 2m 3s`, `2m 3s`, or `3s`.
pub fn format_time_taken(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Whole days, hours, and minutes until a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub expired: bool,
}

/// Time left until `due`. All components are zero once it has passed.
pub fn time_remaining(due: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let left = due - now;
    if left.num_milliseconds() <= 0 {
        return TimeRemaining {
            days: 0,
            hours: 0,
            minutes: 0,
            expired: true,
        };
    }

    TimeRemaining {
        days: left.num_days(),
        hours: left.num_hours() % 24,
        minutes: left.num_minutes() % 60,
        expired: false,
    }
}

/// Human readable time remaining, or `Overdue`.
pub fn format_time_remaining(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let left = time_remaining(due, now);
    if left.expired {
        "Overdue".to_string()
    } else if left.days > 7 {
        format!("{} days", left.days)
    } else if left.days > 0 {
        format!("{}d {}h", left.days, left.hours)
    } else if left.hours > 0 {
        format!("{}h {}m", left.hours, left.minutes)
    } else {
        format!("{}m", left.minutes)
    }
}

pub fn is_overdue(due: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > due
}
