use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Display order for schedule rows and the only accepted `day` values.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One weekly-schedule row, keyed by weekday name. Acts as the fallback
/// location source for days without a one-time event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleEntry {
    pub day: String,
    pub location: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Body item for PUT /schedule (the full week is replaced at once).
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertScheduleEntry {
    pub day: String,
    pub location: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

/// English weekday name matching the `weekly_schedule.day` column.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
