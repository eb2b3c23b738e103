use anyhow::Context;
use chrono::{Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Events within this many days of today (inclusive) count as "this week".
pub const THIS_WEEK_DAYS: i64 = 7;

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date_string(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid calendar date: {s:?}"))
}

/// Today's calendar date in the server's local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Human-readable date for API payloads, e.g. "Tuesday, June 4, 2024".
pub fn format_for_display(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Apply loosely-formatted time text ("11:00 AM", "14:30", "7pm") to a
/// calendar date.
///
/// Parsing is deliberately forgiving: each colon-separated part is reduced
/// to its digits, and AM/PM is detected as a case-insensitive substring
/// anywhere in the text. Hour 12 stays 12 with "pm" and becomes 0 with
/// "am"; other PM hours get +12. There is no range validation — an
/// out-of-range hour or minute rolls over into the following day, and
/// values too large to represent at all fall back to midnight. Garbage
/// text yields a nonsensical clock time, never a panic.
pub fn apply_time_to_date(date: NaiveDate, time: &str) -> NaiveDateTime {
    let mut parts = time.splitn(2, ':');
    let hour = leading_digits(parts.next().unwrap_or(""));
    let minute = parts.next().map(leading_digits).unwrap_or(0);

    let lower = time.to_lowercase();
    let is_pm = lower.contains("pm") && hour != 12;
    let is_am = lower.contains("am") && hour == 12;
    let hour = if is_pm {
        hour + 12
    } else if is_am {
        0
    } else {
        hour
    };

    let midnight = date.and_time(NaiveTime::MIN);
    Duration::try_hours(hour)
        .zip(Duration::try_minutes(minute))
        .and_then(|(hours, minutes)| hours.checked_add(&minutes))
        .and_then(|offset| midnight.checked_add_signed(offset))
        .unwrap_or(midnight)
}

fn leading_digits(part: &str) -> i64 {
    let digits: String = part.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Compact UTC timestamp for calendar URLs: `YYYYMMDDTHHMMSSZ`
/// (an ISO-8601 timestamp with `-`, `:` and sub-seconds stripped).
/// The input is interpreted as server-local wall-clock time.
pub fn format_for_calendar(dt: NaiveDateTime) -> String {
    let utc = match Local.from_local_datetime(&dt) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // Nonexistent wall-clock time (DST gap): treat as already UTC
        LocalResult::None => Utc.from_utc_datetime(&dt),
    };
    utc.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_date_string() {
        let d = parse_date_string("2024-06-04").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
    }

    #[test]
    fn test_parse_date_string_rejects_garbage() {
        assert!(parse_date_string("2024-13-40").is_err());
        assert!(parse_date_string("June 4, 2024").is_err());
        assert!(parse_date_string("").is_err());
    }

    #[test]
    fn test_parse_format_round_trip() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_date_string(&d.format("%Y-%m-%d").to_string()).unwrap(), d);
    }

    #[test]
    fn test_apply_time_am_pm() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

        let t = apply_time_to_date(d, "11:00 AM");
        assert_eq!((t.hour(), t.minute()), (11, 0));

        let t = apply_time_to_date(d, "2:30 PM");
        assert_eq!((t.hour(), t.minute()), (14, 30));

        let t = apply_time_to_date(d, "12:00 PM");
        assert_eq!(t.hour(), 12);

        let t = apply_time_to_date(d, "12:15 am");
        assert_eq!((t.hour(), t.minute()), (0, 15));
    }

    #[test]
    fn test_apply_time_24h_and_bare_hour() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

        let t = apply_time_to_date(d, "14:30");
        assert_eq!((t.hour(), t.minute()), (14, 30));

        let t = apply_time_to_date(d, "7pm");
        assert_eq!(t.hour(), 19);
    }

    #[test]
    fn test_apply_time_out_of_range_rolls_over() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let t = apply_time_to_date(d, "25:00");
        assert_eq!(t.date(), NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert_eq!(t.hour(), 1);
    }

    #[test]
    fn test_apply_time_absurd_digits_fall_back_to_midnight() {
        // Free-text times can carry arbitrarily long digit runs; they must
        // degrade to a (nonsensical) time, never panic.
        let d = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

        let t = apply_time_to_date(d, "99999999999999:00");
        assert_eq!(t, d.and_time(NaiveTime::MIN));

        let t = apply_time_to_date(d, "11:99999999999999");
        assert_eq!(t, d.and_time(NaiveTime::MIN));
    }

    #[test]
    fn test_format_for_calendar_shape() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let s = format_for_calendar(apply_time_to_date(d, "11:00 AM"));
        assert_eq!(s.len(), 16);
        assert!(s.ends_with('Z'));
        assert_eq!(&s[8..9], "T");
        assert!(!s.contains('-') && !s.contains(':'));
    }
}
