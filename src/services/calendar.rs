use chrono::Duration;
use url::form_urlencoded;

use crate::{models::event::TruckEvent, services::dates};

/// Events without a time default to an 11:00 start.
const DEFAULT_START_TIME: &str = "11:00 AM";

/// Every calendar entry gets a fixed 2-hour duration.
const EVENT_DURATION_HOURS: i64 = 2;

/// Build a Google Calendar "add event" URL for a truck event. Pure
/// formatting — opening the link belongs to the caller.
pub fn generate_calendar_url(event: &TruckEvent, site_name: &str) -> String {
    let start = dates::apply_time_to_date(
        event.date,
        event.time.as_deref().unwrap_or(DEFAULT_START_TIME),
    );
    let end = start + Duration::hours(EVENT_DURATION_HOURS);

    let date_range = format!(
        "{}/{}",
        dates::format_for_calendar(start),
        dates::format_for_calendar(end)
    );
    let text = format!("{} @ {}", event.title, site_name);
    let default_details = format!("Visit us at {site_name}!");
    let details = event.description.as_deref().unwrap_or(&default_details);

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &text)
        .append_pair("dates", &date_range)
        .append_pair("details", details)
        .append_pair("location", &event.location)
        .finish();

    format!("https://www.google.com/calendar/render?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, Utc};
    use uuid::Uuid;

    fn taco_tuesday(time: Option<&str>) -> TruckEvent {
        TruckEvent {
            id: Uuid::new_v4(),
            title: "Taco Tuesday".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            time: time.map(String::from),
            location: "123 Main St".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dates_param(url: &str) -> (NaiveDateTime, NaiveDateTime) {
        let query = url.split_once('?').unwrap().1;
        let dates = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("dates="))
            .unwrap();
        let decoded = dates.replace("%2F", "/");
        let (start, end) = decoded.split_once('/').unwrap();
        let parse =
            |s: &str| NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ").unwrap();
        (parse(start), parse(end))
    }

    #[test]
    fn test_two_hour_span_from_event_time() {
        let url = generate_calendar_url(&taco_tuesday(Some("11:00 AM")), "Crown Majestic Kitchen");
        let (start, end) = dates_param(&url);
        assert_eq!(end - start, chrono::Duration::hours(2));

        // 11:00 local on the event date, expressed in UTC
        let expected =
            dates::format_for_calendar(dates::apply_time_to_date(taco_tuesday(None).date, "11:00 AM"));
        assert_eq!(start, NaiveDateTime::parse_from_str(&expected, "%Y%m%dT%H%M%SZ").unwrap());
    }

    #[test]
    fn test_missing_time_defaults_to_eleven() {
        let with_default = generate_calendar_url(&taco_tuesday(None), "Crown Majestic Kitchen");
        let explicit = generate_calendar_url(&taco_tuesday(Some("11:00 AM")), "Crown Majestic Kitchen");
        assert_eq!(dates_param(&with_default), dates_param(&explicit));
    }

    #[test]
    fn test_fields_url_encoded() {
        let url = generate_calendar_url(&taco_tuesday(Some("11:00 AM")), "Crown Majestic Kitchen");
        assert!(url.starts_with("https://www.google.com/calendar/render?action=TEMPLATE"));
        assert!(url.contains("text=Taco+Tuesday+%40+Crown+Majestic+Kitchen"));
        assert!(url.contains("location=123+Main+St"));
    }
}
