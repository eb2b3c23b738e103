use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::event::{
        CategorizedEvent, CreateEventRequest, EventCategory, TruckEvent, UpdateEventRequest,
    },
    services::dates,
};

const EVENT_COLS: &str =
    "id, title, date, time, location, description, created_at, updated_at";

/// Classify a date relative to `today`: inside the inclusive 7-day window
/// starting today → this-week; beyond it → upcoming; anything else → past.
pub fn categorize_date(date: NaiveDate, today: NaiveDate) -> EventCategory {
    let week_end = today + Duration::days(dates::THIS_WEEK_DAYS);
    if date >= today && date <= week_end {
        EventCategory::ThisWeek
    } else if date > week_end {
        EventCategory::Upcoming
    } else {
        EventCategory::Past
    }
}

/// Annotate events with their derived category. Always recomputed from the
/// stored date; a persisted classification would go stale as days pass.
pub fn categorize(events: Vec<TruckEvent>, today: NaiveDate) -> Vec<CategorizedEvent> {
    events
        .into_iter()
        .map(|event| {
            let category = categorize_date(event.date, today);
            let display_date = dates::format_for_display(event.date);
            CategorizedEvent {
                event,
                category,
                display_date,
            }
        })
        .collect()
}

fn in_category(events: &[CategorizedEvent], category: EventCategory) -> Vec<CategorizedEvent> {
    let mut matched: Vec<CategorizedEvent> = events
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect();
    matched.sort_by_key(|e| e.event.date);
    matched
}

/// This-week events, ascending by date.
pub fn this_week_events(events: &[CategorizedEvent]) -> Vec<CategorizedEvent> {
    in_category(events, EventCategory::ThisWeek)
}

/// Events more than a week out, ascending by date.
pub fn upcoming_events(events: &[CategorizedEvent]) -> Vec<CategorizedEvent> {
    in_category(events, EventCategory::Upcoming)
}

/// The earliest this-week event, if any.
pub fn closest_event(events: &[CategorizedEvent]) -> Option<CategorizedEvent> {
    this_week_events(events).into_iter().next()
}

pub struct EventService;

impl EventService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<TruckEvent>> {
        let events = sqlx::query_as::<_, TruckEvent>(&format!(
            "SELECT {EVENT_COLS} FROM events ORDER BY date, created_at"
        ))
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<TruckEvent>> {
        let event = sqlx::query_as::<_, TruckEvent>(&format!(
            "SELECT {EVENT_COLS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(event)
    }

    /// The first event scheduled for the given date, if any.
    pub async fn for_date(pool: &PgPool, date: NaiveDate) -> anyhow::Result<Option<TruckEvent>> {
        let event = sqlx::query_as::<_, TruckEvent>(&format!(
            "SELECT {EVENT_COLS} FROM events WHERE date = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(date)
        .fetch_optional(pool)
        .await?;
        Ok(event)
    }

    pub async fn create(pool: &PgPool, req: &CreateEventRequest) -> anyhow::Result<TruckEvent> {
        let date = dates::parse_date_string(&req.date)?;
        let event = sqlx::query_as::<_, TruckEvent>(&format!(
            "INSERT INTO events (title, date, time, location, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EVENT_COLS}"
        ))
        .bind(&req.title)
        .bind(date)
        .bind(&req.time)
        .bind(&req.location)
        .bind(&req.description)
        .fetch_one(pool)
        .await?;
        Ok(event)
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateEventRequest,
    ) -> anyhow::Result<Option<TruckEvent>> {
        let date = match &req.date {
            Some(s) => Some(dates::parse_date_string(s)?),
            None => None,
        };
        let event = sqlx::query_as::<_, TruckEvent>(&format!(
            "UPDATE events SET
                 title = COALESCE($2, title),
                 date = COALESCE($3, date),
                 time = COALESCE($4, time),
                 location = COALESCE($5, location),
                 description = COALESCE($6, description),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {EVENT_COLS}"
        ))
        .bind(id)
        .bind(&req.title)
        .bind(date)
        .bind(&req.time)
        .bind(&req.location)
        .bind(&req.description)
        .fetch_optional(pool)
        .await?;
        Ok(event)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn event_on(date: NaiveDate, title: &str) -> TruckEvent {
        TruckEvent {
            id: Uuid::new_v4(),
            title: title.to_string(),
            date,
            time: None,
            location: "123 Main St".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
    }

    #[test]
    fn test_today_is_this_week() {
        assert_eq!(categorize_date(today(), today()), EventCategory::ThisWeek);
    }

    #[test]
    fn test_day_seven_inclusive() {
        let d = today() + Duration::days(7);
        assert_eq!(categorize_date(d, today()), EventCategory::ThisWeek);
    }

    #[test]
    fn test_day_eight_is_upcoming() {
        let d = today() + Duration::days(8);
        assert_eq!(categorize_date(d, today()), EventCategory::Upcoming);
    }

    #[test]
    fn test_yesterday_is_past() {
        let d = today() - Duration::days(1);
        assert_eq!(categorize_date(d, today()), EventCategory::Past);
    }

    #[test]
    fn test_closest_event_empty() {
        let events = categorize(vec![event_on(today() - Duration::days(3), "old")], today());
        assert!(closest_event(&events).is_none());
    }

    #[test]
    fn test_closest_event_earliest_of_bucket() {
        let events = categorize(
            vec![
                event_on(today() + Duration::days(5), "later"),
                event_on(today() + Duration::days(2), "sooner"),
                event_on(today() + Duration::days(20), "far out"),
            ],
            today(),
        );
        let closest = closest_event(&events).unwrap();
        assert_eq!(closest.event.title, "sooner");
    }

    #[test]
    fn test_buckets_sorted_ascending() {
        let events = categorize(
            vec![
                event_on(today() + Duration::days(6), "b"),
                event_on(today() + Duration::days(1), "a"),
                event_on(today() + Duration::days(30), "d"),
                event_on(today() + Duration::days(9), "c"),
            ],
            today(),
        );
        let this_week: Vec<String> = this_week_events(&events)
            .iter()
            .map(|e| e.event.title.clone())
            .collect();
        assert_eq!(this_week, vec!["a", "b"]);

        let upcoming: Vec<String> = upcoming_events(&events)
            .iter()
            .map(|e| e.event.title.clone())
            .collect();
        assert_eq!(upcoming, vec!["c", "d"]);
    }
}
