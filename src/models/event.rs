use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A one-time truck appearance as stored in Postgres. The
/// this-week/upcoming/past classification is never persisted — it is
/// derived from `date` on every read (a stored value goes stale as days
/// pass).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TruckEvent {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub location: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where an event falls relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    ThisWeek,
    Upcoming,
    Past,
}

/// Event payload returned to clients: the stored record plus its derived
/// category and a display-formatted date.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedEvent {
    #[serde(flatten)]
    pub event: TruckEvent,
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub display_date: String,
}

/// Body for POST /events.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    /// Strict YYYY-MM-DD calendar date.
    pub date: String,
    pub time: Option<String>,
    pub location: String,
    pub description: Option<String>,
}

/// Body for PUT /events/{id} — absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Response for GET /events/{id}/calendar-link.
#[derive(Debug, Serialize)]
pub struct CalendarLinkResponse {
    pub url: String,
}
