use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::{
        auth::AdminUser,
        event::{CalendarLinkResponse, CreateEventRequest, UpdateEventRequest},
    },
    services::{calendar, dates, events, events::EventService},
    AppState,
};

/// GET /events — public; events annotated with their derived category,
/// recomputed against today's date on every request.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let events = EventService::list(&state.db).await.map_err(internal)?;
    let categorized = events::categorize(events, dates::today_local());
    Ok(Json(serde_json::to_value(categorized).unwrap()))
}

/// POST /events — admin only.
pub async fn create_event(
    State(state): State<AppState>,
    _user: AdminUser,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if body.title.trim().is_empty() || body.location.trim().is_empty() {
        return Err(bad_request("Title and location are required"));
    }
    let event = EventService::create(&state.db, &body).await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
    })?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(event).unwrap())))
}

/// PUT /events/{id} — admin only; partial update.
pub async fn update_event(
    State(state): State<AppState>,
    _user: AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let event = EventService::update(&state.db, id, &body)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })?
        .ok_or_else(|| not_found("Event not found"))?;
    Ok(Json(serde_json::to_value(event).unwrap()))
}

/// DELETE /events/{id} — admin only; immediate and irreversible.
pub async fn delete_event(
    State(state): State<AppState>,
    _user: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let deleted = EventService::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err(not_found("Event not found"));
    }
    Ok(Json(json!({ "success": true })))
}

/// GET /events/{id}/calendar-link — public; a ready-to-open
/// "add to calendar" URL for the event.
pub async fn calendar_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CalendarLinkResponse>, (StatusCode, Json<Value>)> {
    let event = EventService::get(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| not_found("Event not found"))?;
    let url = calendar::generate_calendar_url(&event, &state.config.site_name);
    Ok(Json(CalendarLinkResponse { url }))
}

fn internal(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

fn not_found(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": msg })))
}

fn bad_request(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
}
