use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    models::{auth::AdminUser, schedule::UpsertScheduleEntry},
    services::schedule::ScheduleService,
    AppState,
};

/// GET /schedule — public, Monday..Sunday order.
pub async fn get_schedule(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ScheduleService::list(&state.db)
        .await
        .map(|entries| Json(serde_json::to_value(entries).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// PUT /schedule — admin only; replaces the whole week at once.
pub async fn replace_schedule(
    State(state): State<AppState>,
    _user: AdminUser,
    Json(body): Json<Vec<UpsertScheduleEntry>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ScheduleService::replace(&state.db, &body)
        .await
        .map(|entries| Json(serde_json::to_value(entries).unwrap()))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        })
}
