use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{services::location::LocationService, AppState};

/// GET /location — public; where the truck is today, resolved from
/// events, the weekly schedule, or the configured fallback.
pub async fn current_location(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    LocationService::current(&state.db, &state.config)
        .await
        .map(|location| Json(serde_json::to_value(location).unwrap()))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}
