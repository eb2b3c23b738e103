use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{models::location::ResolveMapsQuery, AppState};

/// GET /resolve-maps-link?url= — used by the dashboard's location form to
/// auto-fill an address from a pasted Maps link. Best effort: the
/// response may carry any subset of place name and coordinates, and the
/// caller falls back to treating the input as a plain address.
pub async fn resolve_maps_link(
    State(state): State<AppState>,
    Query(params): Query<ResolveMapsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if params.url.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "URL parameter required" })),
        ));
    }

    let resolved = state.maps.resolve(&params.url).await;
    tracing::debug!(
        "Resolved maps link {:?} -> place={:?} lat={:?} lng={:?}",
        params.url,
        resolved.place_name,
        resolved.lat,
        resolved.lng
    );
    Ok(Json(serde_json::to_value(resolved).unwrap()))
}
