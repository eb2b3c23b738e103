use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{middleware::rate_limit::check_rate_limit, AppState};

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_date: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// POST /contact — public catering/booking form.
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, (StatusCode, Json<serde_json::Value>)> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Name, email, and message are required." })),
        ));
    }

    // Rate limit by IP: max 5 submissions per hour
    // X-Real-IP is set by the reverse proxy in front of the API
    let ip = headers
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let mut redis = state.redis.clone();
    check_rate_limit(&mut redis, &format!("contact:form:{}", ip), 5, 3600).await?;

    let email_service = state.email.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({ "error": "Email service unavailable" })),
    ))?;

    email_service
        .send_contact_message(
            &payload.name,
            &payload.email,
            payload.phone.as_deref(),
            payload.event_date.as_deref(),
            &payload.message,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to forward contact message: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to send message." })),
            )
        })?;

    Ok(Json(ContactResponse { success: true }))
}
