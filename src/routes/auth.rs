use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};

use crate::{
    middleware::rate_limit::check_rate_limit,
    models::auth::{AdminUser, LoginRequest, LoginResponse},
    services::auth::AuthService,
    AppState,
};

/// POST /auth/login — single env-configured admin account.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<Value>)> {
    // Throttle brute-force attempts by client IP: 10 per 15 minutes
    let ip = headers
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let mut redis = state.redis.clone();
    check_rate_limit(&mut redis, &format!("auth:login:{}", ip), 10, 900).await?;

    AuthService::verify_login(&state.config, &payload.username, &payload.password).map_err(
        |e| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": e.to_string() })),
            )
        },
    )?;

    let token = AuthService::generate_access_token(
        &payload.username,
        &state.config.jwt_secret,
        state.config.jwt_expiry_seconds,
    )
    .map_err(|e| {
        tracing::error!("Failed to issue access token: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to issue token" })),
        )
    })?;

    Ok(Json(LoginResponse {
        access_token: token,
        expires_in: state.config.jwt_expiry_seconds,
    }))
}

/// GET /auth/me — token sanity check for the dashboard.
pub async fn me(user: AdminUser) -> Json<Value> {
    Json(json!({ "username": user.username }))
}
