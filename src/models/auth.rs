use serde::{Deserialize, Serialize};

/// Claims embedded in the admin JWT access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin username
    pub exp: usize,
    pub iat: usize,
}

/// Extracted from a validated JWT — available via the axum extractor
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
}

/// Body for POST /auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for POST /auth/login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: u64,
}
