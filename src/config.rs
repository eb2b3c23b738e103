use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub uploads_dir: String,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    pub site_name: String,
    /// Address shown when neither a one-time event nor the weekly schedule
    /// covers today.
    pub fallback_address: String,
    pub geocoding_api_key: Option<String>,
    // SMTP (optional) — contact form returns 503 without it
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub contact_recipient: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_seconds: env::var("JWT_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "86400".into())
                .parse()?,
            admin_username: required("ADMIN_USERNAME")?,
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "/data/uploads".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
            site_name: env::var("SITE_NAME")
                .unwrap_or_else(|_| "Crown Majestic Kitchen".into()),
            fallback_address: env::var("FALLBACK_ADDRESS")
                .unwrap_or_else(|_| "Jacksonville, FL".into()),
            geocoding_api_key: env::var("GEOCODING_API_KEY").ok().filter(|s| !s.is_empty()),
            smtp_host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|v| v.parse().ok()),
            smtp_username: env::var("SMTP_USERNAME").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_from: env::var("SMTP_FROM").ok().filter(|s| !s.is_empty()),
            contact_recipient: env::var("CONTACT_RECIPIENT").ok().filter(|s| !s.is_empty()),
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
