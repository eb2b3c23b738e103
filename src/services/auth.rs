use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{config::Config, models::auth::Claims};

pub struct AuthService;

impl AuthService {
    /// Validate the single configured admin account. Both the username
    /// comparison and the bcrypt check must pass; either failure reports
    /// the same generic error.
    pub fn verify_login(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
        if username != config.admin_username {
            anyhow::bail!("Invalid credentials");
        }
        let valid = bcrypt::verify(password, &config.admin_password_hash)
            .map_err(|_| anyhow::anyhow!("Invalid credentials"))?;
        if !valid {
            anyhow::bail!("Invalid credentials");
        }
        Ok(())
    }

    pub fn generate_access_token(
        username: &str,
        secret: &str,
        expiry_seconds: u64,
    ) -> anyhow::Result<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + expiry_seconds as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }
}
