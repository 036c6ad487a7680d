//! Session settings.
//!
//! A session is a signed token carrying the principal id and role tag. It is
//! delivered as an HttpOnly cookie and can also be sent as a bearer token.
//!
//! # Environment Variables
//!
//! - `SESSION_SECRET`: HMAC signing secret
//! - `SESSION_EXPIRY`: lifetime in seconds (default 8 hours)
//! - `SESSION_COOKIE_NAME`: cookie name (default `gearlend_session`)
//! - `SESSION_COOKIE_SECURE`: set the `Secure` cookie attribute (default false)

use std::env;

pub const DEFAULT_COOKIE_NAME: &str = "gearlend_session";

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub secret: String,
    pub expiry_secs: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "change-this-session-secret".to_string()),
            expiry_secs: env::var("SESSION_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8 * 3600),
            cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string()),
            secure_cookie: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Fixed configuration for tests and tooling.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_secs: 3600,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secure_cookie: false,
        }
    }
}
