//! Session token creation and verification.
//!
//! Tokens are HS256 JWTs signed with `SESSION_SECRET`. Each token gets a fresh
//! `jti` so a single session can be revoked without touching the others.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use gearlend_config::SessionConfig;
use gearlend_core::AppError;

use crate::claims::SessionClaims;
use crate::role::Role;

/// Signs a new session token for `principal_id` with a fresh `jti`.
pub fn create_session_token(
    principal_id: i64,
    role: Role,
    config: &SessionConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = SessionClaims {
        sub: principal_id,
        role,
        jti: Uuid::new_v4().to_string(),
        iat: now,
        exp: now + config.expiry_secs.max(0) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create session token: {}", e)))
}

/// Checks signature and expiry and returns the claims.
///
/// Revocation is not checked here; that needs the database.
pub fn verify_session_token(token: &str, config: &SessionConfig) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired session".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig::with_secret("test-secret")
    }

    #[test]
    fn test_create_and_verify() {
        let token = create_session_token(42, Role::Teacher, &config()).unwrap();
        let claims = verify_session_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Teacher);
        assert!(!claims.jti.is_empty());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let a = create_session_token(1, Role::Student, &config()).unwrap();
        let b = create_session_token(1, Role::Student, &config()).unwrap();
        let a = verify_session_token(&a, &config()).unwrap();
        let b = verify_session_token(&b, &config()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_session_token(1, Role::Student, &config()).unwrap();
        let err = verify_session_token(&token, &SessionConfig::with_secret("other"))
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config();
        let now = Utc::now().timestamp() as usize;
        let claims = SessionClaims {
            sub: 1,
            role: Role::Teacher,
            jti: "old".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert!(verify_session_token(&token, &config).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(verify_session_token("not.a.token", &config()).is_err());
    }
}
