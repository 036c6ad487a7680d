//! Claims embedded in a session token.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Session token claims.
///
/// `sub` is the numeric principal id. Ids are per table, so `role` is what
/// tells a teacher apart from a student with the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal id (subject claim)
    pub sub: i64,
    pub role: Role,
    /// Unique token identifier, recorded on logout to revoke the token
    pub jti: String,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = SessionClaims {
            sub: 7,
            role: Role::Student,
            jti: "abc".to_string(),
            iat: 1234567800,
            exp: 1234567890,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":7"#));
        assert!(serialized.contains(r#""role":"student""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":3,"role":"teacher","jti":"x","iat":9999999900,"exp":9999999999}"#;
        let claims: SessionClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, 3);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp, 9999999999);
    }
}
