//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// These claims carry everything needed for authentication and authorization
/// without database lookups.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// School the token is scoped to
    pub school_id: Option<Uuid>,
    /// Permission names granted to the user
    pub permissions: Vec<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(permissions: Vec<String>) -> Claims {
        Claims {
            sub: "user-id-123".to_string(),
            email: "clerk@example.com".to_string(),
            school_id: None,
            permissions,
            exp: 1234567890,
            iat: 1234567800,
        }
    }

    #[test]
    fn test_claims_serialize() {
        let serialized = serde_json::to_string(&claims(vec![])).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""email":"clerk@example.com""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let school_id = Uuid::new_v4();
        let json = format!(
            r#"{{"sub":"user-id-456","email":"user@test.com","school_id":"{school_id}","permissions":["reports:read"],"exp":9999999999,"iat":9999999900}}"#
        );
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.school_id, Some(school_id));
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_has_permission() {
        let claims = claims(vec!["attendance:mark".to_string()]);
        assert!(claims.has_permission("attendance:mark"));
        assert!(!claims.has_permission("attendance:read"));
    }
}
