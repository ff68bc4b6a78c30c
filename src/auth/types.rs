use serde::{Deserialize, Serialize};

/// JWT claims carried by the session cookie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub username: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

/// Request payload for the login endpoint
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Plain acknowledgement body shared by the auth and company endpoints
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_claims_serialization() {
        let claims = SessionClaims {
            username: "user1".to_string(),
            exp: 1234567890,
            iat: 1234567590,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"username\":\"user1\""));

        let deserialized: SessionClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let ok: Result<LoginRequest, _> =
            serde_json::from_str(r#"{"username": "user1", "password": "password1"}"#);
        assert!(ok.is_ok());

        let missing: Result<LoginRequest, _> = serde_json::from_str(r#"{"username": "user1"}"#);
        assert!(missing.is_err());
    }
}
