use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

use super::types::SessionClaims;
use crate::config::AppConfig;
use crate::shared::AppError;

#[derive(Error, Debug, PartialEq)]
pub enum AuthError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("could not sign token: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Expired | AuthError::Invalid(_) => AppError::Unauthorized(err.to_string()),
            AuthError::Signing(msg) => AppError::Internal(msg),
        }
    }
}

/// Issues and verifies HS256 session tokens. Stateless: nothing is stored
/// server side, so a token stays usable until its `exp`.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<str>,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        let secret: String = secret.into();
        Self {
            secret: Arc::from(secret),
            lifetime: Duration::seconds(lifetime_secs),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.jwt_secret.clone(), config.token_lifetime_secs)
    }

    /// Token validity window in seconds, also used as the cookie max-age
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Creates a token for `username` expiring one window from now
    #[instrument(skip(self))]
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        self.issue_at(username, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let exp = (issued_at + self.lifetime).timestamp() as usize;

        debug!(
            lifetime_secs = self.lifetime.num_seconds(),
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = SessionClaims {
            username: username.to_string(),
            exp,
            iat: issued_at.timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AuthError::Signing(e.to_string())
        })
    }

    /// Verifies signature and expiry, returning the decoded claims
    #[instrument(skip(self, token))]
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        debug!("Decoding and validating JWT token");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| {
            debug!(
                username = %data.claims.username,
                exp = data.claims.exp,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(e.to_string()),
            }
        })
    }

    /// Validates `token` and reissues it for the same user with a fresh window
    #[instrument(skip(self, token))]
    pub fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.validate(token)?;
        debug!(username = %claims.username, "Reissuing token");
        self.issue(&claims.username)
    }
}
