use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::{CredentialStore, TokenService};
use crate::company::repository::CompanyRepository;
use crate::config::AppConfig;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub token_service: TokenService,
    pub credentials: Arc<CredentialStore>,
    pub company_repository: Arc<dyn CompanyRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        token_service: TokenService,
        credentials: Arc<CredentialStore>,
        company_repository: Arc<dyn CompanyRepository + Send + Sync>,
    ) -> Self {
        Self {
            token_service,
            credentials,
            company_repository,
        }
    }

    /// Wires the token service and credential store from configuration
    pub fn from_config(
        config: &AppConfig,
        company_repository: Arc<dyn CompanyRepository + Send + Sync>,
    ) -> Self {
        Self::new(
            TokenService::from_config(config),
            Arc::new(CredentialStore::new(config.users.clone())),
            company_repository,
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
