// Library crate for the companies API
// This file exposes the public API for integration tests

pub mod auth;
pub mod company;
pub mod config;
pub mod router;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use auth::{CredentialStore, SessionClaims, TokenService};
pub use company::{
    models::CompanyModel,
    repository::{CompanyRepository, InMemoryCompanyRepository, PostgresCompanyRepository},
};
pub use config::AppConfig;
pub use router::build_router;
pub use shared::{AppError, AppState};
