// Public API - what other modules can use
pub use credentials::CredentialStore;
pub use handlers::{home, login, refresh};
pub use middleware::cookie_auth;
pub use token::{AuthError, TokenService};
pub use types::{MessageResponse, SessionClaims};

// Internal modules
pub mod cookie;
mod credentials;
mod handlers;
mod middleware;
mod token;
mod types;
