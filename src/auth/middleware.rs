use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{info, instrument, warn};

use super::cookie::extract_token;
use crate::shared::{AppError, AppState};

/// Session gate - validates the `token` cookie and adds SessionClaims to the request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), auth::cookie_auth))
/// Handlers can then extract Extension(claims): Extension<SessionClaims>.
#[instrument(skip(state, req, next))]
pub async fn cookie_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    info!("Session gate triggered for request {}", req.uri());

    let token = extract_token(req.headers()).ok_or_else(|| {
        warn!("Missing token cookie in request");
        AppError::Unauthorized("Missing session token".to_string())
    })?;

    let claims = match state.token_service.validate(&token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Session token rejected: {}", e);
            return Err(e.into());
        }
    };

    info!(
        username = %claims.username,
        "Authentication successful, adding claims to request"
    );

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
