use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{info, instrument, warn};

use super::{
    cookie::{extract_token, session_cookie},
    types::{LoginRequest, MessageResponse, SessionClaims},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for logging in
///
/// POST /login
/// Checks the credentials and sets the session token cookie
#[instrument(name = "login", skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    info!(username = %request.username, "Login attempt");

    if !state
        .credentials
        .verify(&request.username, &request.password)
    {
        warn!(username = %request.username, "Invalid credentials");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.token_service.issue(&request.username)?;
    let cookie = session_cookie(&token, state.token_service.lifetime_secs())?;

    info!(username = %request.username, "Login successful");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Login successful")),
    )
        .into_response())
}

/// HTTP handler for the greeting page
///
/// GET /home (behind the session gate)
#[instrument(name = "home", skip(claims))]
pub async fn home(Extension(claims): Extension<SessionClaims>) -> Json<MessageResponse> {
    info!(username = %claims.username, "Serving home");
    Json(MessageResponse::new(format!("Hello, {}", claims.username)))
}

/// HTTP handler for extending the session
///
/// GET /refresh (behind the session gate)
/// Re-reads the cookie rather than trusting the gate's claims, then resets
/// it with a freshly issued token.
#[instrument(name = "refresh", skip(state, headers))]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = extract_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

    let refreshed = state.token_service.refresh(&token).map_err(|e| {
        warn!("Token refresh failed: {}", e);
        AppError::from(e)
    })?;
    let cookie = session_cookie(&refreshed, state.token_service.lifetime_secs())?;

    info!("Token refreshed successfully");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Token refreshed successfully")),
    )
        .into_response())
}
