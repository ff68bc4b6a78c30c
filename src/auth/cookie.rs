use axum::http::{header, HeaderMap, HeaderValue};

use crate::shared::AppError;

pub const TOKEN_COOKIE_NAME: &str = "token";

/// Pulls the session token out of the request's `Cookie` headers.
/// Empty values count as absent.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE_NAME)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Builds the `Set-Cookie` value used by both login and refresh
pub fn session_cookie(token: &str, max_age_secs: i64) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        TOKEN_COOKIE_NAME, token, max_age_secs
    );

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))
}
