use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 300;
const DEFAULT_AUTH_USERS: &str = "user1:password1,user2:password2";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Process-wide configuration, read once at startup and injected into the
/// token service, credential store and transport.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    /// `None` selects the in-memory company repository.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_lifetime_secs: i64,
    /// Plaintext username -> password pairs.
    pub users: HashMap<String, String>,
}

impl AppConfig {
    /// Builds the configuration from environment variables, falling back to
    /// development defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_lifetime_secs = match lookup("TOKEN_LIFETIME_SECS") {
            Some(raw) => parse_lifetime(&raw)?,
            None => DEFAULT_TOKEN_LIFETIME_SECS,
        };

        let users = parse_users(
            &lookup("AUTH_USERS").unwrap_or_else(|| DEFAULT_AUTH_USERS.to_string()),
        )?;

        let config = Self {
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            token_lifetime_secs,
            users,
        };

        debug!(
            bind_address = %config.bind_address,
            token_lifetime_secs = config.token_lifetime_secs,
            user_count = config.users.len(),
            persistent = config.database_url.is_some(),
            "Loaded application configuration"
        );

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            users: parse_users(DEFAULT_AUTH_USERS).unwrap_or_default(),
        }
    }
}

fn parse_lifetime(raw: &str) -> Result<i64, ConfigError> {
    let secs: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: "TOKEN_LIFETIME_SECS",
        reason: format!("'{}' is not an integer", raw),
    })?;

    if secs <= 0 {
        return Err(ConfigError::InvalidValue {
            name: "TOKEN_LIFETIME_SECS",
            reason: "must be positive".to_string(),
        });
    }

    Ok(secs)
}

/// Parses `user:pass,user:pass`. Empty entries are skipped.
fn parse_users(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut users = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (username, password) = entry.split_once(':').ok_or_else(|| {
            ConfigError::InvalidValue {
                name: "AUTH_USERS",
                reason: format!("entry '{}' is missing ':'", entry),
            }
        })?;

        if username.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "AUTH_USERS",
                reason: "empty username".to_string(),
            });
        }

        users.insert(username.to_string(), password.to_string());
    }

    Ok(users)
}
