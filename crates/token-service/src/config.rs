//! Token Service configuration.
//!
//! Configuration is loaded once from environment variables at startup and
//! is read-only afterwards. Media signing credentials are loaded separately
//! from the rest: a missing credential does not stop the process, it puts the
//! issuer into a refusing state that is detected once, here.

use common::jwt::{DEFAULT_TOKEN_TTL, MAX_TOKEN_TTL, MIN_TOKEN_TTL};
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8090";

/// Default graceful-shutdown drain period in seconds.
pub const DEFAULT_DRAIN_SECONDS: u64 = 30;

/// Environment variable holding the media API key id.
pub const API_KEY_VAR: &str = "LIVEKIT_API_KEY";

/// Environment variable holding the media API key secret.
pub const API_SECRET_VAR: &str = "LIVEKIT_API_SECRET";

/// Environment variable holding the media endpoint URL returned to clients.
pub const SERVER_URL_VAR: &str = "LIVEKIT_URL";

/// Signing credentials for the real-time media service.
///
/// The secret is a `SecretString`, so `Debug` output never contains it.
#[derive(Debug, Clone)]
pub struct MediaCredentials {
    /// Public identifier of the signing key (`iss` / `kid`).
    pub api_key: String,

    /// Private signing material.
    pub api_secret: SecretString,

    /// Endpoint clients connect to. Not a secret.
    pub server_url: String,
}

/// Why media credentials could not be loaded.
///
/// The variable name is for operator logs only and must not reach callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("Missing media credential: {0}")]
    Missing(&'static str),
}

impl MediaCredentials {
    /// Load credentials from a HashMap. Empty or whitespace-only values count
    /// as missing.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, CredentialsError> {
        let api_key = required(vars, API_KEY_VAR)?;
        let api_secret = required(vars, API_SECRET_VAR)?;
        let server_url = required(vars, SERVER_URL_VAR)?;

        Ok(MediaCredentials {
            api_key,
            api_secret: SecretString::from(api_secret),
            server_url,
        })
    }
}

fn required(
    vars: &HashMap<String, String>,
    name: &'static str,
) -> Result<String, CredentialsError> {
    vars.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or(CredentialsError::Missing(name))
}

/// Token Service configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8090").
    pub bind_address: String,

    /// Media signing credentials, or the reason they are unavailable.
    pub media_credentials: Result<MediaCredentials, CredentialsError>,

    /// Lifetime of issued tokens.
    pub token_ttl: Duration,

    /// Browser origins allowed to call the API. Empty disables CORS.
    pub cors_allowed_origins: Vec<String>,

    /// Seconds to keep serving in-flight requests after a shutdown signal.
    pub drain_seconds: u64,
}

/// Custom Debug implementation that never prints credential material.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credentials = match &self.media_credentials {
            Ok(_) => "configured",
            Err(_) => "missing",
        };
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("media_credentials", &credentials)
            .field("token_ttl", &self.token_ttl)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("drain_seconds", &self.drain_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid token TTL configuration: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Invalid drain period configuration: {0}")]
    InvalidDrainSeconds(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let media_credentials = MediaCredentials::from_vars(vars);

        let token_ttl = if let Some(value_str) = vars.get("MEDIA_TOKEN_TTL_SECONDS") {
            let seconds: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidTokenTtl(format!(
                    "MEDIA_TOKEN_TTL_SECONDS must be a positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            let ttl = Duration::from_secs(seconds);
            if !(MIN_TOKEN_TTL..=MAX_TOKEN_TTL).contains(&ttl) {
                return Err(ConfigError::InvalidTokenTtl(format!(
                    "MEDIA_TOKEN_TTL_SECONDS must be between {} and {}, got {}",
                    MIN_TOKEN_TTL.as_secs(),
                    MAX_TOKEN_TTL.as_secs(),
                    seconds
                )));
            }
            ttl
        } else {
            DEFAULT_TOKEN_TTL
        };

        let cors_allowed_origins = match vars.get("CORS_ALLOWED_ORIGINS") {
            Some(value) => parse_origins(value)?,
            None => Vec::new(),
        };

        let drain_seconds = match vars.get("DRAIN_SECONDS") {
            Some(value_str) => value_str.parse().map_err(|e| {
                ConfigError::InvalidDrainSeconds(format!(
                    "DRAIN_SECONDS must be a non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?,
            None => DEFAULT_DRAIN_SECONDS,
        };

        Ok(Config {
            bind_address,
            media_credentials,
            token_ttl,
            cors_allowed_origins,
            drain_seconds,
        })
    }
}

fn parse_origins(value: &str) -> Result<Vec<String>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
            if !has_scheme || origin.contains(char::is_whitespace) {
                return Err(ConfigError::InvalidCorsOrigin(origin.to_string()));
            }
            Ok(origin.trim_end_matches('/').to_string())
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use common::secret::ExposeSecret;

    fn credential_vars() -> HashMap<String, String> {
        HashMap::from([
            (API_KEY_VAR.to_string(), "APIdevkey".to_string()),
            (API_SECRET_VAR.to_string(), "dev-secret-value".to_string()),
            (
                SERVER_URL_VAR.to_string(),
                "wss://media.example.com".to_string(),
            ),
        ])
    }

    #[test]
    fn test_from_vars_success() {
        let mut vars = credential_vars();
        vars.insert("BIND_ADDRESS".to_string(), "127.0.0.1:9000".to_string());
        vars.insert("MEDIA_TOKEN_TTL_SECONDS".to_string(), "600".to_string());
        vars.insert("DRAIN_SECONDS".to_string(), "0".to_string());

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.token_ttl, Duration::from_secs(600));
        assert_eq!(config.drain_seconds, 0);

        let creds = config.media_credentials.expect("credentials present");
        assert_eq!(creds.api_key, "APIdevkey");
        assert_eq!(creds.api_secret.expose_secret(), "dev-secret-value");
        assert_eq!(creds.server_url, "wss://media.example.com");
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = Config::from_vars(&credential_vars()).unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.token_ttl, DEFAULT_TOKEN_TTL);
        assert_eq!(config.drain_seconds, DEFAULT_DRAIN_SECONDS);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_credentials_do_not_abort_loading() {
        for missing in [API_KEY_VAR, API_SECRET_VAR, SERVER_URL_VAR] {
            let mut vars = credential_vars();
            vars.remove(missing);

            let config = Config::from_vars(&vars).expect("Config should still load");
            assert_eq!(
                config.media_credentials.unwrap_err(),
                CredentialsError::Missing(missing)
            );
        }
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let mut vars = credential_vars();
        vars.insert(API_SECRET_VAR.to_string(), "   ".to_string());

        let result = MediaCredentials::from_vars(&vars);
        assert_eq!(result.unwrap_err(), CredentialsError::Missing(API_SECRET_VAR));
    }

    #[test]
    fn test_no_vars_reports_key_first() {
        let result = MediaCredentials::from_vars(&HashMap::new());
        assert_eq!(result.unwrap_err(), CredentialsError::Missing(API_KEY_VAR));
    }

    #[test]
    fn test_token_ttl_not_a_number() {
        let mut vars = credential_vars();
        vars.insert("MEDIA_TOKEN_TTL_SECONDS".to_string(), "soon".to_string());

        match Config::from_vars(&vars) {
            Err(ConfigError::InvalidTokenTtl(msg)) => assert!(msg.contains("positive integer")),
            other => panic!("expected InvalidTokenTtl, got {other:?}"),
        }
    }

    #[test]
    fn test_token_ttl_zero_rejected() {
        let mut vars = credential_vars();
        vars.insert("MEDIA_TOKEN_TTL_SECONDS".to_string(), "0".to_string());

        match Config::from_vars(&vars) {
            Err(ConfigError::InvalidTokenTtl(msg)) => assert!(msg.contains("must be between")),
            other => panic!("expected InvalidTokenTtl, got {other:?}"),
        }
    }

    #[test]
    fn test_token_ttl_above_maximum_rejected() {
        let mut vars = credential_vars();
        vars.insert("MEDIA_TOKEN_TTL_SECONDS".to_string(), "86401".to_string());

        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::InvalidTokenTtl(_))
        ));
    }

    #[test]
    fn test_token_ttl_bounds_inclusive() {
        for seconds in [MIN_TOKEN_TTL.as_secs(), MAX_TOKEN_TTL.as_secs()] {
            let mut vars = credential_vars();
            vars.insert("MEDIA_TOKEN_TTL_SECONDS".to_string(), seconds.to_string());

            let config = Config::from_vars(&vars).unwrap();
            assert_eq!(config.token_ttl.as_secs(), seconds);
        }
    }

    #[test]
    fn test_cors_origins_parsed_and_trimmed() {
        let mut vars = credential_vars();
        vars.insert(
            "CORS_ALLOWED_ORIGINS".to_string(),
            "https://app.example.com/, http://localhost:3000 ,".to_string(),
        );

        let config = Config::from_vars(&vars).unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec![
                "https://app.example.com".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
    }

    #[test]
    fn test_cors_origin_without_scheme_rejected() {
        let mut vars = credential_vars();
        vars.insert(
            "CORS_ALLOWED_ORIGINS".to_string(),
            "app.example.com".to_string(),
        );

        match Config::from_vars(&vars) {
            Err(ConfigError::InvalidCorsOrigin(origin)) => assert_eq!(origin, "app.example.com"),
            other => panic!("expected InvalidCorsOrigin, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_drain_seconds() {
        let mut vars = credential_vars();
        vars.insert("DRAIN_SECONDS".to_string(), "-5".to_string());

        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::InvalidDrainSeconds(_))
        ));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = Config::from_vars(&credential_vars()).unwrap();
        let debug = format!("{config:?}");

        assert!(debug.contains("configured"));
        assert!(!debug.contains("dev-secret-value"));
        assert!(!debug.contains("APIdevkey"));
    }
}
