//! Deterministic configuration fixtures.

use std::collections::HashMap;
use token_service::config::{Config, API_KEY_VAR, API_SECRET_VAR, SERVER_URL_VAR};

/// Media API key id used by every test server.
pub const TEST_API_KEY: &str = "APItestkey000001";

/// Media API secret paired with [`TEST_API_KEY`].
pub const TEST_API_SECRET: &str = "test-media-secret-do-not-use-in-production-0001";

/// Media endpoint URL handed back to clients in tests.
pub const TEST_MEDIA_URL: &str = "wss://media.test.invalid";

/// A complete set of environment variables for a configured service.
pub fn test_vars() -> HashMap<String, String> {
    HashMap::from([
        ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        (API_KEY_VAR.to_string(), TEST_API_KEY.to_string()),
        (API_SECRET_VAR.to_string(), TEST_API_SECRET.to_string()),
        (SERVER_URL_VAR.to_string(), TEST_MEDIA_URL.to_string()),
        ("DRAIN_SECONDS".to_string(), "0".to_string()),
    ])
}

/// Config with valid media credentials.
pub fn test_config() -> Config {
    config_from(test_vars())
}

/// Config with `var` removed, leaving the issuer misconfigured when `var`
/// is one of the credential variables.
pub fn config_without(var: &str) -> Config {
    let mut vars = test_vars();
    vars.remove(var);
    config_from(vars)
}

/// Config built from [`test_vars`] plus `overrides`.
pub fn config_with(overrides: &[(&str, &str)]) -> Config {
    let mut vars = test_vars();
    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }
    config_from(vars)
}

fn config_from(vars: HashMap<String, String>) -> Config {
    Config::from_vars(&vars).expect("test vars should form a valid config")
}
