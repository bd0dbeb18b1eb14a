//! Integration tests for a service started without media credentials
//!
//! The process must start, refuse every issuance on both surfaces with a
//! generic error, and never tell the caller which variable is missing.

use reqwest::StatusCode;
use serde_json::{json, Value};
use token_service::config::{API_KEY_VAR, API_SECRET_VAR, SERVER_URL_VAR};
use ts_test_utils::{config_without, TestTokenServer};

#[tokio::test]
async fn test_each_missing_variable_refuses_http_issuance() -> Result<(), anyhow::Error> {
    for missing in [API_KEY_VAR, API_SECRET_VAR, SERVER_URL_VAR] {
        let server = TestTokenServer::spawn(config_without(missing)).await?;
        assert!(server.config().media_credentials.is_err());
        let client = reqwest::Client::new();

        // Refusal is stable across repeated calls
        for _ in 0..2 {
            let response = client
                .post(format!("{}/api/v1/media/token", server.url()))
                .json(&json!({"room": "room1", "username": "alice"}))
                .send()
                .await?;
            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "missing {missing} should refuse issuance"
            );

            let text = response.text().await?;
            let body: Value = serde_json::from_str(&text)?;
            assert_eq!(body["error"]["code"], "SERVICE_MISCONFIGURED");
            assert!(!text.contains(missing), "response must not name {missing}");
            assert!(!text.contains("LIVEKIT"));
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_missing_credentials_refuse_rpc_issuance() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(config_without(API_SECRET_VAR)).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/rpc/media.getToken", server.url()))
        .json(&json!({"room": "room1", "username": "alice"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text)?;
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert!(!text.contains(API_SECRET_VAR));

    Ok(())
}

#[tokio::test]
async fn test_invalid_input_reported_before_misconfiguration() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(config_without(API_KEY_VAR)).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/media/token", server.url()))
        .json(&json!({"room": "", "username": "alice"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
