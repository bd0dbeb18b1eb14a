//! Integration tests for the operational endpoints

use reqwest::StatusCode;
use serde_json::{json, Value};
use token_service::config::SERVER_URL_VAR;
use ts_test_utils::{config_without, TestTokenServer};

#[tokio::test]
async fn test_health_endpoint_returns_ok() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = reqwest::get(format!("{}/health", server.url())).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn test_ready_when_credentials_configured() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = reqwest::get(format!("{}/ready", server.url())).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["credentials"], "configured");

    Ok(())
}

#[tokio::test]
async fn test_not_ready_without_credentials() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn(config_without(SERVER_URL_VAR)).await?;

    // Liveness is unaffected
    let response = reqwest::get(format!("{}/health", server.url())).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = reqwest::get(format!("{}/ready", server.url())).await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text)?;
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["error"], "Service dependencies unavailable");
    assert!(!text.contains(SERVER_URL_VAR));

    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_serves_prometheus_text() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/v1/media/token", server.url()))
        .json(&json!({"room": "room1", "username": "alice"}))
        .send()
        .await?;

    let response = client.get(format!("{}/metrics", server.url())).send().await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
