//! Integration tests for `POST /api/v1/media/token`

use reqwest::StatusCode;
use serde_json::{json, Value};
use ts_test_utils::{config_with, MediaTokenAssertions, TestTokenServer, TEST_MEDIA_URL};

async fn post_token(
    server: &TestTokenServer,
    body: Value,
) -> Result<reqwest::Response, anyhow::Error> {
    Ok(reqwest::Client::new()
        .post(format!("{}/api/v1/media/token", server.url()))
        .json(&body)
        .send()
        .await?)
}

#[tokio::test]
async fn test_issues_token_for_room_and_identity() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = post_token(&server, json!({"room": "studio-42", "username": "maria"})).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["url"], TEST_MEDIA_URL, "URL must be returned unchanged");

    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());
    token
        .assert_valid_media_token()
        .assert_grants_room("studio-42")
        .assert_for_identity("maria")
        .assert_expires_in(21_600);

    Ok(())
}

#[tokio::test]
async fn test_identical_requests_yield_distinct_valid_tokens() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;
    let request = json!({"room": "room1", "username": "alice"});

    let first: Value = post_token(&server, request.clone()).await?.json().await?;
    let second: Value = post_token(&server, request).await?.json().await?;

    let first = first["token"].as_str().unwrap_or_default().to_string();
    let second = second["token"].as_str().unwrap_or_default().to_string();
    assert_ne!(first, second);

    first.assert_valid_media_token().assert_grants_room("room1");
    second.assert_valid_media_token().assert_grants_room("room1");

    Ok(())
}

#[tokio::test]
async fn test_configured_ttl_is_applied() -> Result<(), anyhow::Error> {
    let server =
        TestTokenServer::spawn(config_with(&[("MEDIA_TOKEN_TTL_SECONDS", "600")])).await?;

    let body: Value = post_token(&server, json!({"room": "room1", "username": "alice"}))
        .await?
        .json()
        .await?;

    body["token"]
        .as_str()
        .unwrap_or_default()
        .to_string()
        .assert_valid_media_token()
        .assert_expires_in(600);

    Ok(())
}

#[tokio::test]
async fn test_missing_fields_are_rejected() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let cases = [
        (json!({"username": "alice"}), "missing room"),
        (json!({"room": "", "username": "alice"}), "missing room"),
        (json!({"room": "room1"}), "missing identity"),
        (json!({"room": "room1", "username": ""}), "missing identity"),
        (json!({}), "missing room"),
    ];

    for (request, expected) in cases {
        let response = post_token(&server, request.clone()).await?;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "request {request} should be rejected"
        );

        let body: Value = response.json().await?;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert_eq!(body["error"]["message"], expected);
    }

    Ok(())
}

#[tokio::test]
async fn test_unparsable_body_gets_json_error() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/media/token", server.url()))
        .header("content-type", "application/json")
        .body("{\"room\": ")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"]["message"], "malformed request body");

    Ok(())
}

#[tokio::test]
async fn test_wrong_method_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = reqwest::Client::new()
        .get(format!("{}/api/v1/media/token", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    Ok(())
}
