//! Integration tests for the `media.getToken` RPC procedure

use reqwest::StatusCode;
use serde_json::{json, Value};
use ts_test_utils::{MediaTokenAssertions, TestTokenServer, TEST_MEDIA_URL};

async fn call(
    server: &TestTokenServer,
    procedure: &str,
    input: Value,
) -> Result<reqwest::Response, anyhow::Error> {
    Ok(reqwest::Client::new()
        .post(format!("{}/api/rpc/{}", server.url(), procedure))
        .json(&input)
        .send()
        .await?)
}

#[tokio::test]
async fn test_get_token_returns_enveloped_token() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = call(
        &server,
        "media.getToken",
        json!({"room": "studio-42", "username": "maria"}),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    let data = &body["result"]["data"];
    assert_eq!(data["url"], TEST_MEDIA_URL);

    data["token"]
        .as_str()
        .unwrap_or_default()
        .to_string()
        .assert_valid_media_token()
        .assert_grants_room("studio-42")
        .assert_for_identity("maria");

    Ok(())
}

#[tokio::test]
async fn test_get_token_accepts_encoded_room_names() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;
    let room = r#"{"agent":"support","voice":"alloy","ts":1700000000}"#;

    let body: Value = call(&server, "media.getToken", json!({"room": room, "username": "u1"}))
        .await?
        .json()
        .await?;

    body["result"]["data"]["token"]
        .as_str()
        .unwrap_or_default()
        .to_string()
        .assert_grants_room(room);

    Ok(())
}

#[tokio::test]
async fn test_get_token_validation_errors() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = call(&server, "media.getToken", json!({"room": "room1", "username": ""})).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message"], "missing identity");

    Ok(())
}

#[tokio::test]
async fn test_unknown_procedure_is_not_found() -> Result<(), anyhow::Error> {
    let server = TestTokenServer::spawn_with_test_credentials().await?;

    let response = call(&server, "media.deleteRoom", json!({"room": "r", "username": "u"})).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    Ok(())
}
