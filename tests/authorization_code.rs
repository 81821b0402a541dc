//! Integration tests for the Authorization Code grant.
//!
//! Drives the production reqwest transport against a local mock
//! authorization server.

use oauth2_authcode::{
    oauth2_config, AuthorizeParams, CodeExchangeRequest, OAuth2Client, OAuth2Config, OAuth2Error,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture() -> serde_json::Value {
    json!({
        "access_token": "4adc339e0",
        "refresh_token": "ec1a59d298",
        "token_type": "bearer",
        "expires_in": 7200
    })
}

fn config_for(server: &MockServer) -> OAuth2Config {
    oauth2_config()
        .site(server.uri())
        .client_id("client-id")
        .client_secret("client-secret")
        .build()
        .expect("valid config")
}

#[tokio::test]
async fn exchange_code_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "code=code&redirect_uri=http%3A%2F%2Fcallback.com&client_secret=client-secret&grant_type=authorization_code&client_id=client-id",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OAuth2Client::new(config_for(&mock_server)).expect("client");

    let token = client
        .exchange_code(CodeExchangeRequest {
            code: "code".to_string(),
            redirect_uri: "http://callback.com".to_string(),
        })
        .await
        .expect("token");

    assert_eq!(token.secret(), "4adc339e0");
    assert_eq!(token.refresh_token(), Some("ec1a59d298"));
    assert_eq!(token.token_type(), "bearer");
    assert!(!token.principal().is_empty());
    assert_eq!(token.principal()["access_token"], "4adc339e0");
}

#[tokio::test]
async fn exchange_code_rejected_by_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "authorization code not found"
        })))
        .mount(&mock_server)
        .await;

    let client = OAuth2Client::new(config_for(&mock_server)).expect("client");

    let err = client
        .exchange_code(CodeExchangeRequest {
            code: "bad-code".to_string(),
            redirect_uri: "http://callback.com".to_string(),
        })
        .await
        .expect_err("must fail");

    match err {
        OAuth2Error::AuthServer(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.error.as_deref(), Some("invalid_grant"));
            assert_eq!(
                e.error_description.as_deref(),
                Some("authorization code not found")
            );
        }
        other => panic!("expected AuthServerError, got {:?}", other),
    }
}

#[tokio::test]
async fn refresh_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string(
            "grant_type=refresh_token&refresh_token=ec1a59d298&client_secret=client-secret&client_id=client-id",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "b3f1c8d20",
            "token_type": "bearer",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OAuth2Client::new(config_for(&mock_server)).expect("client");

    let token = client.refresh("ec1a59d298").await.expect("token");
    assert_eq!(token.secret(), "b3f1c8d20");
}

#[tokio::test]
async fn authorize_url_is_pure() {
    // no mocks mounted: building the URL must not touch the network
    let mock_server = MockServer::start().await;
    let client = OAuth2Client::new(config_for(&mock_server)).expect("client");

    let url = client
        .authorize_url(&AuthorizeParams {
            redirect_uri: "http://localhost:3000/callback".to_string(),
            scopes: Some(vec!["user".to_string()]),
            state: Some("02afe928b".to_string()),
        })
        .expect("url");

    assert_eq!(
        url,
        format!(
            "{}/oauth/authorize?response_type=code&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback&state=02afe928b&client_id=client-id&scope=user",
            mock_server.uri()
        )
    );
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn connection_failure_surfaces_as_network_error() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);
    // shut the server down so the port refuses connections
    drop(mock_server);

    let client = OAuth2Client::new(config).expect("client");
    let err = client
        .exchange_code(CodeExchangeRequest {
            code: "code".to_string(),
            redirect_uri: "http://callback.com".to_string(),
        })
        .await
        .expect_err("must fail");

    assert!(matches!(err, OAuth2Error::Network(_)));
    assert!(err.is_retryable());
}
