//! PracticumClient against a mock homework statuses endpoint

use homework_bot_core::client::{HomeworkSource, PracticumClient};
use homework_bot_core::ErrorKind;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "practicum-secret";

fn client_for(server: &MockServer, timeout: Duration) -> PracticumClient {
    let endpoint = format!("{}/api/user_api/homework_statuses/", server.uri());
    PracticumClient::new(endpoint, TOKEN, timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_token_and_cursor() {
    let server = MockServer::start().await;
    let body = json!({
        "homeworks": [{"homework_name": "diploma", "status": "approved"}],
        "current_date": 1700000600
    });
    Mock::given(method("GET"))
        .and(path("/api/user_api/homework_statuses/"))
        .and(header("Authorization", "OAuth practicum-secret"))
        .and(query_param("from_date", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let response = client.fetch(1700000000).await.unwrap();
    assert_eq!(response, body);
}

#[tokio::test]
async fn test_non_200_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5))
        .fetch(0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert!(err.message().contains("503"));
    assert!(err.message().contains("from_date=0"));
    assert!(!err.message().contains(TOKEN));
}

#[tokio::test]
async fn test_non_ok_success_status_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5))
        .fetch(0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_soft_error_keys_are_protocol_errors() {
    for (key, value) in [
        ("code", json!("not_authenticated")),
        ("error", json!({"error": "Wrong from_date format"})),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ key: value })))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .fetch(0)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(
            err.message().contains(&format!("{}: ", key)),
            "message should name {}: {}",
            key,
            err.message()
        );
    }
}

#[tokio::test]
async fn test_invalid_json_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5))
        .fetch(0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_non_object_body_is_returned_for_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["code"])))
        .mount(&server)
        .await;

    let response = client_for(&server, Duration::from_secs(5))
        .fetch(0)
        .await
        .unwrap();
    assert_eq!(response, json!(["code"]));
}

#[tokio::test]
async fn test_timeout_is_connectivity_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"homeworks": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_millis(100))
        .fetch(0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(!err.message().contains(TOKEN));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connectivity_error() {
    // Nothing listens on the discard port
    let client =
        PracticumClient::new("http://127.0.0.1:9/", TOKEN, Duration::from_secs(2)).unwrap();
    let err = client.fetch(0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(err.message().contains("endpoint=http://127.0.0.1:9/"));
}
