//! Category listing against a mock backend.

use souk::api::{ApiClient, ApiError, Category};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_body() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "name": "Spices", "imageUrl": "http://cdn.example/spices.png" },
        { "id": 2, "name": "Rugs" }
    ])
}

/// Test: the stored token rides along as a bearer credential.
#[tokio::test]
async fn test_categories_attach_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let categories = api.categories(Some("tok-123")).await.unwrap();

    assert_eq!(
        categories,
        vec![
            Category {
                id: 1,
                name: "Spices".to_string(),
                image_url: Some("http://cdn.example/spices.png".to_string()),
            },
            Category {
                id: 2,
                name: "Rugs".to_string(),
                image_url: None,
            },
        ]
    );
}

/// Test: without a token no authorization header is sent at all.
#[tokio::test]
async fn test_categories_without_token_omit_header() {
    let server = MockServer::start().await;

    // Reject any request that carries an authorization header.
    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let categories = api.categories(None).await.unwrap();
    assert!(categories.is_empty());
}

/// Test: a non-2xx response comes back as an HTTP error with the body
/// message extracted.
#[tokio::test]
async fn test_categories_unauthorized_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "message": "Expired" })),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri());
    let err = api.categories(Some("stale")).await.unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Expired"));
        }
        ApiError::Network(_) => panic!("expected an HTTP error"),
    }
}
