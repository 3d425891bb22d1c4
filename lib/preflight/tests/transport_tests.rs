//! Integration tests for `HyperTransport` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use preflight::{
    ConfigOverrides, HyperTransport, MemoryCache, Method, Pipeline, Platform, RequestConfig,
    Transport, json,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

fn config(overrides: ConfigOverrides) -> RequestConfig {
    RequestConfig::default().merge(overrides)
}

#[tokio::test]
async fn test_get_sends_data_as_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("q", "ali ce"))
        .and(header("X-Trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let config = config(
        ConfigOverrides::new()
            .url(format!("{}/users", mock_server.uri()))
            .header("X-Trace", "abc")
            .data(json!({"page": 2, "q": "ali ce"})),
    );

    let response = transport.request(&config).await.expect("response");

    assert!(response.is_success());
    assert_eq!(response.data(), &json!([{"id": 1}]));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Bob"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42, "name": "Bob"})))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let config = config(
        ConfigOverrides::new()
            .method(Method::Post)
            .url(format!("{}/users", mock_server.uri()))
            .data(json!({"name": "Bob"})),
    );

    let response = transport.request(&config).await.expect("response");

    assert_eq!(response.status(), 201);
    assert_eq!(response.data()["id"], json!(42));
}

#[tokio::test]
async fn test_string_data_is_sent_raw() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/notes/1"))
        .and(body_string("hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let config = config(
        ConfigOverrides::new()
            .method(Method::Put)
            .url(format!("{}/notes/1", mock_server.uri()))
            .data(json!("hello")),
    );

    let response = transport.request(&config).await.expect("response");

    // non-JSON bodies decode to a string payload
    assert_eq!(response.data(), &json!("saved"));
}

#[tokio::test]
async fn test_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "r-1")
                .set_body_json(json!({"error": "not found"})),
        )
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::new();
    let config = config(ConfigOverrides::new().url(format!("{}/missing", mock_server.uri())));

    let response = transport.request(&config).await.expect("response");

    assert!(!response.is_success());
    assert_eq!(response.status(), 404);
    assert_eq!(response.header("x-request-id"), Some("r-1"));
    assert_eq!(response.data(), &json!({"error": "not found"}));
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let config = config(ConfigOverrides::new().url(mock_server.uri()));

    let err = transport.request(&config).await.expect_err("timeout");

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(4096)))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder().max_response_body(1024).build();
    let config = config(ConfigOverrides::new().url(format!("{}/export", mock_server.uri())));

    let err = transport.request(&config).await.expect_err("too large");

    assert!(err.is_body_too_large());
}

#[tokio::test]
async fn test_default_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("User-Agent", "preflight-tests"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder()
        .user_agent(Some("preflight-tests".to_string()))
        .build();
    let config = config(ConfigOverrides::new().url(mock_server.uri()));

    let response = transport.request(&config).await.expect("response");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_connection_refused() {
    let transport = HyperTransport::builder()
        .connect_timeout(Duration::from_secs(1))
        .build();
    let config = config(ConfigOverrides::new().url("http://127.0.0.1:1/"));

    let err = transport.request(&config).await.expect_err("refused");

    assert!(err.is_connection());
}

#[tokio::test]
async fn test_pipeline_with_default_guards() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("Authorization", "Bearer t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Alice"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let pipeline = Pipeline::builder()
        .with_default_guards(&Platform::headless(Arc::clone(&cache)).login_path("/login"))
        .build();

    let overrides = || {
        ConfigOverrides::new()
            .url(format!("{}/profile", mock_server.uri()))
            .header("Authorization", "Bearer t-1")
            .show_loading(true)
    };

    // no cached token: blocked before any network traffic
    assert_eq!(pipeline.run_task(Some(overrides())).await, None);

    cache.insert("USER_INFO", json!({"token": "t-1"}));
    let profile = pipeline.run_task(Some(overrides())).await;

    assert_eq!(profile, Some(json!({"name": "Alice"})));
}
