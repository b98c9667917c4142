//! Local HTTP server tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use swarmcd_dashboard::errors::FetchError;
use swarmcd_dashboard::http::client::HttpClient;
use swarmcd_dashboard::server::handlers::ErrorResponse;
use swarmcd_dashboard::server::serve::router;
use swarmcd_dashboard::server::state::ServerState;
use swarmcd_dashboard::sync::Controller;
use tower::ServiceExt;

use crate::support::{spawn_upstream, three_stacks, ScriptedSource};

fn app(source: ScriptedSource, upstream: &str) -> Router {
    let controller = Controller::new(Arc::new(source));
    let http_client = Arc::new(HttpClient::new(upstream).unwrap());
    router(Arc::new(ServerState::new(controller, http_client)))
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn stack_names(body: &Value) -> Vec<String> {
    body["stacks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["Name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = app(ScriptedSource::new(vec![]), "http://127.0.0.1:9");

    let (status, body) = send(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "swarmcd-dashboard");
}

#[tokio::test]
async fn test_stacks_before_first_check() {
    let app = app(ScriptedSource::new(vec![]), "http://127.0.0.1:9");

    let (status, body) = send(&app, "GET", "/stacks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "idle");
    assert_eq!(body["total"], 0);
    assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn test_check_filter_and_apply() {
    let mut next = three_stacks();
    next[1].revision = "2.1.0".to_string();
    let app = app(
        ScriptedSource::new(vec![Ok(three_stacks()), Ok(next)]),
        "http://127.0.0.1:9",
    );

    let (status, body) = send(&app, "POST", "/stacks/check").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "loaded");
    assert_eq!(body["view"]["total"], 3);

    let (_, body) = send(&app, "GET", "/stacks?q=2.0.0").await;
    assert_eq!(stack_names(&body), vec!["FooFoo", "Boobaz"]);
    assert_eq!(body["total"], 3);
    assert_eq!(body["phase"], "displaying");

    let (_, body) = send(&app, "POST", "/stacks/check").await;
    assert_eq!(body["outcome"], "update_available");
    assert_eq!(body["view"]["update_available"], true);

    // still showing the old revision
    let (_, body) = send(&app, "GET", "/stacks?q=2.1.0").await;
    assert!(stack_names(&body).is_empty());

    let (_, body) = send(&app, "POST", "/stacks/apply").await;
    assert_eq!(body["applied"], true);
    assert_eq!(body["view"]["update_available"], false);

    let (_, body) = send(&app, "GET", "/stacks?q=2.1.0").await;
    assert_eq!(stack_names(&body), vec!["FooFoo"]);

    let (_, body) = send(&app, "POST", "/stacks/apply").await;
    assert_eq!(body["applied"], false);
}

#[tokio::test]
async fn test_check_failure_reports_message() {
    let app = app(
        ScriptedSource::new(vec![Err(FetchError::Transport("connection refused".to_string()))]),
        "http://127.0.0.1:9",
    );

    let (status, body) = send(&app, "POST", "/stacks/check").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "failed");
    assert_eq!(body["message"], "Transport error: connection refused");
    assert_eq!(body["view"]["phase"], "error");
}

#[tokio::test]
async fn test_artifact_proxy() {
    let upstream = spawn_upstream(Router::new().route(
        "/stacks/{name}/rendered.yaml",
        get(|| async { "services:\n  web: {}\n" }),
    ))
    .await;
    let app = app(ScriptedSource::new(vec![]), &format!("http://{}", upstream));

    let request = Request::builder()
        .uri("/stacks/web/rendered.yaml")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"services:\n  web: {}\n");

    let (status, body) = send(&app, "GET", "/stacks/web/compose.yaml").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, "upstream_error");
    assert!(error.message.starts_with("Transport error: 404"));
}
