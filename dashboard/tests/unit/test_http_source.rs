//! HTTP status source tests

use axum::{http::StatusCode, routing::get, Router};
use swarmcd_dashboard::errors::FetchError;
use swarmcd_dashboard::http::client::HttpClient;
use swarmcd_dashboard::http::stacks::ArtifactKind;
use swarmcd_dashboard::sync::StatusSource;
use tokio_test::{assert_err, assert_ok};

use crate::support::{names, spawn_upstream};

const STACKS_JSON: &str = r#"[
    {"Name":"Boobaz","Error":"Oh no!!!","Revision":"2.0.0","RepoURL":"https://www.url3.com"},
    {"Name":"FooFoo","Error":"","Revision":"2.0.0","RepoURL":"https://www.url2.com"},
    {"Name":"Foobar","Error":"","Revision":"1.0.0","RepoURL":"https://www.url1.com","TemplatePath":"foobar/compose.tmpl.yaml"}
]"#;

async fn client_for(router: Router) -> HttpClient {
    let addr = spawn_upstream(router).await;
    HttpClient::new(&format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn test_fetch_snapshot_success() {
    let client = client_for(Router::new().route("/stacks", get(|| async { STACKS_JSON }))).await;

    let snapshot = assert_ok!(client.fetch_snapshot().await);
    assert_eq!(names(&snapshot), vec!["Boobaz", "FooFoo", "Foobar"]);
    assert_eq!(snapshot[2].template_path, "foobar/compose.tmpl.yaml");
    assert_eq!(snapshot[2].compose_path, "");
}

#[tokio::test]
async fn test_fetch_snapshot_null_body() {
    let client = client_for(Router::new().route("/stacks", get(|| async { "null" }))).await;

    let snapshot = assert_ok!(client.fetch_snapshot().await);
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let client = client_for(Router::new().route(
        "/stacks",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "repos not ready") }),
    ))
    .await;

    let err = assert_err!(client.fetch_snapshot().await);
    match err {
        FetchError::Transport(message) => {
            assert!(message.contains("503"), "{}", message);
            assert!(message.contains("repos not ready"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let client = client_for(Router::new().route(
        "/stacks",
        get(|| async { r#"[{"Name":"web","Revision":1}]"# }),
    ))
    .await;

    let err = assert_err!(client.fetch_snapshot().await);
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(&format!("http://{}", addr)).unwrap();
    let err = assert_err!(client.fetch_snapshot().await);
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_artifacts() {
    let client = client_for(
        Router::new()
            .route("/stacks/{name}/compose.yaml", get(|| async { "services: {}\n" }))
            .route("/stacks/{name}/rendered.yaml", get(|| async { "services:\n  web: {}\n" })),
    )
    .await;

    let compose = assert_ok!(client.fetch_artifact("web", ArtifactKind::Compose).await);
    assert_eq!(compose, "services: {}\n");

    let rendered = assert_ok!(client.fetch_artifact("web", ArtifactKind::Rendered).await);
    assert!(rendered.contains("web"));
}

#[tokio::test]
async fn test_fetch_artifact_not_found() {
    let client = client_for(Router::new()).await;

    let err = assert_err!(client.fetch_artifact("ghost", ArtifactKind::Rendered).await);
    assert!(matches!(err, FetchError::Transport(ref m) if m.starts_with("404")));
}
