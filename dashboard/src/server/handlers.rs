//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stacks_api::StackStatus;
use tracing::{debug, error};

use crate::filter::filter_statuses;
use crate::http::stacks::ArtifactKind;
use crate::server::state::ServerState;
use crate::sync::fsm::{CheckOutcome, DashboardView, SyncPhase};
use crate::utils::version_info;

/// Error body returned by the local server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "swarmcd-dashboard".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    Json(version_info())
}

/// Stack listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct StacksQuery {
    #[serde(default)]
    pub q: String,
}

/// Displayed stacks, filtered, plus the sync state around them
#[derive(Debug, Serialize)]
pub struct StacksResponse {
    pub phase: SyncPhase,
    pub stacks: Vec<StackStatus>,
    pub total: usize,
    pub error: Option<String>,
    pub update_available: bool,
    pub is_checking: bool,
    pub digest: Option<String>,
    pub displayed_at: Option<DateTime<Utc>>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl StacksResponse {
    fn from_view(view: DashboardView, query: &str) -> Self {
        let stacks = filter_statuses(&view.stacks, query)
            .into_iter()
            .cloned()
            .collect();

        Self {
            phase: view.phase,
            stacks,
            total: view.stacks.len(),
            error: view.error,
            update_available: view.update_available,
            is_checking: view.is_checking,
            digest: view.digest,
            displayed_at: view.displayed_at,
            last_checked_at: view.last_checked_at,
        }
    }
}

/// Stack listing handler
pub async fn stacks_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<StacksQuery>,
) -> impl IntoResponse {
    let view = state.controller.view();
    Json(StacksResponse::from_view(view, &query.q))
}

/// Check response
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    pub view: StacksResponse,
}

/// Check-for-update handler
pub async fn check_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let outcome = state.controller.check_for_update().await;
    debug!("Check requested over HTTP: {:?}", outcome);

    Json(CheckResponse {
        outcome,
        view: StacksResponse::from_view(state.controller.view(), ""),
    })
}

/// Apply response
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub applied: bool,
    pub view: StacksResponse,
}

/// Apply-update handler
pub async fn apply_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let applied = state.controller.apply_update();

    Json(ApplyResponse {
        applied,
        view: StacksResponse::from_view(state.controller.view(), ""),
    })
}

/// Compose file handler
pub async fn compose_handler(
    State(state): State<Arc<ServerState>>,
    Path(stack_name): Path<String>,
) -> impl IntoResponse {
    artifact(&state, &stack_name, ArtifactKind::Compose).await
}

/// Rendered compose file handler
pub async fn rendered_handler(
    State(state): State<Arc<ServerState>>,
    Path(stack_name): Path<String>,
) -> impl IntoResponse {
    artifact(&state, &stack_name, ArtifactKind::Rendered).await
}

async fn artifact(
    state: &ServerState,
    stack_name: &str,
    kind: ArtifactKind,
) -> axum::response::Response {
    match state.http_client.fetch_artifact(stack_name, kind).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/yaml")], body).into_response(),
        Err(e) => {
            error!("Failed to fetch {} for stack {}: {}", kind, stack_name, e);
            let body = ErrorResponse {
                error: "upstream_error".to_string(),
                message: e.to_string(),
            };
            (StatusCode::BAD_GATEWAY, Json(body)).into_response()
        }
    }
}
