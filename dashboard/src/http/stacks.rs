//! Stack status API client

use std::fmt;

use stacks_api::StackStatus;
use tracing::{debug, warn};

use crate::errors::FetchError;
use crate::http::client::HttpClient;
use crate::models::Snapshot;

/// Path segment of the stack status listing on the SwarmCD server
pub const STACKS_SEGMENT: &str = "stacks";

/// Per-stack artifacts served next to the status listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The compose file as committed in the repository
    Compose,
    /// The compose file after template rendering
    Rendered,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Compose => "compose.yaml",
            ArtifactKind::Rendered => "rendered.yaml",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Parse a `GET /stacks` body into a snapshot
///
/// The server encodes "no stacks" as `null`.
pub fn decode_snapshot(body: &str) -> Result<Snapshot, FetchError> {
    let records: Option<Vec<StackStatus>> = serde_json::from_str(body)?;
    let snapshot = Snapshot::new(records.unwrap_or_default());

    let duplicates = snapshot.duplicate_names();
    if !duplicates.is_empty() {
        warn!("Snapshot contains duplicate stack names: {:?}", duplicates);
    }

    Ok(snapshot)
}

impl HttpClient {
    /// Fetch the current status of every managed stack
    pub async fn fetch_stacks(&self) -> Result<Snapshot, FetchError> {
        let url = self.endpoint(&[STACKS_SEGMENT])?;
        let body = self.get_text(url, "application/json").await?;
        let snapshot = decode_snapshot(&body)?;
        debug!("Fetched {} stack statuses", snapshot.len());
        Ok(snapshot)
    }

    /// Fetch a stack's compose or rendered file
    pub async fn fetch_artifact(
        &self,
        stack_name: &str,
        kind: ArtifactKind,
    ) -> Result<String, FetchError> {
        let url = self.endpoint(&[STACKS_SEGMENT, stack_name, kind.file_name()])?;
        self.get_text(url, "application/yaml, text/plain").await
    }
}
