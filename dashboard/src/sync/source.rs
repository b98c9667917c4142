//! Status sources the controller can poll

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::http::client::HttpClient;
use crate::models::Snapshot;

/// Something that can produce the current snapshot of stack statuses
///
/// Each call is an independent read with no side effects, so a source can
/// be shared freely between tasks.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError>;
}

#[async_trait]
impl StatusSource for HttpClient {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        self.fetch_stacks().await
    }
}
