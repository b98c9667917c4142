//! Application state management

use std::sync::Arc;

use tracing::info;

use crate::app::options::SourceOptions;
use crate::errors::DashboardError;
use crate::http::client::HttpClient;
use crate::sync::controller::Controller;
use crate::sync::source::StatusSource;

/// Main application state
pub struct AppState {
    /// HTTP client for the SwarmCD server
    pub http_client: Arc<HttpClient>,

    /// Status synchronization controller
    pub controller: Controller,
}

impl AppState {
    /// Initialize application state
    pub fn init(options: &SourceOptions) -> Result<Self, DashboardError> {
        info!("Initializing application state...");

        let http_client = Arc::new(HttpClient::with_timeout(&options.base_url, options.timeout)?);
        let source: Arc<dyn StatusSource> = http_client.clone();
        let controller = Controller::new(source);

        Ok(Self {
            http_client,
            controller,
        })
    }

    /// Shutdown application state
    pub fn shutdown(&self) {
        info!("Shutting down application state...");
        self.controller.shutdown();
    }
}
