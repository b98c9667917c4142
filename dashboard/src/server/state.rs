//! Server state

use std::sync::Arc;

use crate::http::client::HttpClient;
use crate::sync::controller::Controller;

/// Server state shared across handlers
pub struct ServerState {
    pub controller: Controller,
    pub http_client: Arc<HttpClient>,
}

impl ServerState {
    pub fn new(controller: Controller, http_client: Arc<HttpClient>) -> Self {
        Self {
            controller,
            http_client,
        }
    }
}
