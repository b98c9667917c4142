//! Application configuration options

use std::time::Duration;

use crate::http::client::DEFAULT_TIMEOUT;
use crate::workers::poller;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Lifecycle configuration
    pub lifecycle: LifecycleOptions,

    /// Status source configuration
    pub source: SourceOptions,

    /// Enable local HTTP server
    pub enable_socket_server: bool,

    /// Server configuration
    pub server: ServerOptions,

    /// Poller worker options
    pub poller: poller::Options,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleOptions::default(),
            source: SourceOptions::default(),
            enable_socket_server: true,
            server: ServerOptions::default(),
            poller: poller::Options::default(),
        }
    }
}

/// Lifecycle options for the dashboard
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            max_shutdown_delay: Duration::from_secs(10),
        }
    }
}

/// SwarmCD status server options
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Base URL of the SwarmCD server
    pub base_url: String,

    /// Transport timeout for one status request
    pub timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Local HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8081,
        }
    }
}
