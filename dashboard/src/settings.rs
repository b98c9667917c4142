//! Settings file management

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::options::{AppOptions, ServerOptions, SourceOptions};
use crate::errors::DashboardError;
use crate::filesys::file::File;
use crate::logs::{LogLevel, LogOptions};
use crate::workers::poller;

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,

    /// Also write logs to daily files in this directory
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// SwarmCD server configuration
    #[serde(default)]
    pub source: SourceSettings,

    /// Polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Enable local HTTP server
    #[serde(default = "default_true")]
    pub enable_socket_server: bool,

    /// Local HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,
}

fn default_true() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    poller::DEFAULT_POLL_INTERVAL.as_secs()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            log_dir: None,
            source: SourceSettings::default(),
            poll_interval_secs: default_poll_interval(),
            enable_socket_server: true,
            server: ServerSettings::default(),
        }
    }
}

/// SwarmCD server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Base URL of the SwarmCD server
    #[serde(default = "default_source_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_source_url() -> String {
    SourceOptions::default().base_url
}

fn default_timeout() -> u64 {
    SourceOptions::default().timeout.as_secs()
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: default_source_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Local HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    ServerOptions::default().host
}

fn default_server_port() -> u16 {
    ServerOptions::default().port
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub async fn load(path: &Path) -> Result<Self, DashboardError> {
        let settings: Settings = File::new(path)
            .read_json()
            .await
            .with_context(|| format!("reading settings from {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), DashboardError> {
        let url = Url::parse(&self.source.base_url).map_err(|e| {
            DashboardError::ConfigError(format!("invalid source.base_url {}: {}", self.source.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DashboardError::ConfigError(format!(
                "source.base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(DashboardError::ConfigError(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(DashboardError::ConfigError(
                "source.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            json_format: self.log_json,
            log_dir: self.log_dir.clone(),
            ..Default::default()
        }
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            source: SourceOptions {
                base_url: self.source.base_url.clone(),
                timeout: Duration::from_secs(self.source.timeout_secs),
            },
            enable_socket_server: self.enable_socket_server,
            server: ServerOptions {
                host: self.server.host.clone(),
                port: self.server.port,
            },
            poller: poller::Options {
                interval: Duration::from_secs(self.poll_interval_secs),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
