//! Settings file management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::HostforgeError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[serde(default)]
    pub json_logs: bool,

    /// Directory for rolling log files; no file logging when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendSettings,

    /// How long a notification stays up before it is dismissed
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_notification_timeout() -> u64 {
    5
}

impl Settings {
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            log_dir: None,
            backend: BackendSettings::default(),
            notification_timeout_secs: default_notification_timeout(),
        }
    }
}

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL for the backend API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Path of the health check endpoint
    #[serde(default = "default_status_path")]
    pub status_path: String,

    /// Path of the deploy endpoint
    #[serde(default = "default_deploy_path")]
    pub deploy_path: String,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_status_path() -> String {
    "/status".to_string()
}

fn default_deploy_path() -> String {
    "/deploy".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            status_path: default_status_path(),
            deploy_path: default_deploy_path(),
        }
    }
}

/// Load settings from `file`, falling back to defaults when it does not exist
pub async fn load_settings(file: Option<&File>) -> Result<Settings, HostforgeError> {
    let Some(file) = file else {
        return Ok(Settings::default());
    };

    if !file.exists().await {
        debug!("Settings file {} not found, using defaults", file.path().display());
        return Ok(Settings::default());
    }

    file.read_json::<Settings>().await.map_err(|e| {
        HostforgeError::ConfigError(format!(
            "Unable to read settings file {}: {}",
            file.path().display(),
            e
        ))
    })
}
