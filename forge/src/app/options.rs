//! Application configuration options

use std::time::Duration;

use crate::logs::LogOptions;
use crate::storage::settings::{BackendSettings, Settings};
use crate::ui::notify::DEFAULT_NOTIFICATION_TIMEOUT;
use crate::ui::terminal::TerminalTheme;

/// Main application options
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Backend endpoints
    pub backend: BackendSettings,

    /// Logging configuration
    pub log: LogOptions,

    /// Form controller configuration
    pub controller: ControllerOptions,

    /// Terminal look
    pub theme: TerminalTheme,
}

impl AppOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            backend: settings.backend.clone(),
            log: LogOptions {
                log_level: settings.log_level.clone(),
                log_dir: settings.log_dir.clone(),
                json_format: settings.json_logs,
                ..Default::default()
            },
            controller: ControllerOptions {
                notification_timeout: settings.notification_timeout(),
            },
            theme: TerminalTheme::default(),
        }
    }
}

/// Form controller options
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// How long a notification stays up
    pub notification_timeout: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }
}
