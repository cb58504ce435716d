//! Configuration schema definitions.

use crate::types::Accessibility;
use serde::{Deserialize, Serialize};

/// Main Keysafe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Namespace used when a key is given without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,

    /// Keychain item policy.
    #[serde(default)]
    pub store: StoreSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keychain item policy applied to every operation of one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// When stored items may be read.
    #[serde(default)]
    pub accessibility: Accessibility,

    /// Keychain access group shared between applications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing_group: Option<String>,

    /// Whether items take part in account-level sync.
    #[serde(default)]
    pub synchronizable: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
