//! Configuration loading and persistence.

use super::Config;
use crate::env::{self, vars};
use crate::error::ConfigError;
use std::fs;
use std::path::Path;
use tracing::warn;

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `KEYSAFE_*` environment overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(ns) = env::get_var(vars::KEYSAFE_NAMESPACE) {
            self.default_namespace = Some(ns);
        }
        if let Some(level) = env::get_var(vars::KEYSAFE_ACCESSIBILITY) {
            self.store.accessibility = level.parse().map_err(ConfigError::Validation)?;
        }
        if let Some(group) = env::get_var(vars::KEYSAFE_SHARING_GROUP) {
            self.store.sharing_group = Some(group);
        }
        if let Some(sync) = env::parse_bool(vars::KEYSAFE_SYNCHRONIZABLE) {
            self.store.synchronizable = sync;
        }
        Ok(())
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(ns) = &self.default_namespace {
            if ns.trim().is_empty() {
                errors.push("default_namespace must not be empty".to_string());
            } else if ns.contains('/') {
                errors.push(format!("default_namespace '{ns}' must not contain '/'"));
            }
        }

        if let Some(group) = &self.store.sharing_group {
            if group.trim().is_empty() {
                errors.push("store.sharing_group must not be empty when set".to_string());
            }
        }

        // Not an error: the store downgrades the flag when it is built.
        if self.store.synchronizable && self.store.accessibility.is_device_only() {
            warn!(
                accessibility = %self.store.accessibility,
                "store.synchronizable is ignored for device-only accessibility"
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}
