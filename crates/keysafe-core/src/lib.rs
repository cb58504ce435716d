//! # keysafe-core
//!
//! Core types, configuration, and utilities for Keysafe.
//!
//! This crate provides shared functionality used across the Keysafe crates:
//!
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Types**: Accessibility levels shared by the config schema and the store
//! - **Utilities**: Path resolution, environment handling, zeroizing payloads

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretBytes;
pub use types::Accessibility;
