//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable as a boolean, or None if it is unset.
///
/// "1", "true", "yes" and "on" (any case) are true; any other value is false.
pub fn parse_bool(name: &str) -> Option<bool> {
    get_var(name).map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

/// Common environment variable names.
pub mod vars {
    /// Keysafe home directory override.
    pub const KEYSAFE_HOME: &str = "KEYSAFE_HOME";

    /// Keysafe config file override.
    pub const KEYSAFE_CONFIG: &str = "KEYSAFE_CONFIG";

    /// Keysafe log filter (tracing `EnvFilter` syntax).
    pub const KEYSAFE_LOG: &str = "KEYSAFE_LOG";

    /// Default namespace override.
    pub const KEYSAFE_NAMESPACE: &str = "KEYSAFE_NAMESPACE";

    /// Accessibility level override.
    pub const KEYSAFE_ACCESSIBILITY: &str = "KEYSAFE_ACCESSIBILITY";

    /// Sharing group override.
    pub const KEYSAFE_SHARING_GROUP: &str = "KEYSAFE_SHARING_GROUP";

    /// Synchronization flag override.
    pub const KEYSAFE_SYNCHRONIZABLE: &str = "KEYSAFE_SYNCHRONIZABLE";
}
