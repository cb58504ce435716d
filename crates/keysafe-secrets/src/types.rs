//! Identifier and configuration value types.

use keysafe_core::config::StoreSettings;
use keysafe_core::Accessibility;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Identifies one stored secret: a namespace plus a name within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SecretKey {
    namespace: String,
    name: String,
}

impl SecretKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse `namespace/name`, or a bare `name` placed in `default_namespace`.
    ///
    /// The split happens on the last `/`, so namespaces may themselves contain
    /// slashes while names may not.
    pub fn parse_with_default(
        input: &str,
        default_namespace: Option<&str>,
    ) -> std::result::Result<Self, InvalidKey> {
        match input.rsplit_once('/') {
            Some(_) => input.parse(),
            None => {
                let namespace = default_namespace.ok_or_else(|| {
                    InvalidKey::new(input, "no namespace given and no default namespace configured")
                })?;
                Self::checked(namespace, input, input)
            }
        }
    }

    fn checked(namespace: &str, name: &str, input: &str) -> std::result::Result<Self, InvalidKey> {
        if namespace.is_empty() {
            return Err(InvalidKey::new(input, "namespace must not be empty"));
        }
        if name.is_empty() {
            return Err(InvalidKey::new(input, "name must not be empty"));
        }
        Ok(Self::new(namespace, name))
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

impl FromStr for SecretKey {
    type Err = InvalidKey;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (namespace, name) = s
            .rsplit_once('/')
            .ok_or_else(|| InvalidKey::new(s, "expected 'namespace/name'"))?;
        Self::checked(namespace, name, s)
    }
}

/// A textual key that could not be turned into a [`SecretKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid secret key '{input}': {reason}")]
pub struct InvalidKey {
    input: String,
    reason: &'static str,
}

impl InvalidKey {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Item policy shared by every operation of one store.
///
/// Device-only accessibility never syncs: asking for both yields a
/// configuration whose effective `synchronizable` is `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfiguration {
    accessibility: Accessibility,
    sharing_group: Option<String>,
    synchronizable: bool,
}

impl StoreConfiguration {
    pub fn new(
        accessibility: Accessibility,
        sharing_group: Option<String>,
        synchronizable: bool,
    ) -> Self {
        let synchronizable = if synchronizable && accessibility.is_device_only() {
            warn!(
                %accessibility,
                "synchronizable requested with device-only accessibility; sync disabled"
            );
            false
        } else {
            synchronizable
        };

        Self {
            accessibility,
            sharing_group,
            synchronizable,
        }
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn sharing_group(&self) -> Option<&str> {
        self.sharing_group.as_deref()
    }

    /// Effective sync flag, after the device-only correction.
    pub fn synchronizable(&self) -> bool {
        self.synchronizable
    }
}

impl Default for StoreConfiguration {
    fn default() -> Self {
        Self::new(Accessibility::default(), None, false)
    }
}

impl From<&StoreSettings> for StoreConfiguration {
    fn from(settings: &StoreSettings) -> Self {
        Self::new(
            settings.accessibility,
            settings.sharing_group.clone(),
            settings.synchronizable,
        )
    }
}
