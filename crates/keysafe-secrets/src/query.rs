//! Provider-neutral keychain queries.
//!
//! A [`Query`] is the attribute set handed to a [`crate::SecretProvider`]
//! primitive. Queries are built from a key, the store configuration and a
//! match mode; building never fails and has no side effects.

use std::fmt;

use keysafe_core::Accessibility;

use crate::types::{SecretKey, StoreConfiguration};

/// Keychain item class. Secrets are always stored as generic passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemClass {
    GenericPassword,
}

/// How a query constrains the synchronization attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMatch {
    /// Attribute absent: only local (non-synchronizable) items match.
    Omitted,
    /// Only synchronizable items match.
    Required,
    /// Items match regardless of their sync state.
    Any,
}

/// Whether lookups pin the sync attribute to the configuration or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchMode {
    Strict,
    Any,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Strict => f.write_str("strict"),
            MatchMode::Any => f.write_str("any"),
        }
    }
}

/// Attribute set for one provider call.
#[derive(Clone, PartialEq, Eq)]
pub struct Query {
    pub class: ItemClass,
    /// Service attribute.
    pub namespace: String,
    /// Account attribute.
    pub name: String,
    pub sharing_group: Option<String>,
    pub accessibility: Accessibility,
    pub sync: SyncMatch,
    /// Limit results to a single item.
    pub match_limit_one: bool,
    /// Ask the provider to return the payload with the result.
    pub return_data: bool,
    /// Payload to write (add only).
    pub data: Option<Vec<u8>>,
}

impl Query {
    pub(crate) fn build(key: &SecretKey, config: &StoreConfiguration, mode: MatchMode) -> Self {
        let sync = match mode {
            MatchMode::Strict if config.synchronizable() => SyncMatch::Required,
            MatchMode::Strict => SyncMatch::Omitted,
            MatchMode::Any => SyncMatch::Any,
        };

        Self {
            class: ItemClass::GenericPassword,
            namespace: key.namespace().to_string(),
            name: key.name().to_string(),
            sharing_group: config.sharing_group().map(str::to_string),
            accessibility: config.accessibility(),
            sync,
            match_limit_one: false,
            return_data: false,
            data: None,
        }
    }

    /// Turn this into a single-item lookup that returns the payload.
    pub(crate) fn fetching(mut self) -> Self {
        self.match_limit_one = true;
        self.return_data = true;
        self
    }

    /// Attach the payload for an add.
    pub(crate) fn with_data(mut self, payload: &[u8]) -> Self {
        self.data = Some(payload.to_vec());
        self
    }
}

// Payload bytes stay out of logs.
impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("class", &self.class)
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("sharing_group", &self.sharing_group)
            .field("accessibility", &self.accessibility)
            .field("sync", &self.sync)
            .field("match_limit_one", &self.match_limit_one)
            .field("return_data", &self.return_data)
            .field("data", &self.data.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
