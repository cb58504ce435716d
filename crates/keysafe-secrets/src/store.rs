//! The keychain facade.
//!
//! Defines the [`SecretStore`] trait and [`Keychain`], which implements it on
//! top of any [`SecretProvider`].
//!
//! Every operation first queries in strict mode, where the sync attribute is
//! pinned to the configuration. A strict miss is retried once in permissive
//! mode so items written under a different sync policy are still found:
//!
//! | op       | strict miss                  | permissive attempt fails  |
//! |----------|------------------------------|---------------------------|
//! | `set`    | add (no permissive attempt)  | -                         |
//! | `get`    | fetch in permissive mode     | treated as absent         |
//! | `delete` | delete in permissive mode    | ignored                   |
//!
//! Any other strict-mode error is returned as is, without a second attempt.

use std::sync::Arc;

use keysafe_core::SecretBytes;
use tracing::debug;

use crate::error::{KeychainError, Result};
use crate::provider::{default_provider, DefaultProvider, SecretProvider};
use crate::query::{MatchMode, Query};
use crate::status::check_fetch;
use crate::types::{SecretKey, StoreConfiguration};

/// Byte-level secret storage.
pub trait SecretStore: Send + Sync {
    /// Store `payload` under `key`, replacing any existing value.
    fn set(&self, key: &SecretKey, payload: &[u8]) -> Result<()>;

    /// Read the payload stored under `key`; `None` if there is none.
    fn get(&self, key: &SecretKey) -> Result<Option<SecretBytes>>;

    /// Remove the value stored under `key`. Succeeds if there is none.
    fn delete(&self, key: &SecretKey) -> Result<()>;

    /// Whether a value is stored under `key`.
    fn contains(&self, key: &SecretKey) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// A [`SecretStore`] backed by a keychain provider.
///
/// Holds no mutable state: one instance can be shared freely across threads.
pub struct Keychain<P = DefaultProvider> {
    provider: P,
    config: Arc<StoreConfiguration>,
}

impl Keychain<DefaultProvider> {
    /// Create a store on the platform's default provider.
    pub fn system(config: StoreConfiguration) -> Self {
        Self::new(default_provider(), config)
    }
}

impl<P: SecretProvider> Keychain<P> {
    pub fn new(provider: P, config: StoreConfiguration) -> Self {
        Self::with_shared_config(provider, Arc::new(config))
    }

    /// Create a store that shares its configuration with other stores.
    pub fn with_shared_config(provider: P, config: Arc<StoreConfiguration>) -> Self {
        Self { provider, config }
    }

    pub fn configuration(&self) -> &StoreConfiguration {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn query(&self, key: &SecretKey, mode: MatchMode) -> Query {
        Query::build(key, &self.config, mode)
    }

    fn fetch(&self, key: &SecretKey, mode: MatchMode) -> Result<Vec<u8>> {
        let query = self.query(key, mode).fetching();
        let (status, value) = self.provider.copy_matching(&query);
        debug!(namespace = key.namespace(), name = key.name(), %mode, %status, "fetch");
        check_fetch(status, value)
    }

    fn remove(&self, key: &SecretKey, mode: MatchMode) -> Result<()> {
        let status = self.provider.delete(&self.query(key, mode));
        debug!(namespace = key.namespace(), name = key.name(), %mode, %status, "delete");
        status.check()
    }
}

impl<P: SecretProvider> SecretStore for Keychain<P> {
    fn set(&self, key: &SecretKey, payload: &[u8]) -> Result<()> {
        let query = self.query(key, MatchMode::Strict);
        let status = self.provider.update(&query, payload);
        debug!(namespace = key.namespace(), name = key.name(), %status, "update");

        match status.check() {
            Ok(()) => Ok(()),
            Err(KeychainError::NotFound) => {
                let status = self.provider.add(&query.with_data(payload));
                debug!(namespace = key.namespace(), name = key.name(), %status, "add");
                status.check()
            }
            Err(e) => Err(e),
        }
    }

    fn get(&self, key: &SecretKey) -> Result<Option<SecretBytes>> {
        match self.fetch(key, MatchMode::Strict) {
            Ok(bytes) => Ok(Some(SecretBytes::new(bytes))),
            Err(KeychainError::NotFound) => match self.fetch(key, MatchMode::Any) {
                Ok(bytes) => Ok(Some(SecretBytes::new(bytes))),
                Err(e) => {
                    debug!(namespace = key.namespace(), name = key.name(), error = %e, "treating as absent");
                    Ok(None)
                }
            },
            Err(e) => Err(e),
        }
    }

    fn delete(&self, key: &SecretKey) -> Result<()> {
        match self.remove(key, MatchMode::Strict) {
            Ok(()) => Ok(()),
            Err(KeychainError::NotFound) => {
                if let Err(e) = self.remove(key, MatchMode::Any) {
                    debug!(namespace = key.namespace(), name = key.name(), error = %e, "nothing to delete");
                }
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
