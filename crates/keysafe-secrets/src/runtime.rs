//! Async access to a blocking [`SecretStore`].
//!
//! Keychain calls block the calling thread. [`AsyncKeychain`] moves each call
//! onto tokio's blocking pool so async code can await it. It adds no timeout
//! or cancellation of its own: a call that has started runs to completion.

use std::sync::Arc;

use async_trait::async_trait;
use keysafe_core::SecretBytes;
use thiserror::Error;

use crate::error::KeychainError;
use crate::store::SecretStore;
use crate::types::SecretKey;

/// Errors from [`AsyncSecretStore`] calls.
#[derive(Debug, Error)]
pub enum BlockingError {
    #[error(transparent)]
    Store(#[from] KeychainError),

    #[error("Keychain task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Async counterpart of [`SecretStore`].
#[async_trait]
pub trait AsyncSecretStore: Send + Sync {
    async fn set(&self, key: SecretKey, payload: Vec<u8>) -> Result<(), BlockingError>;

    async fn get(&self, key: SecretKey) -> Result<Option<SecretBytes>, BlockingError>;

    async fn delete(&self, key: SecretKey) -> Result<(), BlockingError>;

    async fn contains(&self, key: SecretKey) -> Result<bool, BlockingError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Wraps a [`SecretStore`] for use from async code.
pub struct AsyncKeychain<S> {
    inner: Arc<S>,
}

impl<S> Clone for AsyncKeychain<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SecretStore + 'static> AsyncKeychain<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { inner: store }
    }

    /// The wrapped blocking store.
    pub fn blocking(&self) -> &S {
        &self.inner
    }

    async fn run<T, F>(&self, f: F) -> Result<T, BlockingError>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T, KeychainError> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        let result = tokio::task::spawn_blocking(move || f(store.as_ref())).await?;
        Ok(result?)
    }
}

#[async_trait]
impl<S: SecretStore + 'static> AsyncSecretStore for AsyncKeychain<S> {
    async fn set(&self, key: SecretKey, payload: Vec<u8>) -> Result<(), BlockingError> {
        self.run(move |store| store.set(&key, &payload)).await
    }

    async fn get(&self, key: SecretKey) -> Result<Option<SecretBytes>, BlockingError> {
        self.run(move |store| store.get(&key)).await
    }

    async fn delete(&self, key: SecretKey) -> Result<(), BlockingError> {
        self.run(move |store| store.delete(&key)).await
    }
}
