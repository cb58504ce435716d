//! Type-safe access to the platform keychain for Keysafe.
//!
//! Secrets are addressed by a [`SecretKey`] (namespace + name) and stored
//! under a [`StoreConfiguration`] that fixes their accessibility, sharing
//! group and sync policy. The [`Keychain`] facade translates each call into
//! one or two primitive operations against a [`SecretProvider`], retrying
//! lookups that miss under strict sync matching with permissive matching.

pub mod error;
pub mod provider;
pub mod query;
pub mod runtime;
pub mod status;
pub mod store;
pub mod types;
pub mod value;

pub use error::{KeychainError, Result, ValueError};
pub use keysafe_core::{Accessibility, SecretBytes};
pub use provider::{default_provider, DefaultProvider, FetchedValue, MemoryProvider, SecretProvider};
pub use query::{ItemClass, Query, SyncMatch};
pub use runtime::{AsyncKeychain, AsyncSecretStore, BlockingError};
pub use status::ProviderStatus;
pub use store::{Keychain, SecretStore};
pub use types::{InvalidKey, SecretKey, StoreConfiguration};
pub use value::SecretStoreExt;

#[cfg(target_os = "macos")]
pub use provider::SystemKeychain;
