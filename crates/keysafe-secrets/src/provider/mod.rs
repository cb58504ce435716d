//! Secret providers: the platform services that actually persist items.
//!
//! A provider exposes the four keychain primitives and reports raw status
//! codes. It applies no retry or fallback policy of its own; that lives in
//! [`crate::Keychain`].

use std::fmt;
use std::sync::Arc;

use crate::query::Query;
use crate::status::ProviderStatus;

mod memory;
#[cfg(target_os = "macos")]
mod macos;

pub use memory::MemoryProvider;
#[cfg(target_os = "macos")]
pub use macos::SystemKeychain;

/// What a successful lookup handed back.
#[derive(Clone, PartialEq, Eq)]
pub enum FetchedValue {
    /// Raw payload bytes.
    Data(Vec<u8>),
    /// Anything else (attributes, references, ...), named for diagnostics.
    Other(&'static str),
}

impl fmt::Debug for FetchedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchedValue::Data(_) => f.write_str("Data([REDACTED])"),
            FetchedValue::Other(kind) => f.debug_tuple("Other").field(kind).finish(),
        }
    }
}

/// The four primitives of a platform secret store.
///
/// Implementations must be safe to call from many threads at once.
pub trait SecretProvider: Send + Sync {
    /// Create a new item from `query`, whose `data` holds the payload.
    fn add(&self, query: &Query) -> ProviderStatus;

    /// Replace the payload of every item matching `query`.
    fn update(&self, query: &Query, payload: &[u8]) -> ProviderStatus;

    /// Look up the item matching `query`.
    fn copy_matching(&self, query: &Query) -> (ProviderStatus, Option<FetchedValue>);

    /// Remove every item matching `query`.
    fn delete(&self, query: &Query) -> ProviderStatus;
}

impl<P: SecretProvider + ?Sized> SecretProvider for Arc<P> {
    fn add(&self, query: &Query) -> ProviderStatus {
        (**self).add(query)
    }

    fn update(&self, query: &Query, payload: &[u8]) -> ProviderStatus {
        (**self).update(query, payload)
    }

    fn copy_matching(&self, query: &Query) -> (ProviderStatus, Option<FetchedValue>) {
        (**self).copy_matching(query)
    }

    fn delete(&self, query: &Query) -> ProviderStatus {
        (**self).delete(query)
    }
}

/// Provider used by [`crate::Keychain::system`] on this platform.
#[cfg(target_os = "macos")]
pub type DefaultProvider = SystemKeychain;

/// Provider used by [`crate::Keychain::system`] on this platform.
#[cfg(not(target_os = "macos"))]
pub type DefaultProvider = MemoryProvider;

/// Build the platform's default provider.
///
/// On macOS this is the login keychain. Elsewhere no system keychain is
/// wired up yet, so an in-process store is returned and nothing persists
/// past the current process.
pub fn default_provider() -> DefaultProvider {
    #[cfg(target_os = "macos")]
    {
        SystemKeychain::new()
    }

    #[cfg(not(target_os = "macos"))]
    {
        tracing::warn!(
            "system keychain not available on this platform; secrets are kept in memory only"
        );
        MemoryProvider::new()
    }
}
