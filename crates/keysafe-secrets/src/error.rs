//! Error types for keychain operations.

use thiserror::Error;

/// Semantic failures raised by keychain operations.
///
/// Every status the platform can report collapses into one of these cases;
/// anything without a dedicated variant keeps its raw code in `Unexpected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeychainError {
    #[error("Keychain item not found")]
    NotFound,

    #[error("Keychain item already exists")]
    DuplicateItem,

    #[error("Keychain returned a payload that is not raw bytes")]
    UnexpectedPayloadShape,

    #[error("Unexpected keychain status: {0}")]
    Unexpected(i32),
}

/// Convenience result alias for keychain operations.
pub type Result<T> = std::result::Result<T, KeychainError>;

/// Errors from the structured-value helpers.
///
/// Store failures pass through untouched in `Store`; encoding failures are
/// kept apart so callers can tell a broken keychain from a bad value.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error(transparent)]
    Store(#[from] KeychainError),

    #[error("Failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize value: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("Stored value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
