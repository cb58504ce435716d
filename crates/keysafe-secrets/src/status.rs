//! Translation of provider status codes into [`KeychainError`].
//!
//! Codes follow Apple's `OSStatus` numbering, which every provider in this
//! crate reports, so the rest of the crate never sees raw numbers.

use std::fmt;

use crate::error::{KeychainError, Result};
use crate::provider::FetchedValue;

/// Raw status code returned by a provider primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderStatus(pub i32);

impl ProviderStatus {
    /// `errSecSuccess`
    pub const SUCCESS: Self = Self(0);
    /// `errSecParam`: malformed query.
    pub const PARAM: Self = Self(-50);
    /// `errSecDuplicateItem`
    pub const DUPLICATE_ITEM: Self = Self(-25299);
    /// `errSecItemNotFound`
    pub const ITEM_NOT_FOUND: Self = Self(-25300);

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Map this status onto the error taxonomy.
    pub fn check(self) -> Result<()> {
        match self {
            Self::SUCCESS => Ok(()),
            Self::ITEM_NOT_FOUND => Err(KeychainError::NotFound),
            Self::DUPLICATE_ITEM => Err(KeychainError::DuplicateItem),
            Self(code) => Err(KeychainError::Unexpected(code)),
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProviderStatus {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// Map the outcome of a fetch: the status first, then the payload shape.
pub(crate) fn check_fetch(status: ProviderStatus, value: Option<FetchedValue>) -> Result<Vec<u8>> {
    status.check()?;
    match value {
        Some(FetchedValue::Data(bytes)) => Ok(bytes),
        Some(FetchedValue::Other(kind)) => {
            tracing::debug!(kind, "fetch returned a non-data value");
            Err(KeychainError::UnexpectedPayloadShape)
        }
        None => Err(KeychainError::UnexpectedPayloadShape),
    }
}
