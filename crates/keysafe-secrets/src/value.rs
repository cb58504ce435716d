//! Structured-value helpers layered on the byte-level store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ValueError;
use crate::store::SecretStore;
use crate::types::SecretKey;

/// JSON and text convenience methods for every [`SecretStore`].
pub trait SecretStoreExt: SecretStore {
    /// Serialize `value` as JSON and store it under `key`.
    fn set_value<T: Serialize + ?Sized>(&self, key: &SecretKey, value: &T) -> Result<(), ValueError> {
        let bytes = serde_json::to_vec(value).map_err(ValueError::Serialize)?;
        self.set(key, &bytes)?;
        Ok(())
    }

    /// Read and deserialize the JSON value stored under `key`.
    fn get_value<T: DeserializeOwned>(&self, key: &SecretKey) -> Result<Option<T>, ValueError> {
        match self.get(key)? {
            Some(bytes) => serde_json::from_slice(bytes.expose_secret())
                .map(Some)
                .map_err(ValueError::Deserialize),
            None => Ok(None),
        }
    }

    /// Store `value` as UTF-8 text.
    fn set_string(&self, key: &SecretKey, value: &str) -> Result<(), ValueError> {
        self.set(key, value.as_bytes())?;
        Ok(())
    }

    /// Read the value stored under `key` as UTF-8 text.
    fn get_string(&self, key: &SecretKey) -> Result<Option<String>, ValueError> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes.expose_secret().to_vec())?)),
            None => Ok(None),
        }
    }
}

impl<S: SecretStore + ?Sized> SecretStoreExt for S {}
