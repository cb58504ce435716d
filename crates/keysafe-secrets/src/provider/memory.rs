//! In-process secret provider.
//!
//! Mirrors the matching rules of the Apple keychain closely enough to stand
//! in for it in tests and on platforms without a system keychain:
//!
//! - an omitted sync attribute matches local items only
//! - sharing group and accessibility constrain a lookup only when present
//! - uniqueness is per namespace, name, sharing group and sync state, so a
//!   local and a synchronizable copy of the same key can coexist

use keysafe_core::Accessibility;
use parking_lot::Mutex;
use tracing::trace;

use super::{FetchedValue, SecretProvider};
use crate::query::{ItemClass, Query, SyncMatch};
use crate::status::ProviderStatus;

#[derive(Clone)]
struct StoredItem {
    class: ItemClass,
    namespace: String,
    name: String,
    sharing_group: Option<String>,
    accessibility: Accessibility,
    synchronizable: bool,
    data: Vec<u8>,
}

impl StoredItem {
    fn matches(&self, query: &Query) -> bool {
        if self.class != query.class || self.namespace != query.namespace || self.name != query.name
        {
            return false;
        }
        if let Some(group) = &query.sharing_group {
            if self.sharing_group.as_ref() != Some(group) {
                return false;
            }
        }
        if self.accessibility != query.accessibility {
            return false;
        }
        match query.sync {
            SyncMatch::Omitted => !self.synchronizable,
            SyncMatch::Required => self.synchronizable,
            SyncMatch::Any => true,
        }
    }

    fn same_slot(&self, other: &StoredItem) -> bool {
        self.class == other.class
            && self.namespace == other.namespace
            && self.name == other.name
            && self.sharing_group == other.sharing_group
            && self.synchronizable == other.synchronizable
    }
}

/// A thread-safe, non-persistent [`SecretProvider`].
#[derive(Default)]
pub struct MemoryProvider {
    items: Mutex<Vec<StoredItem>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items across all namespaces.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl SecretProvider for MemoryProvider {
    fn add(&self, query: &Query) -> ProviderStatus {
        let synchronizable = match query.sync {
            SyncMatch::Omitted => false,
            SyncMatch::Required => true,
            // "any" is a lookup constraint, not an attribute value
            SyncMatch::Any => return ProviderStatus::PARAM,
        };
        let Some(data) = query.data.clone() else {
            return ProviderStatus::PARAM;
        };

        let item = StoredItem {
            class: query.class,
            namespace: query.namespace.clone(),
            name: query.name.clone(),
            sharing_group: query.sharing_group.clone(),
            accessibility: query.accessibility,
            synchronizable,
            data,
        };

        let mut items = self.items.lock();
        if items.iter().any(|existing| existing.same_slot(&item)) {
            trace!(namespace = %query.namespace, name = %query.name, "add: duplicate");
            return ProviderStatus::DUPLICATE_ITEM;
        }
        items.push(item);
        ProviderStatus::SUCCESS
    }

    fn update(&self, query: &Query, payload: &[u8]) -> ProviderStatus {
        let mut items = self.items.lock();
        let mut updated = 0usize;
        for item in items.iter_mut().filter(|item| item.matches(query)) {
            item.data = payload.to_vec();
            updated += 1;
        }
        trace!(namespace = %query.namespace, name = %query.name, updated, "update");

        if updated == 0 {
            ProviderStatus::ITEM_NOT_FOUND
        } else {
            ProviderStatus::SUCCESS
        }
    }

    fn copy_matching(&self, query: &Query) -> (ProviderStatus, Option<FetchedValue>) {
        let items = self.items.lock();
        match items.iter().find(|item| item.matches(query)) {
            Some(item) if query.return_data => (
                ProviderStatus::SUCCESS,
                Some(FetchedValue::Data(item.data.clone())),
            ),
            Some(_) => (ProviderStatus::SUCCESS, Some(FetchedValue::Other("attributes"))),
            None => (ProviderStatus::ITEM_NOT_FOUND, None),
        }
    }

    fn delete(&self, query: &Query) -> ProviderStatus {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| !item.matches(query));
        let removed = before - items.len();
        trace!(namespace = %query.namespace, name = %query.name, removed, "delete");

        if removed == 0 {
            ProviderStatus::ITEM_NOT_FOUND
        } else {
            ProviderStatus::SUCCESS
        }
    }
}
