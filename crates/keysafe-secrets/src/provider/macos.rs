//! macOS keychain provider (Security.framework `SecItem*` API).

use std::ptr;

use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::data::CFData;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::{CFString, CFStringRef};
use keysafe_core::Accessibility;
use security_framework_sys::item::{
    kSecAttrAccount, kSecAttrService, kSecClass, kSecClassGenericPassword, kSecMatchLimit,
    kSecMatchLimitOne, kSecReturnData, kSecValueData,
};
use security_framework_sys::keychain_item::{
    SecItemAdd, SecItemCopyMatching, SecItemDelete, SecItemUpdate,
};
use tracing::debug;

use super::{FetchedValue, SecretProvider};
use crate::query::{ItemClass, Query, SyncMatch};
use crate::status::ProviderStatus;

#[link(name = "Security", kind = "framework")]
extern "C" {
    static kSecAttrAccessGroup: CFStringRef;
    static kSecAttrAccessible: CFStringRef;
    static kSecAttrSynchronizable: CFStringRef;
    static kSecAttrSynchronizableAny: CFStringRef;
    static kSecAttrAccessibleWhenUnlocked: CFStringRef;
    static kSecAttrAccessibleAfterFirstUnlock: CFStringRef;
    static kSecAttrAccessibleWhenUnlockedThisDeviceOnly: CFStringRef;
    static kSecAttrAccessibleAfterFirstUnlockThisDeviceOnly: CFStringRef;
}

/// The user's default keychain.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemKeychain;

impl SystemKeychain {
    pub fn new() -> Self {
        Self
    }
}

/// Borrow one of the framework's constant strings.
///
/// # Safety
///
/// `value` must point to a live constant exported by Security.framework.
unsafe fn constant(value: CFStringRef) -> CFString {
    CFString::wrap_under_get_rule(value)
}

fn accessibility_value(level: Accessibility) -> CFString {
    // SAFETY: framework constants live for the whole process.
    unsafe {
        constant(match level {
            Accessibility::WhenUnlocked => kSecAttrAccessibleWhenUnlocked,
            Accessibility::AfterFirstUnlock => kSecAttrAccessibleAfterFirstUnlock,
            Accessibility::WhenUnlockedDeviceOnly => kSecAttrAccessibleWhenUnlockedThisDeviceOnly,
            Accessibility::AfterFirstUnlockDeviceOnly => {
                kSecAttrAccessibleAfterFirstUnlockThisDeviceOnly
            }
        })
    }
}

fn to_dictionary(query: &Query) -> CFDictionary<CFString, CFType> {
    let mut pairs: Vec<(CFString, CFType)> = Vec::with_capacity(10);

    // SAFETY: framework constants live for the whole process.
    unsafe {
        let class = match query.class {
            ItemClass::GenericPassword => constant(kSecClassGenericPassword),
        };
        pairs.push((constant(kSecClass), class.as_CFType()));
        pairs.push((
            constant(kSecAttrService),
            CFString::new(&query.namespace).as_CFType(),
        ));
        pairs.push((
            constant(kSecAttrAccount),
            CFString::new(&query.name).as_CFType(),
        ));

        if let Some(group) = &query.sharing_group {
            pairs.push((constant(kSecAttrAccessGroup), CFString::new(group).as_CFType()));
        }

        pairs.push((
            constant(kSecAttrAccessible),
            accessibility_value(query.accessibility).as_CFType(),
        ));

        match query.sync {
            SyncMatch::Omitted => {}
            SyncMatch::Required => pairs.push((
                constant(kSecAttrSynchronizable),
                CFBoolean::true_value().as_CFType(),
            )),
            SyncMatch::Any => pairs.push((
                constant(kSecAttrSynchronizable),
                constant(kSecAttrSynchronizableAny).as_CFType(),
            )),
        }

        if query.match_limit_one {
            pairs.push((constant(kSecMatchLimit), constant(kSecMatchLimitOne).as_CFType()));
        }
        if query.return_data {
            pairs.push((constant(kSecReturnData), CFBoolean::true_value().as_CFType()));
        }
        if let Some(data) = &query.data {
            pairs.push((constant(kSecValueData), CFData::from_buffer(data).as_CFType()));
        }
    }

    CFDictionary::from_CFType_pairs(&pairs)
}

fn log_status(op: &'static str, query: &Query, status: i32) -> ProviderStatus {
    let status = ProviderStatus(status);
    if !status.is_success() {
        let message = security_framework::base::Error::from_code(status.code()).message();
        debug!(
            op,
            namespace = %query.namespace,
            name = %query.name,
            %status,
            message = message.as_deref().unwrap_or("unknown"),
            "keychain call failed"
        );
    }
    status
}

impl SecretProvider for SystemKeychain {
    fn add(&self, query: &Query) -> ProviderStatus {
        let attributes = to_dictionary(query);
        // SAFETY: `attributes` is a valid dictionary for the duration of the call
        // and a null result pointer is allowed.
        let status = unsafe { SecItemAdd(attributes.as_concrete_TypeRef(), ptr::null_mut()) };
        log_status("add", query, status)
    }

    fn update(&self, query: &Query, payload: &[u8]) -> ProviderStatus {
        let search = to_dictionary(query);
        // SAFETY: framework constant.
        let key = unsafe { constant(kSecValueData) };
        let changes =
            CFDictionary::from_CFType_pairs(&[(key, CFData::from_buffer(payload).as_CFType())]);
        // SAFETY: both dictionaries outlive the call.
        let status = unsafe {
            SecItemUpdate(search.as_concrete_TypeRef(), changes.as_concrete_TypeRef())
        };
        log_status("update", query, status)
    }

    fn copy_matching(&self, query: &Query) -> (ProviderStatus, Option<FetchedValue>) {
        let search = to_dictionary(query);
        let mut result: CFTypeRef = ptr::null();
        // SAFETY: `result` receives a +1 reference on success, owned below.
        let status = unsafe { SecItemCopyMatching(search.as_concrete_TypeRef(), &mut result) };
        let status = log_status("copy_matching", query, status);

        if !status.is_success() || result.is_null() {
            return (status, None);
        }

        // SAFETY: non-null result from a Copy function follows the create rule.
        let value = unsafe { CFType::wrap_under_create_rule(result) };
        let fetched = match value.downcast_into::<CFData>() {
            Some(data) => FetchedValue::Data(data.bytes().to_vec()),
            None => FetchedValue::Other("non-data keychain result"),
        };
        (status, Some(fetched))
    }

    fn delete(&self, query: &Query) -> ProviderStatus {
        let search = to_dictionary(query);
        // SAFETY: `search` outlives the call.
        let status = unsafe { SecItemDelete(search.as_concrete_TypeRef()) };
        log_status("delete", query, status)
    }
}
