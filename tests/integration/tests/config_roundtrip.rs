//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration written to disk loads back with the
//! same store policy, and that the policy maps onto the keychain's effective
//! configuration.

use keysafe_core::config::StoreSettings;
use keysafe_core::{Accessibility, Config};
use keysafe_secrets::StoreConfiguration;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keysafe.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.store, config.store);
    assert_eq!(loaded.logging.level, config.logging.level);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keysafe.json5");

    let mut config = Config::default();
    config.default_namespace = Some("com.example.app".to_string());
    config.store = StoreSettings {
        accessibility: Accessibility::AfterFirstUnlock,
        sharing_group: Some("TEAMID.com.example.shared".to_string()),
        synchronizable: true,
    };
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.default_namespace.as_deref(), Some("com.example.app"));
    assert_eq!(loaded.store, config.store);

    let effective = StoreConfiguration::from(&loaded.store);
    assert!(effective.synchronizable());
    assert_eq!(effective.sharing_group(), Some("TEAMID.com.example.shared"));
}

#[test]
fn test_device_only_config_loads_without_sync() {
    let config = Config::parse(
        r#"{ store: { accessibility: "when-unlocked-device-only", synchronizable: true } }"#,
    )
    .unwrap();
    config.validate().unwrap();

    let effective = StoreConfiguration::from(&config.store);
    assert_eq!(effective.accessibility(), Accessibility::WhenUnlockedDeviceOnly);
    assert!(!effective.synchronizable());
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/keysafe.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_unknown_accessibility() {
    let result = Config::parse(r#"{ store: { accessibility: "always" } }"#);
    assert!(result.is_err());
}
