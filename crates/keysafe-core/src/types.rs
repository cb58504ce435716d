//! Shared type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a stored secret may be read, relative to the device lock state.
///
/// The `*DeviceOnly` variants additionally pin the secret to this device: it is
/// never migrated to a new device and never takes part in account-level sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    /// Readable only while the device is unlocked.
    #[default]
    WhenUnlocked,
    /// Readable after the first unlock following a restart.
    AfterFirstUnlock,
    /// Like `WhenUnlocked`, but bound to this device.
    WhenUnlockedDeviceOnly,
    /// Like `AfterFirstUnlock`, but bound to this device.
    AfterFirstUnlockDeviceOnly,
}

impl Accessibility {
    /// All accessibility levels, in declaration order.
    pub const ALL: [Accessibility; 4] = [
        Accessibility::WhenUnlocked,
        Accessibility::AfterFirstUnlock,
        Accessibility::WhenUnlockedDeviceOnly,
        Accessibility::AfterFirstUnlockDeviceOnly,
    ];

    /// Whether secrets stored at this level are bound to the current device.
    pub fn is_device_only(self) -> bool {
        matches!(
            self,
            Accessibility::WhenUnlockedDeviceOnly | Accessibility::AfterFirstUnlockDeviceOnly
        )
    }

    /// Stable kebab-case name, as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Accessibility::WhenUnlocked => "when-unlocked",
            Accessibility::AfterFirstUnlock => "after-first-unlock",
            Accessibility::WhenUnlockedDeviceOnly => "when-unlocked-device-only",
            Accessibility::AfterFirstUnlockDeviceOnly => "after-first-unlock-device-only",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accessibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown accessibility '{s}' (expected one of: {})",
                    Self::ALL.map(Accessibility::as_str).join(", ")
                )
            })
    }
}
