//! User settings: the default policy for sites without a profile.
//!
//! Persisted to `{data_dir}/settings.json`. Every field has a serde
//! default so older or hand-edited files still load.

use std::path::Path;

use nullpass_core::Policy;
use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::store;

const SETTINGS_FILE: &str = "settings.json";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Whether front-ends should detect password fields automatically.
    #[serde(default = "default_auto_detect")]
    pub auto_detect: bool,

    /// Policy applied when a site has no saved profile.
    #[serde(default)]
    pub default_policy: Policy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_detect: default_auto_detect(),
            default_policy: Policy::default(),
        }
    }
}

const fn default_auto_detect() -> bool {
    true
}

/// A partial settings update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New value for [`Settings::auto_detect`].
    #[serde(default)]
    pub auto_detect: Option<bool>,
    /// New value for [`Settings::default_policy`].
    #[serde(default)]
    pub default_policy: Option<Policy>,
}

impl Settings {
    /// Load settings from `{data_dir}/settings.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or corrupt.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        store::load_or_default(data_dir, SETTINGS_FILE)
    }

    /// Persist settings to `{data_dir}/settings.json` (atomic, owner-only).
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the directory is missing or the write
    /// or rename fails.
    pub fn save(&self, data_dir: &Path) -> Result<(), VaultError> {
        store::save_atomic(data_dir, SETTINGS_FILE, self)
    }

    /// Apply the fields present in `patch`.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(auto_detect) = patch.auto_detect {
            self.auto_detect = auto_detect;
        }
        if let Some(policy) = patch.default_policy {
            self.default_policy = policy;
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_values_are_correct() {
        let settings = Settings::default();
        assert!(settings.auto_detect);
        assert_eq!(settings.default_policy, Policy::default());
    }

    #[test]
    fn load_returns_default_on_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            auto_detect: false,
            default_policy: Policy {
                length: 24,
                exclude: "0O1l".into(),
                ..Policy::default()
            },
        };
        settings.save(dir.path()).unwrap();
        assert_eq!(Settings::load(dir.path()), settings);
    }

    #[test]
    fn load_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "{ nope").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn load_handles_partial_json_with_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"defaultPolicy":{"length":12}}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert!(settings.auto_detect);
        assert_eq!(settings.default_policy.length, 12);
        assert_eq!(settings.default_policy.counter, 1);
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut settings = Settings::default();
        settings.merge(SettingsPatch {
            auto_detect: Some(false),
            default_policy: None,
        });
        assert!(!settings.auto_detect);
        assert_eq!(settings.default_policy, Policy::default());

        let policy = Policy {
            digits: false,
            ..Policy::default()
        };
        settings.merge(SettingsPatch {
            auto_detect: None,
            default_policy: Some(policy.clone()),
        });
        assert!(!settings.auto_detect);
        assert_eq!(settings.default_policy, policy);
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("autoDetect"));
        assert!(json.contains("defaultPolicy"));
        assert!(!json.contains("auto_detect"));
        assert!(!json.contains("default_policy"));
    }
}
