//! Per-site profiles: login and policy, keyed by site.
//!
//! Stored as plain JSON in `{data_dir}/profiles.json`. A profile never
//! holds the master secret or a derived password: both are recomputed on
//! demand, which is the whole point of the scheme.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use nullpass_core::Policy;
use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::store;

const PROFILES_FILE: &str = "profiles.json";

// ── Profile ────────────────────────────────────────────────────────

/// Saved generation parameters for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Site identifier, used as the store key.
    pub site: String,
    /// Login for the site. Empty when none was given.
    #[serde(default)]
    pub login: String,
    /// Policy used to derive this site's password.
    #[serde(default)]
    pub policy: Policy,
    /// Unix timestamp in milliseconds of the last save.
    #[serde(default)]
    pub saved_at: u64,
}

impl Profile {
    /// Create a profile stamped with the current time.
    #[must_use]
    pub fn new(site: impl Into<String>, login: impl Into<String>, policy: Policy) -> Self {
        Self {
            site: site.into(),
            login: login.into(),
            policy,
            saved_at: now_millis(),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

// ── Store ──────────────────────────────────────────────────────────

/// All saved profiles, ordered by site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileStore {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// Load profiles from `{data_dir}/profiles.json`.
    ///
    /// Returns an empty store when the file is missing or corrupt.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        store::load_or_default(data_dir, PROFILES_FILE)
    }

    /// Persist profiles to `{data_dir}/profiles.json` (atomic, owner-only).
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the directory is missing or the write
    /// or rename fails.
    pub fn save(&self, data_dir: &Path) -> Result<(), VaultError> {
        store::save_atomic(data_dir, PROFILES_FILE, self)
    }

    /// Profile saved for `site`, if any.
    #[must_use]
    pub fn get(&self, site: &str) -> Option<&Profile> {
        self.profiles.get(site)
    }

    /// Insert or replace the profile for `profile.site`.
    ///
    /// Returns the profile it replaced.
    pub fn upsert(&mut self, profile: Profile) -> Option<Profile> {
        self.profiles.insert(profile.site.clone(), profile)
    }

    /// Remove the profile for `site`.
    pub fn remove(&mut self, site: &str) -> Option<Profile> {
        self.profiles.remove(site)
    }

    /// All profiles, sorted by site.
    pub fn list(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Number of saved profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if no profile is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
