//! Request dispatcher: the message channel front-ends talk to.
//!
//! A front-end sends a JSON [`Request`] tagged by `action` and always gets a
//! [`Response`] back: `{"success": true, ...}` on success, or
//! `{"success": false, "error": "..."}` with the error's display text. The
//! dispatcher never panics on bad input.
//!
//! Master secrets arrive as [`SecretString`] and are exposed only for the
//! duration of one derivation. Neither secrets nor passwords are logged.

use std::fmt;
use std::path::{Path, PathBuf};

use nullpass_core::{generate_password, NullPassError, Policy};
use secrecy::{ExposeSecret, SecretString};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::VaultError;
use crate::overrides::{parse_overrides, PolicyOverrides};
use crate::profiles::{Profile, ProfileStore};
use crate::settings::{Settings, SettingsPatch};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// A message from a front-end.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Request {
    /// Derive the password for a site.
    GeneratePassword(GenerateRequest),
    /// Save or replace a site's profile.
    SaveProfile(SaveProfileRequest),
    /// Fetch one site's profile.
    GetProfile(SiteRequest),
    /// Delete one site's profile.
    DeleteProfile(SiteRequest),
    /// List every saved profile.
    GetAllProfiles,
    /// Fetch the settings record.
    GetSettings,
    /// Merge a partial update into the settings record.
    UpdateSettings(SettingsPatch),
}

impl Request {
    /// Wire name of the action, for logging.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::GeneratePassword(_) => "generatePassword",
            Self::SaveProfile(_) => "saveProfile",
            Self::GetProfile(_) => "getProfile",
            Self::DeleteProfile(_) => "deleteProfile",
            Self::GetAllProfiles => "getAllProfiles",
            Self::GetSettings => "getSettings",
            Self::UpdateSettings(_) => "updateSettings",
        }
    }
}

/// Inputs for one password derivation.
///
/// Policy resolution: `policy` if given, else the site's saved profile,
/// else the settings default. `overrides` is applied last. An empty `login`
/// falls back to the saved profile's login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Site identifier.
    pub site: String,
    /// Login for the site.
    #[serde(default)]
    pub login: String,
    /// Master secret. Never persisted, never logged.
    #[serde(deserialize_with = "deserialize_secret")]
    pub master_secret: SecretString,
    /// Explicit policy for this request.
    #[serde(default)]
    pub policy: Option<Policy>,
    /// Free-form override string, e.g. `"-L 20 --no-symbols"`.
    #[serde(default)]
    pub overrides: Option<String>,
}

/// Inputs for saving a profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    /// Site identifier.
    pub site: String,
    /// Login for the site.
    #[serde(default)]
    pub login: String,
    /// Policy to store. Defaults to the settings default policy.
    #[serde(default)]
    pub policy: Option<Policy>,
}

/// A request addressing one site.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    /// Site identifier.
    pub site: String,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    // serde's type errors quote the offending value.
    String::deserialize(deserializer)
        .map(SecretString::from)
        .map_err(|_| D::Error::custom("masterSecret must be a string"))
}

/// The reply to a [`Request`].
///
/// `Debug` is manually implemented to mask the generated password.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Whether the request succeeded.
    pub success: bool,
    /// Derived password (`generatePassword`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Single profile (`getProfile`). The key is omitted when none is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    /// All profiles (`getAllProfiles`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<Profile>>,
    /// Settings record (`getSettings`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Error text when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A bare success.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// A failure carrying `err`'s display text.
    #[must_use]
    pub fn err(err: &VaultError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("success", &self.success)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("profile", &self.profile)
            .field("profiles", &self.profiles)
            .field("settings", &self.settings)
            .field("error", &self.error)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Profile and settings storage rooted at one data directory, plus
/// password derivation.
///
/// Holds no state besides the directory path: every call reads the JSON
/// files fresh, so several `Vault`s on the same directory stay consistent.
#[derive(Debug, Clone)]
pub struct Vault {
    data_dir: PathBuf,
}

impl Vault {
    /// Create a vault over `data_dir`. The directory is not touched until
    /// the first save.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Handle one request. Errors are folded into the response.
    #[must_use]
    pub fn handle(&self, request: Request) -> Response {
        let action = request.action();
        tracing::debug!(action, "Handling request");
        self.dispatch(request).unwrap_or_else(|e| {
            tracing::warn!(action, error = %e, "Request failed");
            Response::err(&e)
        })
    }

    /// Parse a JSON request and handle it.
    #[must_use]
    pub fn handle_json(&self, json: &str) -> Response {
        match serde_json::from_str::<Request>(json) {
            Ok(request) => self.handle(request),
            Err(e) => {
                tracing::warn!(error = %e, "Rejected malformed request");
                Response::err(&VaultError::from(e))
            }
        }
    }

    fn dispatch(&self, request: Request) -> Result<Response, VaultError> {
        match request {
            Request::GeneratePassword(req) => {
                let password = self.generate(&req)?;
                Ok(Response {
                    password: Some(password),
                    ..Response::ok()
                })
            }
            Request::SaveProfile(req) => {
                self.save_profile(&req.site, &req.login, req.policy)?;
                Ok(Response::ok())
            }
            Request::GetProfile(req) => Ok(Response {
                profile: self.profile(&req.site),
                ..Response::ok()
            }),
            Request::DeleteProfile(req) => {
                self.delete_profile(&req.site)?;
                Ok(Response::ok())
            }
            Request::GetAllProfiles => Ok(Response {
                profiles: Some(self.profiles()),
                ..Response::ok()
            }),
            Request::GetSettings => Ok(Response {
                settings: Some(self.settings()),
                ..Response::ok()
            }),
            Request::UpdateSettings(patch) => {
                self.update_settings(patch)?;
                Ok(Response::ok())
            }
        }
    }

    // ── Generation ──────────────────────────────────────────────────

    /// Derive the password for `req`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Overrides`] if the override string is malformed.
    /// - [`VaultError::Core`] for any derivation failure.
    pub fn generate(&self, req: &GenerateRequest) -> Result<String, VaultError> {
        let overrides = match req.overrides.as_deref() {
            Some(line) => parse_overrides(line)?,
            None => PolicyOverrides::default(),
        };
        let policy = self.resolve_policy(&req.site, req.policy.clone(), &overrides);

        let login = if req.login.is_empty() {
            self.profile(&req.site).map(|p| p.login).unwrap_or_default()
        } else {
            req.login.clone()
        };

        tracing::info!(site = %req.site, length = policy.length, counter = policy.counter, "Deriving password");
        let password = generate_password(
            &req.site,
            &login,
            req.master_secret.expose_secret(),
            &policy,
        )?;
        Ok(password)
    }

    /// The policy in force for `site`: `explicit` if given, else the saved
    /// profile's, else the settings default. `overrides` is applied last.
    ///
    /// The result is not validated.
    #[must_use]
    pub fn resolve_policy(
        &self,
        site: &str,
        explicit: Option<Policy>,
        overrides: &PolicyOverrides,
    ) -> Policy {
        let base = explicit
            .or_else(|| self.profile(site).map(|p| p.policy))
            .unwrap_or_else(|| self.settings().default_policy);
        overrides.apply(base)
    }

    // ── Profiles ────────────────────────────────────────────────────

    /// Save or replace the profile for `site`.
    ///
    /// With no `policy`, the current settings default is stored.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Core`] if `site` is empty or the policy is invalid.
    /// - [`VaultError::Io`] if the profile file cannot be written.
    pub fn save_profile(
        &self,
        site: &str,
        login: &str,
        policy: Option<Policy>,
    ) -> Result<Profile, VaultError> {
        if site.is_empty() {
            return Err(NullPassError::InvalidInput("site is required".into()).into());
        }
        let policy = policy.unwrap_or_else(|| Settings::load(&self.data_dir).default_policy);
        policy.validate()?;

        let profile = Profile::new(site, login, policy);
        let mut store = ProfileStore::load(&self.data_dir);
        store.upsert(profile.clone());
        store.save(&self.data_dir)?;
        tracing::info!(site, "Profile saved");
        Ok(profile)
    }

    /// The profile saved for `site`, if any.
    #[must_use]
    pub fn profile(&self, site: &str) -> Option<Profile> {
        ProfileStore::load(&self.data_dir).get(site).cloned()
    }

    /// Every saved profile, sorted by site.
    #[must_use]
    pub fn profiles(&self) -> Vec<Profile> {
        ProfileStore::load(&self.data_dir).list().cloned().collect()
    }

    /// Delete the profile for `site`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::ProfileNotFound`] if no profile is saved for `site`.
    /// - [`VaultError::Io`] if the profile file cannot be written.
    pub fn delete_profile(&self, site: &str) -> Result<Profile, VaultError> {
        let mut store = ProfileStore::load(&self.data_dir);
        let removed = store
            .remove(site)
            .ok_or_else(|| VaultError::ProfileNotFound(site.to_string()))?;
        store.save(&self.data_dir)?;
        tracing::info!(site, "Profile deleted");
        Ok(removed)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// The current settings record.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::load(&self.data_dir)
    }

    /// Merge `patch` into the stored settings and persist the result.
    ///
    /// # Errors
    ///
    /// - [`VaultError::Core`] if the new default policy is invalid.
    /// - [`VaultError::Io`] if the settings file cannot be written.
    pub fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, VaultError> {
        if let Some(policy) = &patch.default_policy {
            policy.validate()?;
        }
        let mut settings = Settings::load(&self.data_dir);
        settings.merge(patch);
        settings.save(&self.data_dir)?;
        tracing::info!("Settings updated");
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
