//! `nullpass-vault`: profiles, settings and request dispatch for NullPass.
//!
//! Everything stored here is non-secret: per-site logins and policies in
//! `profiles.json`, the default policy in `settings.json`. Passwords are
//! recomputed through `nullpass-core` on every request.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod overrides;
pub mod profiles;
pub mod settings;

pub mod service;

mod store;

pub use error::VaultError;
pub use overrides::{parse_overrides, PolicyOverrides};
pub use profiles::{Profile, ProfileStore};
pub use service::{
    GenerateRequest, Request, Response, SaveProfileRequest, SiteRequest, Vault,
};
pub use settings::{Settings, SettingsPatch};
