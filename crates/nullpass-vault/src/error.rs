//! Error types for `nullpass-vault`.

use nullpass_core::NullPassError;
use thiserror::Error;

/// Errors produced by profile, settings and dispatch operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Password derivation failed (delegated from nullpass-core).
    #[error(transparent)]
    Core(#[from] NullPassError),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of a profile or settings file failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The free-form override string could not be parsed.
    #[error("invalid overrides: {0}")]
    Overrides(String),

    /// No profile is saved for the requested site.
    #[error("profile not found: {0}")]
    ProfileNotFound(String),
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
