//! Error types for `nullpass-core`.

use thiserror::Error;

use crate::charset::CharClass;

/// Errors produced by password derivation.
///
/// Every variant is a deterministic function of the caller's input:
/// retrying with the same arguments yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NullPassError {
    /// A required input is missing or out of range (empty site or master
    /// secret, zero counter).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Requested password length is outside the supported range.
    #[error(
        "password length must be between {min} and {max}, got {length}",
        min = crate::policy::MIN_PASSWORD_LENGTH,
        max = crate::policy::MAX_PASSWORD_LENGTH
    )]
    InvalidLength {
        /// The rejected length.
        length: usize,
    },

    /// Every enabled class is empty once exclusions are applied.
    #[error("no valid characters available after exclusions")]
    NoCharactersAvailable,

    /// One enabled class lost every character to exclusions while others
    /// survived, so no mandatory character can be drawn from it.
    #[error("character class {class} is empty after exclusions")]
    EmptyCharset {
        /// The class that was emptied.
        class: CharClass,
    },
}
