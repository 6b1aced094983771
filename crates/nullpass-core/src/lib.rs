//! `nullpass-core`: stateless deterministic password derivation.
//!
//! Given a site, a login, a master secret and a [`Policy`], derives the same
//! password every time with no stored state:
//!
//! 1. [`kdf::derive`]: PBKDF2-HMAC-SHA256 into a 256-bit [`Entropy`]
//! 2. [`charset::build`]: ordered per-class alphabets minus exclusions
//! 3. [`password::render`]: base-N expansion plus mandatory-character injection
//!
//! This crate is the audit target: zero I/O, zero logging, zero async.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod charset;
pub mod entropy;
pub mod kdf;

pub mod password;

pub mod policy;

pub use charset::{CharClass, Charset};
pub use entropy::{Entropy, ENTROPY_LEN};
pub use error::NullPassError;
pub use kdf::PBKDF2_ITERATIONS;
pub use policy::{
    Policy, DEFAULT_COUNTER, DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};

/// Derive the password for `site`/`login` under `policy`.
///
/// Cheap checks run first (inputs, length, counter, charsets) so invalid
/// requests never pay for the key derivation.
///
/// # Errors
///
/// - [`NullPassError::InvalidInput`] if `site` or `master_secret` is empty,
///   or the counter is zero.
/// - [`NullPassError::InvalidLength`] if `policy.length` is out of range.
/// - [`NullPassError::NoCharactersAvailable`] / [`NullPassError::EmptyCharset`]
///   if exclusions leave nothing to draw from.
pub fn generate_password(
    site: &str,
    login: &str,
    master_secret: &str,
    policy: &Policy,
) -> Result<String, NullPassError> {
    kdf::require_inputs(master_secret, site)?;
    policy.validate()?;
    let charsets = charset::build(policy)?;
    let entropy = kdf::derive(master_secret, site, login, policy.counter)?;
    password::render(entropy, policy.length, &charsets)
}
