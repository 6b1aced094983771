//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! Turns (master secret, site, login, counter) into a 256-bit [`Entropy`].
//! Hash, iteration count, output length and byte order are fixed: any
//! co-existing implementation must derive the same value from the same
//! inputs.

use std::num::NonZeroU32;

use ring::pbkdf2;
use zeroize::Zeroize;

use crate::entropy::{Entropy, ENTROPY_LEN};
use crate::error::NullPassError;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

const ITERATIONS: NonZeroU32 = match NonZeroU32::new(PBKDF2_ITERATIONS) {
    Some(n) => n,
    None => panic!("PBKDF2_ITERATIONS must be non-zero"),
};

/// Build the PBKDF2 salt: `site ‖ login ‖ counter` with the counter in
/// lowercase hexadecimal, no separator, no padding.
#[must_use]
pub fn salt(site: &str, login: &str, counter: u32) -> String {
    format!("{site}{login}{counter:x}")
}

/// Derive the entropy for one site/login/counter triple.
///
/// CPU-bound (100 000 HMAC rounds). Callers on an event loop should run it
/// on a blocking thread; there is no I/O, so it never needs a timeout.
///
/// # Errors
///
/// Returns [`NullPassError::InvalidInput`] if `master_secret` or `site` is
/// empty.
pub fn derive(
    master_secret: &str,
    site: &str,
    login: &str,
    counter: u32,
) -> Result<Entropy, NullPassError> {
    require_inputs(master_secret, site)?;

    let salt = salt(site, login, counter);
    let mut output = [0u8; ENTROPY_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        ITERATIONS,
        salt.as_bytes(),
        master_secret.as_bytes(),
        &mut output,
    );

    let entropy = Entropy::from_be_bytes(&output);
    output.zeroize();
    Ok(entropy)
}

/// Reject an empty master secret or site before any work is done.
pub(crate) fn require_inputs(master_secret: &str, site: &str) -> Result<(), NullPassError> {
    if master_secret.is_empty() {
        return Err(NullPassError::InvalidInput(
            "master secret is required".into(),
        ));
    }
    if site.is_empty() {
        return Err(NullPassError::InvalidInput("site is required".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
