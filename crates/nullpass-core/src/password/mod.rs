//! Deterministic password rendering.
//!
//! The derived [`Entropy`] is read as an endless base-N number:
//! - the base string takes one digit per character from the combined charset
//! - each enabled class then contributes one mandatory character, drawn from
//!   the same running value
//! - mandatory characters are spliced in at positions read from a fresh copy
//!   of the original entropy (see [`insert`])
//!
//! Nothing here touches a random source. Identical inputs always render the
//! identical string.

pub mod insert;

use std::num::NonZeroUsize;

use crate::charset::Charset;
use crate::entropy::Entropy;
use crate::error::NullPassError;
use crate::policy::MAX_PASSWORD_LENGTH;

/// Render a password of `length` characters from `entropy`.
///
/// `charsets` must be in the fixed class order produced by
/// [`crate::charset::build`]. Characters shared between two charsets are
/// not deduplicated in the combined alphabet.
///
/// When `length` is smaller than the number of charsets, the base string is
/// empty and the result holds exactly one character per charset.
///
/// # Errors
///
/// - [`NullPassError::InvalidLength`] if `length` exceeds
///   [`MAX_PASSWORD_LENGTH`].
/// - [`NullPassError::NoCharactersAvailable`] if `charsets` is empty or
///   every charset is empty.
/// - [`NullPassError::EmptyCharset`] if any single charset is empty.
pub fn render(
    entropy: Entropy,
    length: usize,
    charsets: &[Charset],
) -> Result<String, NullPassError> {
    let combined: Vec<char> = charsets.iter().flat_map(|c| c.chars()).copied().collect();
    let Some(combined_len) = NonZeroUsize::new(combined.len()) else {
        return Err(NullPassError::NoCharactersAvailable);
    };

    if length > MAX_PASSWORD_LENGTH {
        return Err(NullPassError::InvalidLength { length });
    }

    let mut digits = entropy.clone();

    let base_len = length.saturating_sub(charsets.len());
    let mut base: Vec<char> = Vec::with_capacity(length);
    for _ in 0..base_len {
        base.push(combined[digits.div_rem(combined_len)]);
    }

    let mut mandatory: Vec<char> = Vec::with_capacity(charsets.len());
    for charset in charsets {
        let Some(len) = NonZeroUsize::new(charset.len()) else {
            return Err(NullPassError::EmptyCharset {
                class: charset.class(),
            });
        };
        mandatory.push(charset.chars()[digits.div_rem(len)]);
    }

    Ok(insert::insert_pseudo_randomly(base, entropy, &mandatory)
        .into_iter()
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
