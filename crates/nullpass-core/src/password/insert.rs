//! Mandatory-character injection.
//!
//! Each mandatory character is spliced into the base string at
//! `entropy % (len + 1)`. After the splice the position stream advances by
//! `entropy /= (new_len + 1)`, i.e. the divisor is one larger than the
//! modulus that chose the index. Derived passwords depend on this exact
//! pairing.

use std::num::NonZeroUsize;

use crate::entropy::Entropy;

/// Splice every char of `mandatory` into `base`, in order.
///
/// `entropy` must be an unconsumed copy of the derived value, not the
/// remainder left over after rendering the base string.
#[must_use]
pub fn insert_pseudo_randomly(
    mut base: Vec<char>,
    mut entropy: Entropy,
    mandatory: &[char],
) -> Vec<char> {
    for &c in mandatory {
        if base.is_empty() {
            base.push(c);
            continue;
        }
        let index = entropy.rem(slots(base.len()));
        base.insert(index, c);
        entropy.div_floor(slots(base.len()));
    }
    base
}

/// Number of insertion points in a string of `len` characters.
fn slots(len: usize) -> NonZeroUsize {
    NonZeroUsize::MIN.saturating_add(len)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
