//! 256-bit derived entropy, consumed as a stream of base-N digits.
//!
//! The renderer only ever needs `self / n` and `self % n` for small `n`,
//! so this is a fixed-width unsigned integer with a single schoolbook
//! short-division routine rather than a general big-integer type. Division
//! never grows the value, so 256 bits is exact for the whole derivation.

use std::fmt;
use std::num::NonZeroUsize;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Width of the entropy value in bytes.
pub const ENTROPY_LEN: usize = 32;

const LIMBS: usize = ENTROPY_LEN / 8;

/// A 256-bit unsigned integer derived from the master secret.
///
/// Stored as four 64-bit limbs, least significant first. Zeroized on drop;
/// `Debug` output is masked.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    limbs: [u64; LIMBS],
}

impl Entropy {
    /// Interpret 32 bytes as a big-endian unsigned integer.
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; ENTROPY_LEN]) -> Self {
        let mut limbs = [0u64; LIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_be_bytes(word);
            word.zeroize();
        }
        Self { limbs }
    }

    /// Big-endian byte representation.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; ENTROPY_LEN] {
        let mut out = [0u8; ENTROPY_LEN];
        for (chunk, limb) in out.rchunks_exact_mut(8).zip(self.limbs.iter()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    #[cfg(test)]
    fn is_zero(&self) -> bool {
        self.limbs.iter().all(|l| *l == 0)
    }

    /// Replace `self` with `self / divisor` and return `self % divisor`.
    ///
    /// The remainder is always `< divisor`, so it can index a slice of
    /// length `divisor` directly.
    // rem < divisor <= u64::MAX, so `rem << 64 | limb` fits in u128 and each
    // partial quotient fits in u64.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn div_rem(&mut self, divisor: NonZeroUsize) -> usize {
        let d = divisor.get() as u128;
        let mut rem = 0u128;
        for limb in self.limbs.iter_mut().rev() {
            let cur = (rem << 64) | u128::from(*limb);
            *limb = (cur / d) as u64;
            rem = cur % d;
        }
        rem as usize
    }

    /// `self % divisor`, leaving `self` untouched.
    #[must_use]
    pub fn rem(&self, divisor: NonZeroUsize) -> usize {
        let mut scratch = self.clone();
        scratch.div_rem(divisor)
    }

    /// Replace `self` with `self / divisor`, discarding the remainder.
    pub fn div_floor(&mut self, divisor: NonZeroUsize) {
        self.div_rem(divisor);
    }
}

#[cfg(test)]
impl From<u64> for Entropy {
    fn from(value: u64) -> Self {
        Self {
            limbs: [value, 0, 0, 0],
        }
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Entropy(***)")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
