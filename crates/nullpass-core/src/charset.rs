//! Character classes and per-policy charset construction.
//!
//! The class order and the alphabet of each class are part of the
//! compatibility contract: reordering either silently changes every
//! derived password.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NullPassError;
use crate::policy::Policy;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One of the four character classes a policy can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharClass {
    /// ASCII `a`-`z`.
    Lowercase,
    /// ASCII `A`-`Z`.
    Uppercase,
    /// ASCII `0`-`9`.
    Digits,
    /// The 32 ASCII punctuation characters.
    Symbols,
}

impl CharClass {
    /// All classes in the fixed derivation order.
    pub const ALL: [Self; 4] = [Self::Lowercase, Self::Uppercase, Self::Digits, Self::Symbols];

    /// The canonical, ordered alphabet of this class.
    #[must_use]
    pub const fn alphabet(self) -> &'static str {
        match self {
            Self::Lowercase => LOWERCASE,
            Self::Uppercase => UPPERCASE,
            Self::Digits => DIGITS,
            Self::Symbols => SYMBOLS,
        }
    }

    /// Stable lowercase name, as used in flags and serialized policies.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lowercase => "lowercase",
            Self::Uppercase => "uppercase",
            Self::Digits => "digits",
            Self::Symbols => "symbols",
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The surviving characters of one enabled class after exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    class: CharClass,
    chars: Vec<char>,
}

impl Charset {
    /// Filter `class`'s alphabet, dropping every character found in `exclude`.
    ///
    /// Relative order of the surviving characters is preserved.
    #[must_use]
    pub fn filtered(class: CharClass, exclude: &str) -> Self {
        let chars = class
            .alphabet()
            .chars()
            .filter(|c| !exclude.contains(*c))
            .collect();
        Self { class, chars }
    }

    /// The class these characters were drawn from.
    #[must_use]
    pub const fn class(&self) -> CharClass {
        self.class
    }

    /// Surviving characters, in canonical order.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of surviving characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if exclusion removed every character.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the ordered charsets for every class `policy` enables.
///
/// # Errors
///
/// - [`NullPassError::NoCharactersAvailable`] if no class is enabled or
///   exclusion empties all of them.
/// - [`NullPassError::EmptyCharset`] if exclusion empties one enabled class
///   while others still have characters.
pub fn build(policy: &Policy) -> Result<Vec<Charset>, NullPassError> {
    let charsets: Vec<Charset> = policy
        .enabled_classes()
        .map(|class| Charset::filtered(class, &policy.exclude))
        .collect();

    if charsets.iter().all(Charset::is_empty) {
        return Err(NullPassError::NoCharactersAvailable);
    }

    if let Some(empty) = charsets.iter().find(|c| c.is_empty()) {
        return Err(NullPassError::EmptyCharset {
            class: empty.class(),
        });
    }

    Ok(charsets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
