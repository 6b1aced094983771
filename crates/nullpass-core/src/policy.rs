//! Generation policy: length, counter, enabled classes, excluded characters.

use serde::{Deserialize, Serialize};

use crate::charset::CharClass;
use crate::error::NullPassError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum allowed password length.
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Maximum allowed password length.
pub const MAX_PASSWORD_LENGTH: usize = 35;

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Default counter. Bump it to rotate a site's password.
pub const DEFAULT_COUNTER: u32 = 1;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// User-chosen generation parameters for one site.
///
/// Missing fields deserialize to their defaults, so a partially filled
/// profile (`{"length": 20}`) is still a complete policy.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    /// Password length, within [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`].
    pub length: usize,
    /// Rotation counter, starting at 1.
    pub counter: u32,
    /// Include lowercase letters (a-z).
    pub lowercase: bool,
    /// Include uppercase letters (A-Z).
    pub uppercase: bool,
    /// Include digits (0-9).
    pub digits: bool,
    /// Include ASCII punctuation.
    pub symbols: bool,
    /// Characters that must never appear in the output.
    pub exclude: String,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            counter: DEFAULT_COUNTER,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
            exclude: String::new(),
        }
    }
}

impl Policy {
    /// Whether `class` is enabled.
    #[must_use]
    pub const fn includes(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lowercase => self.lowercase,
            CharClass::Uppercase => self.uppercase,
            CharClass::Digits => self.digits,
            CharClass::Symbols => self.symbols,
        }
    }

    /// Enable or disable `class`.
    pub fn set_class(&mut self, class: CharClass, enabled: bool) {
        match class {
            CharClass::Lowercase => self.lowercase = enabled,
            CharClass::Uppercase => self.uppercase = enabled,
            CharClass::Digits => self.digits = enabled,
            CharClass::Symbols => self.symbols = enabled,
        }
    }

    /// Enabled classes, in the fixed derivation order.
    pub fn enabled_classes(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(|c| self.includes(*c))
    }

    /// Check length and counter bounds.
    ///
    /// Charset emptiness is checked separately by [`crate::charset::build`].
    ///
    /// # Errors
    ///
    /// - [`NullPassError::InvalidLength`] if `length` is out of range.
    /// - [`NullPassError::InvalidInput`] if `counter` is zero.
    pub fn validate(&self) -> Result<(), NullPassError> {
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&self.length) {
            return Err(NullPassError::InvalidLength {
                length: self.length,
            });
        }
        if self.counter == 0 {
            return Err(NullPassError::InvalidInput(
                "counter must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let policy = Policy::default();
        assert_eq!(policy.length, 16);
        assert_eq!(policy.counter, 1);
        assert!(policy.lowercase && policy.uppercase && policy.digits && policy.symbols);
        assert!(policy.exclude.is_empty());
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn length_bounds() {
        for length in [MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH] {
            let policy = Policy {
                length,
                ..Policy::default()
            };
            assert!(policy.validate().is_ok(), "length {length} should be valid");
        }
        for length in [0, MIN_PASSWORD_LENGTH - 1, MAX_PASSWORD_LENGTH + 1] {
            let policy = Policy {
                length,
                ..Policy::default()
            };
            assert_eq!(
                policy.validate(),
                Err(NullPassError::InvalidLength { length })
            );
        }
    }

    #[test]
    fn zero_counter_rejected() {
        let policy = Policy {
            counter: 0,
            ..Policy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(NullPassError::InvalidInput(_))
        ));
    }

    #[test]
    fn enabled_classes_follow_fixed_order() {
        let mut policy = Policy::default();
        policy.set_class(CharClass::Uppercase, false);
        let classes: Vec<CharClass> = policy.enabled_classes().collect();
        assert_eq!(
            classes,
            [CharClass::Lowercase, CharClass::Digits, CharClass::Symbols]
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let policy: Policy = serde_json::from_str(r#"{"length":20,"symbols":false}"#).unwrap();
        assert_eq!(policy.length, 20);
        assert!(!policy.symbols);
        assert_eq!(policy.counter, DEFAULT_COUNTER);
        assert!(policy.lowercase);
    }

    #[test]
    fn serde_uses_camel_case_field_names() {
        let json = serde_json::to_value(Policy::default()).unwrap();
        for key in [
            "length",
            "counter",
            "lowercase",
            "uppercase",
            "digits",
            "symbols",
            "exclude",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
