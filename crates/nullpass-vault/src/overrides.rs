//! Policy overrides: the flag grammar shared by the CLI and by free-form
//! override strings typed into a front-end.
//!
//! ```text
//! -L, --length <N>       password length
//! -C, --counter <N>      rotation counter
//! --no-lowercase ...     disable a class (also uppercase, digits, symbols)
//! -l -u -d -s            re-enable a class; combinable as `-lud`
//! --exclude <CHARS>      characters that must not appear
//! ```
//!
//! When flags repeat or contradict each other, the last one wins
//! (`-s --no-symbols` disables symbols).
//!
//! Free-form strings are tolerant: tokens that are not part of the grammar
//! are dropped before parsing, as are unknown letters inside a short-flag
//! cluster and a value flag with nothing after it. A recognized flag with a
//! malformed value (`-L abc`) is an error.

use clap::{Arg, Args, Command, FromArgMatches};
use nullpass_core::{CharClass, Policy};

use crate::error::VaultError;

/// Overrides applied on top of a profile's or the default policy.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct PolicyOverrides {
    /// Password length (5-35).
    #[arg(short = 'L', long)]
    pub length: Option<usize>,

    /// Rotation counter; bump to get a new password for the same site.
    #[arg(short = 'C', long)]
    pub counter: Option<u32>,

    /// Include lowercase letters.
    #[arg(short = 'l', long, overrides_with = "no_lowercase")]
    pub lowercase: bool,

    /// Include uppercase letters.
    #[arg(short = 'u', long, overrides_with = "no_uppercase")]
    pub uppercase: bool,

    /// Include digits.
    #[arg(short = 'd', long, overrides_with = "no_digits")]
    pub digits: bool,

    /// Include symbols.
    #[arg(short = 's', long, overrides_with = "no_symbols")]
    pub symbols: bool,

    /// Exclude lowercase letters.
    #[arg(long, overrides_with = "lowercase")]
    pub no_lowercase: bool,

    /// Exclude uppercase letters.
    #[arg(long, overrides_with = "uppercase")]
    pub no_uppercase: bool,

    /// Exclude digits.
    #[arg(long, overrides_with = "digits")]
    pub no_digits: bool,

    /// Exclude symbols.
    #[arg(long, overrides_with = "symbols")]
    pub no_symbols: bool,

    /// Characters that must never appear in the password.
    #[arg(long, allow_hyphen_values = true)]
    pub exclude: Option<String>,
}

impl PolicyOverrides {
    /// Returns `true` if no override was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the provided overrides to `policy`.
    #[must_use]
    pub fn apply(&self, mut policy: Policy) -> Policy {
        if let Some(length) = self.length {
            policy.length = length;
        }
        if let Some(counter) = self.counter {
            policy.counter = counter;
        }
        let toggles = [
            (CharClass::Lowercase, self.lowercase, self.no_lowercase),
            (CharClass::Uppercase, self.uppercase, self.no_uppercase),
            (CharClass::Digits, self.digits, self.no_digits),
            (CharClass::Symbols, self.symbols, self.no_symbols),
        ];
        for (class, enable, disable) in toggles {
            if disable {
                policy.set_class(class, false);
            } else if enable {
                policy.set_class(class, true);
            }
        }
        if let Some(exclude) = &self.exclude {
            policy.exclude.clone_from(exclude);
        }
        policy
    }
}

/// Parse a whitespace-separated override string such as
/// `"-L 20 --no-symbols --exclude 0O1l"`.
///
/// # Errors
///
/// Returns [`VaultError::Overrides`] if a recognized flag has a malformed
/// value.
pub fn parse_overrides(line: &str) -> Result<PolicyOverrides, VaultError> {
    let cmd = PolicyOverrides::augment_args(
        Command::new("overrides")
            .no_binary_name(true)
            .args_override_self(true)
            .disable_help_flag(true)
            .disable_version_flag(true),
    );
    let tokens = known_tokens(&cmd, line.split_whitespace());
    let matches = cmd.try_get_matches_from(tokens).map_err(overrides_error)?;
    PolicyOverrides::from_arg_matches(&matches).map_err(overrides_error)
}

/// First line of clap's rendered error, without usage or help text.
fn overrides_error(err: clap::Error) -> VaultError {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    VaultError::Overrides(first.trim_start_matches("error: ").to_string())
}

/// Keep only the tokens `cmd` understands, together with their values.
fn known_tokens<'a>(cmd: &Command, tokens: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut kept = Vec::new();
    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        let Some(known) = classify(cmd, token) else {
            tracing::debug!(token, "Ignoring unrecognized override token");
            continue;
        };
        if !known.wants_value {
            kept.push(known.token);
            continue;
        }
        match tokens.next() {
            Some(value) => {
                kept.push(known.token);
                kept.push(value.to_string());
            }
            None => tracing::debug!(token, "Ignoring override flag without a value"),
        }
    }
    kept
}

/// A flag token reduced to the part `cmd` recognizes.
struct KnownFlag {
    token: String,
    /// The flag's value is the next token.
    wants_value: bool,
}

/// `None` if nothing in `token` is a recognized flag.
fn classify(cmd: &Command, token: &str) -> Option<KnownFlag> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline_value) = long.split_once('=').map_or((long, false), |(n, _)| (n, true));
        let arg = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        return Some(KnownFlag {
            token: token.to_string(),
            wants_value: takes_value(arg) && !inline_value,
        });
    }

    let cluster = token.strip_prefix('-').filter(|c| !c.is_empty())?;
    let mut kept = String::from("-");
    for (i, c) in cluster.char_indices() {
        let Some(arg) = cmd.get_arguments().find(|a| a.get_short() == Some(c)) else {
            tracing::debug!(token, flag = %c, "Ignoring unrecognized short flag");
            continue;
        };
        kept.push(c);
        if takes_value(arg) {
            // `-L20` carries its value inline; `-L` needs the next token.
            let inline = cluster.get(i.saturating_add(c.len_utf8())..).unwrap_or_default();
            kept.push_str(inline);
            return Some(KnownFlag {
                token: kept,
                wants_value: inline.is_empty(),
            });
        }
    }
    (kept.len() > 1).then_some(KnownFlag {
        token: kept,
        wants_value: false,
    })
}

fn takes_value(arg: &Arg) -> bool {
    arg.get_action().takes_values()
}

// ── Tests ──────────────────────────────────────────────────────────
