//! Account identifiers and the randomized name generator.

mod generator;
mod words;

pub use generator::*;

use crate::error::{Error, Result};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Top-level account domain appended to every generated name.
pub const DOMAIN: &str = "near";

/// Longest account id the network accepts.
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

/// A human-readable account name such as `ylcoolcat42.near`.
///
/// Construction through [`FromStr`] checks the network's character set and
/// length rules. Generated ids are valid only when their prefix passed
/// [`validate_prefix`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub(crate) fn from_generated(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id lives directly under [`DOMAIN`].
    pub fn is_top_level(&self) -> bool {
        self.0
            .strip_suffix(DOMAIN)
            .is_some_and(|name| name.ends_with('.') && name.len() > 1)
    }
}

impl FromStr for AccountId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidConfig {
            reason: format!("account id `{s}` {reason}"),
        };

        if s.len() < 2 || s.len() > MAX_ACCOUNT_ID_LEN {
            return Err(invalid("must be 2 to 64 characters long"));
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'_'))
        {
            return Err(invalid("may only contain a-z, 0-9, '.', '-' and '_'"));
        }
        // Separators may not lead, trail or repeat.
        let mut prev_sep = true;
        for b in s.bytes() {
            let sep = matches!(b, b'.' | b'-' | b'_');
            if sep && prev_sep {
                return Err(invalid("has a misplaced separator"));
            }
            prev_sep = sep;
        }
        if prev_sep {
            return Err(invalid("has a misplaced separator"));
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
