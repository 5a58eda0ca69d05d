//! Per-attempt outcomes as they appear in the result document.

use crate::identifier::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether the account was visible on-chain right after registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Verified,
    Pending,
}

impl AccountStatus {
    pub const fn from_verified(verified: bool) -> Self {
        if verified { Self::Verified } else { Self::Pending }
    }
}

/// A successfully registered account, including its secret key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccountRecord {
    #[serde(alias = "handle")]
    pub identifier: AccountId,
    pub public_key: String,
    pub secret_key: String,
    pub relayer_token: String,
    pub referral_code: Option<String>,
    pub verified: bool,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// A bulk attempt that did not produce an account. `index` is 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureRecord {
    pub index: usize,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// One element of the document's `accounts` array.
///
/// Entries written by other tools or older versions that match neither
/// record shape are kept verbatim as [`AccountEntry::Other`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountEntry {
    Created(AccountRecord),
    Failed(FailureRecord),
    Other(Value),
}

impl AccountEntry {
    /// An entry is a failure iff it carries an `error` field.
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Created(_) => false,
            Self::Failed(_) => true,
            Self::Other(value) => value.get("error").is_some(),
        }
    }
}

impl From<AccountRecord> for AccountEntry {
    fn from(record: AccountRecord) -> Self {
        Self::Created(record)
    }
}

impl From<FailureRecord> for AccountEntry {
    fn from(record: FailureRecord) -> Self {
        Self::Failed(record)
    }
}
