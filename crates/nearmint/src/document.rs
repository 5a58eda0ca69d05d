//! The persisted result document and its read-merge-write cycle.
//!
//! Older tools wrote either a bare array of records or an object with an
//! `accounts` array. [`load_entries`] accepts both and hands the rest of the
//! crate a plain `Vec<AccountEntry>`; nothing past that boundary knows which
//! shape was on disk.
//!
//! Prior entries are never reinterpreted. They stay raw JSON and are written
//! back with the same keys and values; only this run's entries are typed.

use crate::{
    error::{Error, Result},
    record::AccountEntry,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{io::Write, path::Path};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// The run parameters recorded alongside the accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub prefix: String,
    pub referral_code: Option<String>,
    pub delay_ms: u64,
}

/// The aggregate written to the output path.
///
/// `total_created` and `total_failed` are always derived from `accounts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    pub total_requested: usize,
    pub total_created: usize,
    pub total_failed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub config: RunSnapshot,
    pub accounts: Vec<AccountEntry>,
}

impl ResultDocument {
    /// A document holding only this run's entries.
    pub fn fresh(config: RunSnapshot, requested: usize, entries: Vec<AccountEntry>) -> Self {
        let mut doc = Self {
            total_requested: requested.max(entries.len()),
            total_created: 0,
            total_failed: 0,
            created_at: Some(Utc::now()),
            last_updated: None,
            config,
            accounts: entries,
        };
        doc.recount();
        doc
    }

    /// Appends this run's entries to a prior document's entries.
    ///
    /// `total_requested` becomes the merged entry count; counts stored in the
    /// prior document are never consulted.
    pub fn merged(
        config: RunSnapshot,
        mut prior: Vec<AccountEntry>,
        entries: Vec<AccountEntry>,
    ) -> Self {
        prior.extend(entries);
        let mut doc = Self {
            total_requested: prior.len(),
            total_created: 0,
            total_failed: 0,
            created_at: None,
            last_updated: Some(Utc::now()),
            config,
            accounts: prior,
        };
        doc.recount();
        doc
    }

    /// Recomputes the created and failed totals from `accounts`.
    pub fn recount(&mut self) {
        self.total_failed = self.accounts.iter().filter(|e| e.is_failure()).count();
        self.total_created = self.accounts.len() - self.total_failed;
    }

    /// Merges `entries` with whatever is stored at `path`.
    pub fn merge_with_file(
        path: &Path,
        config: RunSnapshot,
        requested: usize,
        entries: Vec<AccountEntry>,
    ) -> Self {
        match load_entries(path) {
            Some(prior) => Self::merged(config, prior, entries),
            None => Self::fresh(config, requested, entries),
        }
    }

    /// Writes the document to `path`, pretty-printed, replacing any existing
    /// file atomically.
    ///
    /// # Errors
    ///
    /// [`Error::Persistence`] if serialization, the temporary file or the
    /// final rename fails. The previous file, if any, is left intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|e| Error::persistence(path, e))?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::persistence(path, e))?;
        let written = tmp
            .write_all(&bytes)
            .and_then(|()| tmp.write_all(b"\n"))
            .and_then(|()| tmp.as_file().sync_all());
        written.map_err(|e| Error::persistence(path, e))?;
        tmp.persist(path)
            .map_err(|e| Error::persistence(path, e.error))?;

        #[cfg(feature = "tracing")]
        debug!(path = %path.display(), accounts = self.accounts.len(), "result document written");
        Ok(())
    }
}

/// Reads the entries of a prior document.
///
/// Every entry comes back as [`AccountEntry::Other`] holding the stored JSON
/// unchanged.
///
/// Returns `None` when the file is absent, unreadable, not JSON, or neither
/// an array nor an object with an `accounts` array.
pub fn load_entries(path: &Path) -> Option<Vec<AccountEntry>> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            if _e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %_e, "prior document unreadable, starting fresh");
            }
            return None;
        }
    };

    let value: Value = match serde_json::from_slice(&raw) {
        Ok(value) => value,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            warn!(path = %path.display(), error = %_e, "prior document is not valid JSON, starting fresh");
            return None;
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("accounts") {
            Some(Value::Array(items)) => items,
            _ => {
                #[cfg(feature = "tracing")]
                warn!(path = %path.display(), "prior document has no accounts array, starting fresh");
                return None;
            }
        },
        _ => {
            #[cfg(feature = "tracing")]
            warn!(path = %path.display(), "prior document has an unexpected root, starting fresh");
            return None;
        }
    };

    Some(items.into_iter().map(AccountEntry::Other).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FailureRecord;
    use serde_json::json;
    use std::fs;

    fn snapshot() -> RunSnapshot {
        RunSnapshot {
            prefix: "yl".to_string(),
            referral_code: Some("E9418U".to_string()),
            delay_ms: 2000,
        }
    }

    fn failure(index: usize) -> AccountEntry {
        FailureRecord {
            index,
            error: "Relayer create failed: HTTP 500".to_string(),
            timestamp: Utc::now(),
        }
        .into()
    }

    fn created(handle: &str) -> Value {
        json!({
            "identifier": handle,
            "publicKey": "ed25519:abc",
            "secretKey": "def",
            "relayerToken": "tok",
            "referralCode": "E9418U",
            "verified": false,
            "status": "PENDING",
            "createdAt": "2025-01-02T03:04:05Z"
        })
    }

    #[test]
    fn merge_appends_and_recounts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(
            &path,
            json!({
                "totalRequested": 40,
                "totalCreated": 17,
                "totalFailed": 9,
                "accounts": [created("ylfirst.near")]
            })
            .to_string(),
        )
        .unwrap();

        let doc = ResultDocument::merge_with_file(&path, snapshot(), 1, vec![failure(1)]);

        assert_eq!(doc.accounts.len(), 2);
        assert_eq!(doc.total_requested, 2);
        assert_eq!(doc.total_created, 1);
        assert_eq!(doc.total_failed, 1);
        assert!(doc.last_updated.is_some());
        assert!(doc.created_at.is_none());
        assert!(matches!(&doc.accounts[0], AccountEntry::Other(v) if v["identifier"] == "ylfirst.near"));
        assert!(doc.accounts[1].is_failure());
    }

    #[test]
    fn prior_entries_are_kept_verbatim_and_counted_by_error_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut legacy = created("ylold.near");
        let fields = legacy.as_object_mut().unwrap();
        let identifier = fields.remove("identifier").unwrap();
        fields.insert("handle".to_string(), identifier);
        fields.insert("error".to_string(), json!("Redeem failed: HTTP 409"));
        fields.insert("note".to_string(), json!("kept"));
        fs::write(&path, json!({ "accounts": [legacy.clone()] }).to_string()).unwrap();

        let doc = ResultDocument::merge_with_file(&path, snapshot(), 0, Vec::new());
        assert_eq!(doc.total_failed, 1);
        assert_eq!(doc.total_created, 0);
        doc.save(&path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["accounts"][0], legacy);
        assert!(written["accounts"][0].get("identifier").is_none());
        assert_eq!(written["totalFailed"], 1);
        assert_eq!(written["totalCreated"], 0);
    }

    #[test]
    fn array_root_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, json!([created("yla.near"), created("ylb.near")]).to_string()).unwrap();

        let doc = ResultDocument::merge_with_file(&path, snapshot(), 1, vec![failure(1)]);

        assert_eq!(doc.accounts.len(), 3);
        assert_eq!(doc.total_created, 2);
        assert_eq!(doc.total_failed, 1);
    }

    #[test]
    fn corrupt_or_absent_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let doc = ResultDocument::merge_with_file(&path, snapshot(), 3, vec![failure(2)]);
        assert_eq!(doc.total_requested, 3);
        assert_eq!(doc.accounts.len(), 1);
        assert!(doc.created_at.is_some());

        for garbage in ["{not json", "42", r#"{"accounts": "nope"}"#] {
            fs::write(&path, garbage).unwrap();
            let doc = ResultDocument::merge_with_file(&path, snapshot(), 1, vec![failure(1)]);
            assert_eq!(doc.accounts.len(), 1, "{garbage}");
            assert!(doc.last_updated.is_none());
        }
    }

    #[test]
    fn unknown_entries_survive_a_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let odd = json!({ "note": "hand edited", "n": 1 });
        fs::write(&path, json!({ "accounts": [odd.clone()] }).to_string()).unwrap();

        let doc = ResultDocument::merge_with_file(&path, snapshot(), 1, vec![failure(1)]);
        doc.save(&path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["accounts"][0], odd);
        assert_eq!(written["totalCreated"], 1);
        assert_eq!(written["totalFailed"], 1);
    }

    #[test]
    fn save_writes_pretty_document_and_no_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "stale").unwrap();

        let doc = ResultDocument::fresh(snapshot(), 1, vec![failure(1)]);
        doc.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"totalRequested\": 1,"));
        let written: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(written["config"]["referralCode"], "E9418U");
        assert_eq!(written["config"]["delayMs"], 2000);
        assert!(written.get("createdAt").is_some());
        assert!(written.get("lastUpdated").is_none());

        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn save_into_missing_directory_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = ResultDocument::fresh(snapshot(), 0, Vec::new())
            .save(&path)
            .unwrap_err();
        assert!(matches!(err, Error::Persistence { path: p, .. } if p == path));
    }
}
