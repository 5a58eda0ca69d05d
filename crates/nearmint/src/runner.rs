//! Drives one or many provisioning attempts and persists the outcome.

use crate::{
    document::{ResultDocument, RunSnapshot},
    error::{Error, Result},
    identifier::{AccountId, IdentifierGenerator},
    provision::Provisioner,
    rand::{RandSource, ThreadRandom},
    record::{AccountEntry, AccountRecord, FailureRecord},
    resolve::{DEFAULT_MAX_NAME_ATTEMPTS, claim, resolve},
    sleep::{SleepProvider, TokioSleep},
    time::{SystemClock, TimeSource},
    transport::Transport,
};
use chrono::Utc;
use core::time::Duration;
use std::path::PathBuf;

#[cfg(feature = "tracing")]
use tracing::{error, info, warn};

/// Default pause between bulk attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);
/// Default location of the result document.
pub const DEFAULT_OUTPUT_PATH: &str = "bulk_accounts.json";
pub const DEFAULT_PREFIX: &str = "yl";
pub const DEFAULT_REFERRAL_CODE: &str = "E9418U";

/// What a run does. Validation happens before this is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub prefix: String,
    /// `None` skips redemption.
    pub referral_code: Option<String>,
    /// Attempts in a bulk run.
    pub count: usize,
    /// Pause between consecutive attempts. Not applied after the last one.
    pub delay: Duration,
    pub output_path: PathBuf,
    pub max_name_attempts: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            referral_code: Some(DEFAULT_REFERRAL_CODE.to_string()),
            count: 1,
            delay: DEFAULT_DELAY,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
        }
    }
}

impl RunConfig {
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            prefix: self.prefix.clone(),
            referral_code: self.referral_code.clone(),
            delay_ms: u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// The result of a run.
#[derive(Debug)]
pub struct RunReport {
    /// The merged document, as written (or as it would have been written).
    pub document: ResultDocument,
    /// Entries produced by this run only, in attempt order.
    pub entries: Vec<AccountEntry>,
    /// Set when the document could not be written.
    pub persist_error: Option<Error>,
}

impl RunReport {
    pub fn created(&self) -> impl Iterator<Item = &AccountRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            AccountEntry::Created(record) => Some(record),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &FailureRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            AccountEntry::Failed(record) => Some(record),
            _ => None,
        })
    }
}

pub struct Runner<Q, R, G = ThreadRandom, C = SystemClock, S = TokioSleep> {
    provisioner: Provisioner<Q, R, S>,
    generator: IdentifierGenerator<G, C>,
    config: RunConfig,
}

impl<Q, R, G, C, S> Runner<Q, R, G, C, S>
where
    Q: Transport,
    R: Transport,
    G: RandSource,
    C: TimeSource,
    S: SleepProvider,
{
    pub fn new(
        provisioner: Provisioner<Q, R, S>,
        generator: IdentifierGenerator<G, C>,
        config: RunConfig,
    ) -> Self {
        Self {
            provisioner,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn provisioner(&self) -> &Provisioner<Q, R, S> {
        &self.provisioner
    }

    /// Runs `config.count` attempts one after another.
    ///
    /// A failed attempt becomes a [`FailureRecord`] with its 1-based index
    /// and the run moves on. The document is merged and written once, after
    /// the last attempt; a write failure is reported in
    /// [`RunReport::persist_error`] rather than discarding the run.
    pub async fn run_many(&self) -> RunReport {
        let count = self.config.count;
        let mut entries = Vec::with_capacity(count);

        for i in 0..count {
            if i > 0 {
                S::sleep_for(self.config.delay).await;
            }

            #[cfg(feature = "tracing")]
            info!(attempt = i + 1, of = count, "starting attempt");

            let entry = match self.attempt(None).await {
                Ok(record) => AccountEntry::Created(record),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    warn!(attempt = i + 1, error = %e, "attempt failed");

                    AccountEntry::Failed(FailureRecord {
                        index: i + 1,
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    })
                }
            };
            entries.push(entry);
        }

        self.persist(count, entries)
    }

    /// Provisions a single account, optionally with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// Any failure before the record exists is returned as-is and nothing is
    /// written. A caller-chosen id that is not available yields
    /// [`Error::HandleTaken`].
    pub async fn run_one(&self, handle: Option<AccountId>) -> Result<RunReport> {
        let record = self.attempt(handle).await?;
        Ok(self.persist(1, vec![AccountEntry::Created(record)]))
    }

    async fn attempt(&self, handle: Option<AccountId>) -> Result<AccountRecord> {
        let query = self.provisioner.query();
        let account = match handle {
            Some(handle) => claim(query, handle).await?,
            None => {
                resolve(
                    query,
                    &self.generator,
                    &self.config.prefix,
                    self.config.max_name_attempts,
                )
                .await?
            }
        };
        self.provisioner
            .provision(account, self.config.referral_code.as_deref())
            .await
    }

    fn persist(&self, requested: usize, entries: Vec<AccountEntry>) -> RunReport {
        let path = &self.config.output_path;
        let document =
            ResultDocument::merge_with_file(path, self.config.snapshot(), requested, entries.clone());
        let persist_error = document.save(path).err();

        #[cfg(feature = "tracing")]
        if let Some(e) = &persist_error {
            error!(error = %e, "failed to write result document");
        }

        RunReport {
            document,
            entries,
            persist_error,
        }
    }
}
