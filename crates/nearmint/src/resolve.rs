//! Finding an available account id.

use crate::{
    dispatch::Dispatcher,
    error::{Error, Result},
    identifier::{AccountId, IdentifierGenerator, validate_prefix},
    probe::Verdict,
    rand::RandSource,
    sleep::SleepProvider,
    time::TimeSource,
    transport::Transport,
};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

/// Probe rounds allowed before giving up on a prefix.
pub const DEFAULT_MAX_NAME_ATTEMPTS: u32 = 10;

/// Generates and probes candidates until one is available.
///
/// Each round generates one fresh candidate and probes it once. Taken and
/// indeterminate candidates both consume a round; retries already absorbed by
/// the dispatcher do not.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `prefix` fails [`validate_prefix`]; nothing
///   is sent.
/// - [`Error::ExhaustedAttempts`] after `max_attempts` unsuccessful rounds.
/// - Any dispatch error from a probe, unchanged.
pub async fn resolve<T, S, R, C>(
    dispatcher: &Dispatcher<T, S>,
    generator: &IdentifierGenerator<R, C>,
    prefix: &str,
    max_attempts: u32,
) -> Result<AccountId>
where
    T: Transport,
    S: SleepProvider,
    R: RandSource,
    C: TimeSource,
{
    validate_prefix(prefix)?;

    for _round in 0..max_attempts {
        let candidate = generator.generate(prefix);
        match dispatcher.probe(&candidate).await? {
            Verdict::Available => {
                #[cfg(feature = "tracing")]
                info!(account = %candidate, round = _round + 1, "found available handle");
                return Ok(candidate);
            }
            _verdict => {
                #[cfg(feature = "tracing")]
                debug!(account = %candidate, verdict = ?_verdict, "handle unavailable");
            }
        }
    }

    Err(Error::ExhaustedAttempts {
        prefix: prefix.to_string(),
        attempts: max_attempts,
    })
}

/// Confirms that a caller-chosen account id is available.
///
/// # Errors
///
/// - [`Error::HandleTaken`] if the probe is anything but [`Verdict::Available`].
/// - Any dispatch error from the probe, unchanged.
pub async fn claim<T, S>(dispatcher: &Dispatcher<T, S>, account: AccountId) -> Result<AccountId>
where
    T: Transport,
    S: SleepProvider,
{
    match dispatcher.probe(&account).await? {
        Verdict::Available => Ok(account),
        Verdict::Taken | Verdict::Indeterminate => Err(Error::HandleTaken {
            identifier: account.to_string(),
        }),
    }
}
