//! Error types for account provisioning.
//!
//! This module defines the central [`Error`] enum. Each variant corresponds to
//! a failure boundary in the provisioning pipeline, and the run aggregator
//! uses that boundary to decide whether an error aborts the process (single
//! mode) or becomes a failure record (bulk mode).
//!
//! ## Error Cases
//! - `Transport`: a network, timeout or 5xx failure against one endpoint.
//! - `AllEndpointsExhausted`: every endpoint in a pool failed every retry.
//! - `ExhaustedAttempts`: no available identifier within the attempt budget.
//! - `HandleTaken`: a caller-supplied identifier is not available.
//! - `RegistrationRejected` / `RedemptionRejected`: the relayer answered
//!   with something other than `201 Created`.
//! - `VerificationFailed`: the post-registration lookup could not be made.
//! - `Persistence`: the result document could not be written.

use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the provisioning pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A single request against a single endpoint failed at the transport
    /// level, or the endpoint answered with a server error.
    #[error("Transport error at {endpoint}: {reason}")]
    Transport {
        endpoint: String,
        status: Option<u16>,
        reason: String,
    },

    /// Every endpoint of a pool was tried and none produced an answer.
    #[error("All {attempted} endpoint(s) exhausted")]
    AllEndpointsExhausted {
        attempted: usize,
        #[source]
        last: Box<Error>,
    },

    /// An endpoint pool was constructed without any endpoint.
    #[error("Endpoint pool is empty")]
    EmptyEndpointPool,

    /// Candidate resolution gave up.
    #[error("Failed to find available handle after {attempts} attempts (prefix `{prefix}`)")]
    ExhaustedAttempts { prefix: String, attempts: u32 },

    /// A caller-supplied identifier is already registered, or its status
    /// could not be determined.
    #[error("Handle {identifier} is not available")]
    HandleTaken { identifier: String },

    /// The relayer refused to create the account.
    #[error("Relayer create failed: HTTP {status} {body}")]
    RegistrationRejected { status: u16, body: String },

    /// The relayer refused to redeem the referral code.
    #[error("Redeem failed: HTTP {status} {body}")]
    RedemptionRejected { status: u16, body: String },

    /// The on-chain lookup after registration could not be completed.
    #[error("Verification failed for {identifier}")]
    VerificationFailed {
        identifier: String,
        #[source]
        source: Box<Error>,
    },

    /// The result document could not be read or written.
    #[error("Persistence error at {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    /// A configuration value was rejected before any work started.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns the HTTP status attached to this error, if any.
    ///
    /// For [`Error::AllEndpointsExhausted`] this is the status of the last
    /// failed attempt.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::AllEndpointsExhausted { last, .. } => last.status(),
            Self::RegistrationRejected { status, .. } | Self::RedemptionRejected { status, .. } => {
                Some(*status)
            }
            Self::VerificationFailed { source, .. } => source.status(),
            _ => None,
        }
    }
}
