//! Resilient NEAR account provisioning.
//!
//! The pieces, bottom-up:
//!
//! - [`Transport`] executes one request against one address; [`HttpTransport`]
//!   is the `reqwest` implementation, sharing a cookie [`Session`].
//! - [`Dispatcher`] walks an [`EndpointPool`] with per-endpoint retries and
//!   whole-pool fallback.
//! - [`IdentifierGenerator`] proposes account ids; [`resolve`] probes them
//!   until one is free.
//! - [`Provisioner`] registers an id with the relayer, redeems a referral code
//!   and verifies the account on-chain.
//! - [`Runner`] drives single and bulk runs and merges their outcome into a
//!   [`ResultDocument`] on disk.
//!
//! Enable the `tracing` feature for structured logs from every stage.

mod dispatch;
mod document;
mod endpoint;
mod error;
mod identifier;
mod keypair;
mod probe;
mod provision;
mod rand;
mod record;
mod relayer;
mod resolve;
mod runner;
mod sleep;
#[cfg(test)]
mod testing;
mod time;
mod transport;

pub use crate::dispatch::*;
pub use crate::document::*;
pub use crate::endpoint::*;
pub use crate::error::*;
pub use crate::identifier::*;
pub use crate::keypair::*;
pub use crate::probe::*;
pub use crate::provision::*;
pub use crate::rand::*;
pub use crate::record::*;
pub use crate::relayer::*;
pub use crate::resolve::*;
pub use crate::runner::*;
pub use crate::sleep::*;
pub use crate::time::*;
pub use crate::transport::*;
