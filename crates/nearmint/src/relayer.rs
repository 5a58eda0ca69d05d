//! Client for the wallet relayer that creates accounts and redeems referral
//! codes.
//!
//! The relayer is a single endpoint, so it runs through a one-endpoint
//! [`Dispatcher`]: transport failures and 5xx replies are retried, but there
//! is nothing to fall back to.

use crate::{
    dispatch::{Dispatcher, RetryPolicy},
    endpoint::{Endpoint, EndpointPool},
    error::{Error, Result},
    identifier::AccountId,
    sleep::{SleepProvider, TokioSleep},
    transport::{Request, Transport},
};
use serde_json::{Value, json};

/// HTTP status the relayer uses for both successful operations.
pub const CREATED: u16 = 201;

/// Paths of the relayer operations, relative to its base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayerRoutes {
    pub account: String,
    pub redeem: String,
}

impl Default for RelayerRoutes {
    fn default() -> Self {
        Self {
            account: "/api/relayer/account".to_string(),
            redeem: "/api/referral/redeem".to_string(),
        }
    }
}

pub struct RelayerClient<T, S = TokioSleep> {
    dispatcher: Dispatcher<T, S>,
    routes: RelayerRoutes,
}

impl<T, S> RelayerClient<T, S>
where
    T: Transport,
    S: SleepProvider,
{
    pub fn new(endpoint: Endpoint<T>, policy: RetryPolicy, routes: RelayerRoutes) -> Self {
        Self {
            dispatcher: Dispatcher::new(EndpointPool::single(endpoint), policy),
            routes,
        }
    }

    /// Registers `account` with `public_key` as its full-access key.
    ///
    /// Returns the relayer's session token: the trimmed response body, or the
    /// string it contains when the body is a JSON string literal.
    ///
    /// # Errors
    ///
    /// - [`Error::RegistrationRejected`] for any status other than 201.
    /// - Any dispatch error, unchanged.
    pub async fn create_account(&self, account: &AccountId, public_key: &str) -> Result<String> {
        let reply = self
            .dispatcher
            .dispatch(|| {
                Request::post(
                    &self.routes.account,
                    json!({ "publicKey": public_key, "id": account }),
                )
            })
            .await?;

        if reply.status != CREATED {
            return Err(Error::RegistrationRejected {
                status: reply.status,
                body: reply.body,
            });
        }

        Ok(match reply.json() {
            Some(Value::String(token)) => token.trim().to_string(),
            _ => reply.body.trim().to_string(),
        })
    }

    /// Redeems `code` on behalf of `account`.
    ///
    /// # Errors
    ///
    /// - [`Error::RedemptionRejected`] for any status other than 201.
    /// - Any dispatch error, unchanged.
    pub async fn redeem(&self, code: &str, account: &AccountId) -> Result<()> {
        let reply = self
            .dispatcher
            .dispatch(|| {
                Request::post(
                    &self.routes.redeem,
                    json!({ "redeemedCode": code, "address": account }),
                )
                .with_header("accept", "application/json")
            })
            .await?;

        if reply.status != CREATED {
            return Err(Error::RedemptionRejected {
                status: reply.status,
                body: reply.body,
            });
        }
        Ok(())
    }
}
