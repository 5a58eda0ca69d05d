//! Availability checks through the `view_account` RPC query.

use crate::{
    dispatch::Dispatcher,
    error::Result,
    identifier::AccountId,
    sleep::SleepProvider,
    transport::{Reply, Request, Transport},
};
use rand::{Rng, rng};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

static NOT_FOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)does not exist").expect("valid not-found pattern"));

const UNKNOWN_ACCOUNT: &str = "UNKNOWN_ACCOUNT";

/// Whether an account id is free to register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The network reported the account as missing.
    Available,
    /// The network returned the account's state.
    Taken,
    /// The reply was neither; the id is not considered free.
    Indeterminate,
}

/// Builds a `view_account` JSON-RPC request with a fresh random id.
pub fn view_account_request(account: &AccountId) -> Request {
    Request::post(
        "/",
        json!({
            "jsonrpc": "2.0",
            "id": rng().random_range(0..1_000_000u32),
            "method": "query",
            "params": {
                "request_type": "view_account",
                "account_id": account.as_str(),
                "finality": "optimistic",
            },
        }),
    )
}

/// Classifies a parsed `view_account` response body.
///
/// A not-found error message wins over everything, then a non-null `result`,
/// then an `UNKNOWN_ACCOUNT` marker anywhere in the body.
pub fn classify(body: &Value) -> Verdict {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .or_else(|| error.get("data").and_then(Value::as_str))
            .unwrap_or_default();
        if NOT_FOUND.is_match(message) {
            return Verdict::Available;
        }
    }
    if body.get("result").is_some_and(|r| !r.is_null()) {
        return Verdict::Taken;
    }
    if body.to_string().to_ascii_uppercase().contains(UNKNOWN_ACCOUNT) {
        return Verdict::Available;
    }
    Verdict::Indeterminate
}

/// Classifies a raw reply. Bodies that are not JSON are indeterminate.
pub fn classify_reply(reply: &Reply) -> Verdict {
    reply
        .json()
        .map_or(Verdict::Indeterminate, |body| classify(&body))
}

impl<T, S> Dispatcher<T, S>
where
    T: Transport,
    S: SleepProvider,
{
    /// Probes whether `account` is available.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::AllEndpointsExhausted`](crate::Error) from the
    /// dispatch.
    pub async fn probe(&self, account: &AccountId) -> Result<Verdict> {
        let reply = self.dispatch(|| view_account_request(account)).await?;
        Ok(classify_reply(&reply))
    }

    /// Fetches the account's on-chain state, or `None` if the query did not
    /// return one.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::AllEndpointsExhausted`](crate::Error) from the
    /// dispatch.
    pub async fn view_account(&self, account: &AccountId) -> Result<Option<Value>> {
        let reply = self.dispatch(|| view_account_request(account)).await?;
        Ok(reply
            .json()
            .and_then(|mut body| body.get_mut("result").map(Value::take))
            .filter(|result| !result.is_null()))
    }
}
