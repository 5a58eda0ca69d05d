//! Multi-endpoint request execution with per-endpoint retry and whole-pool
//! fallback.
//!
//! [`Dispatcher::dispatch`] walks the [`EndpointPool`] in configured order.
//! Each endpoint gets [`RetryPolicy::attempts`] tries with exponential
//! backoff between them. The first reply with a status in `[200, 500)` wins,
//! including 4xx: a read replica saying "not found" is an answer, not a
//! failure. 5xx replies and transport errors move on to the next try, then
//! the next endpoint.

use crate::{
    endpoint::EndpointPool,
    error::{Error, Result},
    sleep::{SleepProvider, TokioSleep},
    transport::{Reply, Request, Transport},
};
use core::{marker::PhantomData, time::Duration};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, warn};

/// How hard to push a single endpoint before falling back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Tries per endpoint, including the first. Treated as at least 1.
    pub attempts: u32,
    /// Delay before the first retry; doubles for each retry after that.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Two tries per endpoint, 500ms apart. Used for the query endpoints.
    pub const QUERY: Self = Self {
        attempts: 2,
        base_delay: Duration::from_millis(500),
    };

    /// Three tries, backing off 1s then 2s. Used for the single relayer
    /// endpoint, which has nothing to fall back to.
    pub const RELAYER: Self = Self {
        attempts: 3,
        base_delay: Duration::from_millis(1000),
    };

    /// The delay to wait after failed try `retry` (0-based) of an endpoint.
    pub fn backoff(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::QUERY
    }
}

/// Executes requests against an [`EndpointPool`].
///
/// The sleep provider `S` is only used for backoff; tests substitute one
/// that returns immediately.
pub struct Dispatcher<T, S = TokioSleep> {
    pool: EndpointPool<T>,
    policy: RetryPolicy,
    _sleep: PhantomData<S>,
}

impl<T, S> Dispatcher<T, S>
where
    T: Transport,
    S: SleepProvider,
{
    pub fn new(pool: EndpointPool<T>, policy: RetryPolicy) -> Self {
        Self {
            pool,
            policy,
            _sleep: PhantomData,
        }
    }

    pub fn pool(&self) -> &EndpointPool<T> {
        &self.pool
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Sends the request produced by `build` until some endpoint answers.
    ///
    /// `build` is invoked once per try, so each try gets a freshly built
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllEndpointsExhausted`] carrying the last observed
    /// error when every try on every endpoint failed.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub async fn dispatch<F>(&self, build: F) -> Result<Reply>
    where
        F: Fn() -> Request,
    {
        let attempts = self.policy.attempts.max(1);
        let mut last = None;

        for endpoint in self.pool.iter() {
            for retry in 0..attempts {
                let request = build();
                match endpoint
                    .transport()
                    .execute(endpoint.address(), &request)
                    .await
                {
                    Ok(reply) if reply.is_answer() => return Ok(reply),
                    Ok(reply) => {
                        last = Some(Error::Transport {
                            endpoint: endpoint.address().to_string(),
                            status: Some(reply.status),
                            reason: format!("HTTP {}", reply.status),
                        });
                    }
                    Err(e) => last = Some(e),
                }

                #[cfg(feature = "tracing")]
                if let Some(e) = &last {
                    debug!(endpoint = endpoint.address(), retry, "request failed: {e}");
                }

                if retry + 1 < attempts {
                    S::sleep_for(self.policy.backoff(retry)).await;
                }
            }

            #[cfg(feature = "tracing")]
            warn!(endpoint = endpoint.address(), "endpoint exhausted, falling back");
        }

        // The pool is never empty and every endpoint gets at least one try.
        let Some(last) = last else {
            return Err(Error::EmptyEndpointPool);
        };
        Err(Error::AllEndpointsExhausted {
            attempted: self.pool.len(),
            last: Box::new(last),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        endpoint::Endpoint,
        testing::{MockTransport, NoSleep},
    };
    use core::cell::Cell;
    use serde_json::json;

    fn dispatcher(transports: &[MockTransport]) -> Dispatcher<MockTransport, NoSleep> {
        let endpoints = transports
            .iter()
            .enumerate()
            .map(|(i, t)| Endpoint::new(format!("https://rpc-{i}.test"), t.clone()))
            .collect();
        Dispatcher::new(EndpointPool::new(endpoints).unwrap(), RetryPolicy::QUERY)
    }

    fn ping() -> Request {
        Request::post("/", json!({ "method": "ping" }))
    }

    #[tokio::test]
    async fn falls_back_to_the_last_healthy_endpoint() {
        let down = MockTransport::always(503, "unavailable");
        let broken = MockTransport::unreachable();
        let healthy = MockTransport::always(200, r#"{"result":{}}"#);
        let dispatcher = dispatcher(&[down.clone(), broken.clone(), healthy.clone()]);

        let reply = dispatcher.dispatch(ping).await.unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(down.call_count(), 2);
        assert_eq!(broken.call_count(), 2);
        assert_eq!(healthy.call_count(), 1);
    }

    #[tokio::test]
    async fn client_errors_are_answers() {
        let first = MockTransport::always(404, "not found");
        let second = MockTransport::always(200, "{}");
        let dispatcher = dispatcher(&[first.clone(), second.clone()]);

        let reply = dispatcher.dispatch(ping).await.unwrap();

        assert_eq!(reply.status, 404);
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 0);
    }

    #[tokio::test]
    async fn retries_the_same_endpoint_before_falling_back() {
        let flaky = MockTransport::new(|_, n| {
            if n == 0 {
                Ok(crate::Reply::new(502, "bad gateway"))
            } else {
                Ok(crate::Reply::new(200, "ok"))
            }
        });
        let spare = MockTransport::always(200, "spare");
        let dispatcher = dispatcher(&[flaky.clone(), spare.clone()]);

        let reply = dispatcher.dispatch(ping).await.unwrap();

        assert_eq!(reply.body, "ok");
        assert_eq!(flaky.call_count(), 2);
        assert_eq!(spare.call_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_pool_reports_last_error() {
        let a = MockTransport::unreachable();
        let b = MockTransport::always(503, "unavailable");
        let dispatcher = dispatcher(&[a.clone(), b.clone()]);

        let err = dispatcher.dispatch(ping).await.unwrap_err();

        match &err {
            Error::AllEndpointsExhausted { attempted, last } => {
                assert_eq!(*attempted, 2);
                assert!(matches!(
                    **last,
                    Error::Transport {
                        status: Some(503),
                        ..
                    }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.status(), Some(503));
        assert_eq!(a.call_count() + b.call_count(), 4);
    }

    #[tokio::test]
    async fn rebuilds_the_request_for_every_try() {
        let builds = Cell::new(0);
        let dispatcher = dispatcher(&[
            MockTransport::unreachable(),
            MockTransport::always(200, "ok"),
        ]);

        dispatcher
            .dispatch(|| {
                builds.set(builds.get() + 1);
                ping()
            })
            .await
            .unwrap();

        assert_eq!(builds.get(), 3);
    }

    #[test]
    fn backoff_doubles_per_retry() {
        let policy = RetryPolicy::QUERY;
        assert_eq!(policy.backoff(0), Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(RetryPolicy::RELAYER.backoff(1), Duration::from_millis(2000));
    }
}
