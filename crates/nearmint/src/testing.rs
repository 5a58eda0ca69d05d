//! Test doubles for the transport, sleep, randomness and clock seams.

use crate::{
    error::{Error, Result},
    rand::RandSource,
    sleep::SleepProvider,
    time::TimeSource,
    transport::{Reply, Request, Transport},
};
use core::{cell::Cell, time::Duration};
use std::{cell::RefCell, rc::Rc};

type Responder = dyn Fn(&Request, usize) -> Result<Reply>;

/// A scripted [`Transport`]. The responder receives each request and the
/// zero-based index of the call on this transport.
#[derive(Clone)]
pub(crate) struct MockTransport {
    respond: Rc<Responder>,
    calls: Rc<RefCell<Vec<Request>>>,
}

impl MockTransport {
    pub(crate) fn new(respond: impl Fn(&Request, usize) -> Result<Reply> + 'static) -> Self {
        Self {
            respond: Rc::new(respond),
            calls: Rc::default(),
        }
    }

    pub(crate) fn always(status: u16, body: &'static str) -> Self {
        Self::new(move |_, _| Ok(Reply::new(status, body)))
    }

    /// Every call fails as if the connection was refused.
    pub(crate) fn unreachable() -> Self {
        Self::new(|_, _| {
            Err(Error::Transport {
                endpoint: "mock".to_string(),
                status: None,
                reason: "connection refused".to_string(),
            })
        })
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn calls(&self) -> Vec<Request> {
        self.calls.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, _address: &str, request: &Request) -> Result<Reply> {
        let index = {
            let mut calls = self.calls.borrow_mut();
            calls.push(request.clone());
            calls.len() - 1
        };
        (self.respond)(request, index)
    }
}

/// Returns immediately.
pub(crate) struct NoSleep;

impl SleepProvider for NoSleep {
    fn sleep_for(_dur: Duration) -> impl Future<Output = ()> {
        core::future::ready(())
    }
}

thread_local! {
    static SLEEPS: RefCell<Vec<Duration>> = const { RefCell::new(Vec::new()) };
}

/// Returns immediately but remembers each requested duration on the current
/// thread.
pub(crate) struct RecordedSleep;

impl RecordedSleep {
    /// Drains the durations recorded so far on this thread.
    pub(crate) fn take() -> Vec<Duration> {
        SLEEPS.with(|s| core::mem::take(&mut *s.borrow_mut()))
    }
}

impl SleepProvider for RecordedSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> {
        SLEEPS.with(|s| s.borrow_mut().push(dur));
        core::future::ready(())
    }
}

/// Replays a fixed sequence of picks (each reduced modulo the bound),
/// cycling when exhausted.
pub(crate) struct SeqRand {
    picks: Vec<usize>,
    next: Cell<usize>,
}

impl SeqRand {
    pub(crate) fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            next: Cell::new(0),
        }
    }
}

impl RandSource for SeqRand {
    fn pick(&self, bound: usize) -> usize {
        let i = self.next.get();
        self.next.set(i + 1);
        self.picks[i % self.picks.len()] % bound
    }
}

pub(crate) struct FixedTime(pub(crate) u64);

impl TimeSource for FixedTime {
    fn current_millis(&self) -> u64 {
        self.0
    }
}
