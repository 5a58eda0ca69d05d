use core::time::Duration;

/// A trait that abstracts over how to sleep for a given [`Duration`] in async
/// contexts.
///
/// The dispatcher sleeps between retries and the run aggregator sleeps
/// between attempts; both go through this trait so tests can skip the wait.
pub trait SleepProvider {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()>;
}

/// An implementation of [`SleepProvider`] using Tokio's timer.
///
/// This is the default provider for use in async applications built on Tokio.
#[derive(Debug)]
pub struct TokioSleep;

impl SleepProvider for TokioSleep {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(dur)
    }
}
