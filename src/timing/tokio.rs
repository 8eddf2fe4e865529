//! Tokio variants of the bounded-time and retry helpers.

use std::future::Future;
use std::panic::Location;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;

use super::retry::{RetryPolicy, before};
use super::within::WithinOutcome;
use crate::report::FailureSink;

/// Spawn `work` on the current runtime and report a failure if it has not finished
/// within `deadline`.
///
/// The spawned task is detached: it is not aborted on timeout and runs to completion
/// in the background.
#[track_caller]
pub fn within_async<'a, S, F>(
    sink: &'a S,
    deadline: Duration,
    work: F,
) -> impl Future<Output = WithinOutcome> + 'a
where
    S: FailureSink + ?Sized,
    F: Future<Output = ()> + Send + 'static,
{
    let location = Location::caller();
    async move {
        let (done_tx, done_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            work.await;
            let _ = done_tx.send(());
        });

        let outcome = match tokio::time::timeout(deadline, done_rx).await {
            Ok(Ok(())) => WithinOutcome::Completed,
            Ok(Err(_)) => WithinOutcome::Panicked,
            Err(_) => WithinOutcome::TimedOut,
        };
        tracing::debug!(?deadline, ?outcome, "bounded task finished");
        outcome.report(sink, deadline, location);
        outcome
    }
}

/// Await `predicate()` repeatedly until it resolves to `true` or the policy's
/// timeout elapses.
///
/// Between attempts the task sleeps for the policy's poll interval, or yields to the
/// scheduler when none is set.
#[track_caller]
pub fn retry_until_async<'a, S, P, Fut>(
    sink: &'a S,
    policy: &'a RetryPolicy,
    mut predicate: P,
) -> impl Future<Output = bool> + 'a
where
    S: FailureSink + ?Sized,
    P: FnMut() -> Fut + 'a,
    Fut: Future<Output = bool> + 'a,
{
    let location = Location::caller();
    async move {
        let deadline = policy.deadline_from(Instant::now());
        let mut attempts = 0_u64;

        while before(deadline) {
            attempts += 1;
            if predicate().await {
                tracing::debug!(attempts, "async retry succeeded");
                return true;
            }
            match policy.pause(deadline) {
                Some(pause) => tokio::time::sleep(pause).await,
                None => tokio::task::yield_now().await,
            }
        }

        tracing::debug!(attempts, timeout = ?policy.timeout, "async retry budget exhausted");
        sink.report(policy.exhausted(attempts, location));
        false
    }
}
