//! Run work against a deadline.
//!
//! The work runs on its own thread while the caller waits on a one-shot completion
//! signal. Whichever comes first, the signal or the deadline, decides the outcome.
//! On timeout the work thread is neither cancelled nor joined: it keeps running in
//! the background until it returns on its own.

use std::panic::Location;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::HelperError;
use crate::report::{Failure, FailureSink, Severity};

/// How a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithinOutcome {
    /// The work signalled completion before the deadline.
    Completed,
    /// The deadline passed first. The work is still running.
    TimedOut,
    /// The work panicked before it could signal completion.
    Panicked,
}

impl WithinOutcome {
    /// Whether the work finished in time.
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    pub(crate) fn report<S>(self, sink: &S, deadline: Duration, location: &Location<'_>)
    where
        S: FailureSink + ?Sized,
    {
        let message = match self {
            Self::Completed => return,
            Self::TimedOut => "timed out".to_string(),
            Self::Panicked => format!("work panicked before completing within {deadline:?}"),
        };
        sink.report(Failure::at(Severity::Error, message, location));
    }
}

/// Run `work` on a background thread and report a failure if it has not finished
/// within `deadline`.
///
/// ```rust
/// use std::time::Duration;
/// use strslice_testkit::report::PanicSink;
/// use strslice_testkit::timing::{WithinOutcome, within};
///
/// let outcome = within(&PanicSink, Duration::from_secs(1), || {
///     assert_eq!(2 + 2, 4);
/// });
/// assert_eq!(outcome, WithinOutcome::Completed);
/// ```
#[track_caller]
pub fn within<S, F>(sink: &S, deadline: Duration, work: F) -> WithinOutcome
where
    S: FailureSink + ?Sized,
    F: FnOnce() + Send + 'static,
{
    let location = Location::caller();
    let started = Instant::now();
    let (done_tx, done_rx) = mpsc::sync_channel::<()>(1);

    let spawned = thread::Builder::new()
        .name("within-work".to_string())
        .spawn(move || {
            work();
            // The waiter may already have given up; nobody to tell.
            let _ = done_tx.send(());
        });
    if let Err(err) = spawned {
        sink.report_fatal(Failure::at(
            Severity::Fatal,
            HelperError::SpawnWork(err).to_string(),
            location,
        ));
    }

    let outcome = match done_rx.recv_timeout(deadline) {
        Ok(()) => WithinOutcome::Completed,
        Err(RecvTimeoutError::Timeout) => WithinOutcome::TimedOut,
        Err(RecvTimeoutError::Disconnected) => WithinOutcome::Panicked,
    };
    tracing::debug!(?deadline, elapsed = ?started.elapsed(), ?outcome, "bounded work finished");
    outcome.report(sink, deadline, location);
    outcome
}
