//! Retry a predicate until it holds or a deadline passes.

use std::panic::Location;
use std::thread;
use std::time::{Duration, Instant};

use crate::report::{Failure, FailureSink, Severity};

/// Budget and pacing for [`retry_with_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total time allowed before the retry fails.
    pub timeout: Duration,
    /// Pause between attempts. `None` polls in a tight loop.
    pub poll_interval: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// Busy-polling policy with the given budget.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: None,
        }
    }

    /// Pause for `interval` between attempts.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Absolute deadline for a retry starting at `start`; `None` when it overflows.
    pub(crate) fn deadline_from(&self, start: Instant) -> Option<Instant> {
        start.checked_add(self.timeout)
    }

    /// How long to pause after a failed attempt, clamped to the time left.
    pub(crate) fn pause(&self, deadline: Option<Instant>) -> Option<Duration> {
        let interval = self.poll_interval?;
        Some(match deadline {
            Some(deadline) => interval.min(deadline.saturating_duration_since(Instant::now())),
            None => interval,
        })
    }

    pub(crate) fn exhausted(&self, attempts: u64, location: &Location<'_>) -> Failure {
        Failure::at(
            Severity::Error,
            format!(
                "failed after {:?} of retrying ({attempts} attempt(s))",
                self.timeout
            ),
            location,
        )
    }
}

pub(crate) fn before(deadline: Option<Instant>) -> bool {
    deadline.is_none_or(|deadline| Instant::now() < deadline)
}

/// Call `predicate` in a tight loop until it returns `true` or `timeout` elapses.
///
/// Returns `true` on success. On exhaustion reports one non-fatal failure and
/// returns `false`. A zero timeout makes no attempt.
///
/// ```rust
/// use std::time::Duration;
/// use strslice_testkit::report::PanicSink;
/// use strslice_testkit::timing::retry_until;
///
/// let mut polls = 0;
/// assert!(retry_until(&PanicSink, Duration::from_secs(1), || {
///     polls += 1;
///     polls == 3
/// }));
/// ```
#[track_caller]
pub fn retry_until<S, P>(sink: &S, timeout: Duration, predicate: P) -> bool
where
    S: FailureSink + ?Sized,
    P: FnMut() -> bool,
{
    retry_with_policy(sink, &RetryPolicy::new(timeout), predicate)
}

/// Like [`retry_until`], pacing attempts according to `policy`.
#[track_caller]
pub fn retry_with_policy<S, P>(sink: &S, policy: &RetryPolicy, mut predicate: P) -> bool
where
    S: FailureSink + ?Sized,
    P: FnMut() -> bool,
{
    let location = Location::caller();
    let deadline = policy.deadline_from(Instant::now());
    let mut attempts = 0_u64;

    while before(deadline) {
        attempts += 1;
        if predicate() {
            tracing::debug!(attempts, "retry succeeded");
            return true;
        }
        if let Some(pause) = policy.pause(deadline) {
            thread::sleep(pause);
        }
    }

    tracing::debug!(attempts, timeout = ?policy.timeout, "retry budget exhausted");
    sink.report(policy.exhausted(attempts, location));
    false
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::report::TestReport;

    #[test]
    fn succeeds_after_n_polls() {
        let report = TestReport::new();
        let polls = Cell::new(0);
        let ok = retry_until(&report, Duration::from_secs(2), || {
            polls.set(polls.get() + 1);
            polls.get() >= 5
        });
        assert!(ok);
        assert_eq!(polls.get(), 5);
        assert!(report.is_empty());
    }

    #[test]
    fn always_false_reports_once_after_deadline() {
        let report = TestReport::new();
        let started = Instant::now();
        let ok = retry_until(&report, Duration::from_millis(30), || false);

        assert!(!ok);
        assert!(started.elapsed() >= Duration::from_millis(30));
        let failures = report.take();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.starts_with("failed after 30ms of retrying"));
        assert!(failures[0].location.contains("retry.rs"));
    }

    #[test]
    fn zero_timeout_makes_no_attempt() {
        let report = TestReport::new();
        let polls = Cell::new(0);
        assert!(!retry_until(&report, Duration::ZERO, || {
            polls.set(polls.get() + 1);
            true
        }));
        assert_eq!(polls.get(), 0);
        assert_eq!(report.take().len(), 1);
    }

    #[test]
    fn poll_interval_spaces_attempts() {
        let report = TestReport::new();
        let policy = RetryPolicy::new(Duration::from_millis(60))
            .with_poll_interval(Duration::from_millis(20));
        let polls = Cell::new(0);
        let ok = retry_with_policy(&report, &policy, || {
            polls.set(polls.get() + 1);
            false
        });
        assert!(!ok);
        assert!(polls.get() <= 5, "paced retry polled {} times", polls.get());
        report.take();
    }

    #[test]
    fn overflowing_timeout_has_no_deadline() {
        let policy = RetryPolicy::new(Duration::MAX);
        assert_eq!(policy.deadline_from(Instant::now()), None);
        assert!(before(None));
        assert!(retry_with_policy(&TestReport::new(), &policy, || true));
    }

    #[test]
    fn default_policy_busy_polls_for_one_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.timeout, Duration::from_secs(1));
        assert_eq!(policy.poll_interval, None);
        assert_eq!(policy.pause(None), None);
    }
}
