//! Failure reporting.
//!
//! Every assertion helper in this crate reports through a [`FailureSink`] instead of
//! panicking directly. Non-fatal failures are recorded and execution continues; fatal
//! failures are recorded and then abort the current test by panicking.
//!
//! # Example
//!
//! ```rust
//! use strslice_testkit::assert::equality::assert_equal;
//! use strslice_testkit::report::TestReport;
//!
//! let report = TestReport::new();
//! assert_equal(&report, 1 + 1, 3);
//! assert_equal(&report, "a", "b");
//! assert_eq!(report.take().len(), 2);
//! report.finish();
//! ```

use std::fmt;
use std::panic::Location;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// How a failure affects the current test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Recorded; the test keeps running.
    Error,
    /// Recorded; the test is aborted.
    Fatal,
}

/// A single reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Fatal or non-fatal.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// `file:line:column` of the test code that invoked the helper.
    pub location: String,
}

impl Failure {
    /// Build a failure located at the caller.
    #[track_caller]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::at(severity, message, Location::caller())
    }

    /// Build a non-fatal failure located at the caller.
    #[track_caller]
    pub fn error(message: impl Into<String>) -> Self {
        Self::at(Severity::Error, message, Location::caller())
    }

    /// Build a fatal failure located at the caller.
    #[track_caller]
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::at(Severity::Fatal, message, Location::caller())
    }

    /// Build a failure at an explicit location.
    pub fn at(severity: Severity, message: impl Into<String>, location: &Location<'_>) -> Self {
        Self {
            severity,
            message: message.into(),
            location: location.to_string(),
        }
    }

    /// Whether this failure aborts the test.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Sink that receives failures from assertion helpers.
pub trait FailureSink {
    /// Record a failure. The test keeps running.
    fn report(&self, failure: Failure);

    /// Record a failure and abort the current test.
    fn report_fatal(&self, failure: Failure) -> ! {
        let rendered = failure.to_string();
        self.report(failure);
        panic!("{rendered}");
    }
}

impl<S> FailureSink for &S
where
    S: FailureSink + ?Sized,
{
    fn report(&self, failure: Failure) {
        (**self).report(failure);
    }

    fn report_fatal(&self, failure: Failure) -> ! {
        (**self).report_fatal(failure)
    }
}

/// Sink that panics on the first failure, fatal or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    fn report(&self, failure: Failure) {
        panic!("{failure}");
    }
}

/// Thread-safe recorder of failures.
///
/// A report that still holds failures when it is dropped panics, so non-fatal
/// failures fail the enclosing test. Drain with [`TestReport::take`] when a test
/// expects failures.
#[derive(Debug, Default)]
pub struct TestReport {
    failures: Mutex<Vec<Failure>>,
}

impl TestReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Failure>> {
        // Pushes never panic mid-update, so a poisoned vector is still consistent.
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of recorded failures.
    pub fn failures(&self) -> Vec<Failure> {
        self.lock().clone()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether any failure has been recorded.
    pub fn has_failed(&self) -> bool {
        !self.is_empty()
    }

    /// Remove and return all recorded failures.
    pub fn take(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.lock())
    }

    /// Render recorded failures as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.lock())
    }

    /// Consume the report, panicking with a summary if anything was recorded.
    pub fn finish(self) {
        let failures = self.take();
        if !failures.is_empty() {
            panic!("{}", summarize(&failures));
        }
    }
}

impl FailureSink for TestReport {
    fn report(&self, failure: Failure) {
        tracing::warn!(
            severity = ?failure.severity,
            location = %failure.location,
            "{}",
            failure.message
        );
        self.lock().push(failure);
    }
}

impl Drop for TestReport {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let failures = std::mem::take(
            self.failures
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        if !failures.is_empty() {
            panic!("{}", summarize(&failures));
        }
    }
}

fn summarize(failures: &[Failure]) -> String {
    let mut out = format!("{} test failure(s) recorded:", failures.len());
    for failure in failures {
        out.push_str("\n  ");
        out.push_str(&failure.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_records_caller_location() {
        let failure = Failure::error("boom");
        assert!(failure.location.contains("report.rs"));
        assert_eq!(failure.severity, Severity::Error);
        assert!(!failure.is_fatal());
    }

    #[test]
    fn report_accumulates_and_drains() {
        let report = TestReport::new();
        report.report(Failure::error("first"));
        report.report(Failure::error("second"));
        assert!(report.has_failed());
        assert_eq!(report.len(), 2);

        let drained = report.take();
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].message, "second");
        assert!(report.is_empty());
        report.finish();
    }

    #[test]
    #[should_panic(expected = "1 test failure(s) recorded")]
    fn finish_panics_with_recorded_failures() {
        let report = TestReport::new();
        report.report(Failure::error("left behind"));
        report.finish();
    }

    #[test]
    #[should_panic(expected = "left behind")]
    fn dropping_unfinished_report_panics() {
        let report = TestReport::new();
        report.report(Failure::error("left behind"));
    }

    #[test]
    fn fatal_records_before_aborting() {
        let report = TestReport::new();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            report.report_fatal(Failure::fatal("stop here"));
        }));
        assert!(outcome.is_err());
        let failures = report.take();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_fatal());
    }

    #[test]
    #[should_panic(expected = "immediately")]
    fn panic_sink_panics_on_error() {
        PanicSink.report(Failure::error("immediately"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = TestReport::new();
        report.report(Failure::error("json me"));
        let json = report.to_json().expect("report should serialize");
        assert!(json.contains("\"severity\": \"error\""));
        assert!(json.contains("json me"));
        report.take();
    }
}
