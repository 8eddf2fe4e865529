//! Response header assertions.

use std::collections::{BTreeMap, HashMap};

use crate::report::{Failure, FailureSink};

/// Header name checked by [`assert_content_type`].
pub const CONTENT_TYPE: &str = "content-type";

/// Response-like value with case-insensitive header lookup.
pub trait HeaderLookup {
    /// Value of the first header named `name`, ignoring ASCII case.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl HeaderLookup for BTreeMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Headers captured from a response produced by a handler under test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedResponse {
    /// Headers in insertion order.
    pub headers: Vec<(String, String)>,
}

impl RecordedResponse {
    /// Response with no headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl HeaderLookup for RecordedResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Report a non-fatal failure when the response's content type is not `want`.
///
/// A missing header reads as the empty string.
#[track_caller]
pub fn assert_content_type<S, R>(sink: &S, response: &R, want: &str)
where
    S: FailureSink + ?Sized,
    R: HeaderLookup + ?Sized,
{
    let got = response.header(CONTENT_TYPE).unwrap_or_default();
    if got != want {
        sink.report(Failure::error(format!(
            "response did not have content-type of {want}, got {got:?}"
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TestReport;

    const JSON: &str = "application/json";

    #[test]
    fn matching_content_type_passes() {
        let report = TestReport::new();
        let response = RecordedResponse::new()
            .with_header("X-Request-Id", "7")
            .with_header("Content-Type", JSON);
        assert_content_type(&report, &response, JSON);
        assert!(report.is_empty());
    }

    #[test]
    fn mismatched_or_missing_content_type_fails() {
        let report = TestReport::new();
        let html = RecordedResponse::new().with_header("content-type", "text/html");
        assert_content_type(&report, &html, JSON);
        assert_content_type(&report, &RecordedResponse::new(), JSON);

        let failures = report.take();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].message.contains("got \"text/html\""));
        assert!(failures[1].message.contains("got \"\""));
    }

    #[test]
    fn map_lookup_ignores_case() {
        let headers = HashMap::from([("CONTENT-TYPE".to_string(), JSON.to_string())]);
        assert_eq!(headers.header("content-type"), Some(JSON));
        let report = TestReport::new();
        assert_content_type(&report, &headers, JSON);
        assert!(report.is_empty());
    }
}
