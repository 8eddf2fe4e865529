//! Assertion helpers that report through a [`FailureSink`](crate::report::FailureSink).

pub mod equality;
pub mod headers;
pub mod message;
