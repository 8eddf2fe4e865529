//! Bounded-time execution and retry-until-timeout helpers.
//!
//! Both helpers report through a [`FailureSink`](crate::report::FailureSink):
//! a timeout or an exhausted retry budget is a non-fatal failure.

pub mod retry;
#[cfg(feature = "tokio-helpers")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio-helpers")))]
pub mod tokio;
pub mod within;

pub use retry::{RetryPolicy, retry_until, retry_with_policy};
pub use within::{WithinOutcome, within};
