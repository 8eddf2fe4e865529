//! # strslice-testkit
//!
//! `strslice-testkit` bundles two small, independent toolkits:
//! - `strslice`: reverse, lookup, quantifiers, filter and map over string sequences
//! - test helpers that report through a [`report::FailureSink`]:
//!   - `assert`: value, structural, content-type and streamed-message checks
//!   - `fixture`: temporary files that are removed on release
//!   - `timing`: bounded-time execution and retry-until-timeout
//!   - `timing::tokio`: async variants (feature `tokio-helpers`)
//! - `generators`: proptest strategies for string-sequence properties

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod assert;
pub mod error;
pub mod fixture;
pub mod generators;
pub mod prelude;
pub mod report;
pub mod strslice;
pub mod timing;

pub use error::HelperError;

/// Re-export `proptest` for convenience.
pub use proptest;
