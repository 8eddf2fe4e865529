//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use strslice_testkit::prelude::*;
//!
//! let report = TestReport::new();
//! assert_equal(&report, reverse("abc"), "cba");
//! report.finish();
//! ```

pub use crate::assert::equality::{assert_deep_equal, assert_equal, assert_no_error};
pub use crate::assert::headers::{HeaderLookup, RecordedResponse, assert_content_type};
pub use crate::assert::message::{MessageSource, assert_message};
pub use crate::fixture::{TempFile, create_temp_file, create_temp_file_in};
pub use crate::generators::strings::{numeric_string, string_seq, text, unique_string_seq};
pub use crate::report::{Failure, FailureSink, PanicSink, Severity, TestReport};
pub use crate::strslice::{
    NOT_FOUND, all, any, contains, filter, index_of, map, position, reverse,
};
pub use crate::timing::{RetryPolicy, WithinOutcome, retry_until, retry_with_policy, within};

#[cfg(feature = "tokio-helpers")]
pub use crate::assert::message::{AsyncMessageSource, assert_message_async};
#[cfg(feature = "tokio-helpers")]
pub use crate::timing::tokio::{retry_until_async, within_async};
