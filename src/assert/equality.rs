//! Value and structural equality assertions.

use std::fmt::{Debug, Display};

use serde::Serialize;
use serde_json::Value;

use crate::error::HelperError;
use crate::report::{Failure, FailureSink};

/// Report a non-fatal failure when `got != want`.
#[track_caller]
pub fn assert_equal<S, T, U>(sink: &S, got: T, want: U)
where
    S: FailureSink + ?Sized,
    T: PartialEq<U> + Debug,
    U: Debug,
{
    if got != want {
        sink.report(Failure::error(format!(
            "did not equal, got {got:#?}, want {want:#?}"
        )));
    }
}

/// Report a non-fatal failure when `got` and `want` differ structurally.
///
/// Equality is decided by the values' recursive `PartialEq`, so sequences, maps and
/// derived records are compared element by element. On a mismatch both sides are
/// also lowered to a JSON document model to name the first differing path; values
/// that cannot be lowered, or that lower identically, are reported without a path.
///
/// ```rust
/// use std::collections::HashMap;
/// use strslice_testkit::assert::equality::assert_deep_equal;
/// use strslice_testkit::report::PanicSink;
///
/// let got: HashMap<&str, Vec<u8>> = HashMap::from([("a", vec![1, 2]), ("b", vec![])]);
/// let want: HashMap<&str, Vec<u8>> = HashMap::from([("b", vec![]), ("a", vec![1, 2])]);
/// assert_deep_equal(&PanicSink, &got, &want);
/// ```
#[track_caller]
pub fn assert_deep_equal<S, T, U>(sink: &S, got: &T, want: &U)
where
    S: FailureSink + ?Sized,
    T: PartialEq<U> + Serialize + Debug + ?Sized,
    U: Serialize + Debug + ?Sized,
{
    if got == want {
        return;
    }
    let message = match difference_path(got, want) {
        Some(path) => format!("got {got:#?} want {want:#?} (first difference at {path})"),
        None => format!("got {got:#?} want {want:#?}"),
    };
    sink.report(Failure::error(message));
}

/// Unwrap `result`, aborting the test when it holds an error.
#[track_caller]
pub fn assert_no_error<S, T, E>(sink: &S, result: Result<T, E>) -> T
where
    S: FailureSink + ?Sized,
    E: Display,
{
    match result {
        Ok(value) => value,
        Err(err) => sink.report_fatal(Failure::fatal(format!(
            "didn't expect an error but got one, {err}"
        ))),
    }
}

fn lower<T>(value: &T) -> Result<Value, HelperError>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_value(value)?)
}

fn difference_path<T, U>(got: &T, want: &U) -> Option<String>
where
    T: Serialize + ?Sized,
    U: Serialize + ?Sized,
{
    match lower(got).and_then(|g| lower(want).map(|w| (g, w))) {
        Ok((got, want)) => first_difference(&got, &want),
        Err(err) => {
            tracing::debug!(%err, "no difference path for unequal values");
            None
        }
    }
}

/// Path of the first structural difference between `got` and `want`, if any.
pub fn first_difference(got: &Value, want: &Value) -> Option<String> {
    let mut path = String::from("$");
    diff_at(got, want, &mut path).then_some(path)
}

fn diff_at(got: &Value, want: &Value, path: &mut String) -> bool {
    match (got, want) {
        (Value::Array(g), Value::Array(w)) => {
            for (index, (gi, wi)) in g.iter().zip(w).enumerate() {
                let mark = path.len();
                path.push_str(&format!("[{index}]"));
                if diff_at(gi, wi, path) {
                    return true;
                }
                path.truncate(mark);
            }
            if g.len() != w.len() {
                path.push_str(&format!(" (length {} vs {})", g.len(), w.len()));
                return true;
            }
            false
        }
        (Value::Object(g), Value::Object(w)) => {
            for (key, gv) in g {
                let mark = path.len();
                path.push('.');
                path.push_str(key);
                let Some(wv) = w.get(key) else {
                    path.push_str(" (missing in want)");
                    return true;
                };
                if diff_at(gv, wv, path) {
                    return true;
                }
                path.truncate(mark);
            }
            if let Some(key) = w.keys().find(|key| !g.contains_key(*key)) {
                path.push('.');
                path.push_str(key);
                path.push_str(" (missing in got)");
                return true;
            }
            false
        }
        (g, w) => g != w,
    }
}
