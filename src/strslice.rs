//! String-sequence utilities.
//!
//! Small, total functions over ordered sequences of strings. Every function is
//! generic over the element type, so `&[&str]`, `&[String]` and `&[Cow<str>]`
//! all work. Inputs are never mutated.
//!
//! # Example
//!
//! ```rust
//! use strslice_testkit::strslice::{filter, index_of, reverse};
//!
//! let seq = ["1", "3", "5", "2", "4", "6"];
//! assert_eq!(index_of(&seq, "4"), 4);
//! assert_eq!(filter(&seq, |s| s.parse::<i64>().is_ok_and(|n| n % 2 != 0)), ["1", "3", "5"]);
//! assert_eq!(reverse("Hello, 世界"), "界世 ,olleH");
//! ```

/// Sentinel returned by [`index_of`] when the target is absent.
pub const NOT_FOUND: isize = -1;

/// Reverse `s` by Unicode scalar value, keeping multi-byte characters intact.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Lowest index whose element equals `target`.
pub fn position<S>(seq: &[S], target: &str) -> Option<usize>
where
    S: AsRef<str>,
{
    seq.iter().position(|value| value.as_ref() == target)
}

/// Lowest index whose element equals `target`, or [`NOT_FOUND`].
pub fn index_of<S>(seq: &[S], target: &str) -> isize
where
    S: AsRef<str>,
{
    // Slices never exceed isize::MAX elements.
    position(seq, target).map_or(NOT_FOUND, |index| index as isize)
}

/// Whether `target` occurs in `seq`.
pub fn contains<S>(seq: &[S], target: &str) -> bool
where
    S: AsRef<str>,
{
    index_of(seq, target) >= 0
}

/// Existential check over `seq`.
///
/// An empty sequence is treated as satisfied: with zero elements there is no
/// counterexample, mirroring [`all`]. Non-empty sequences need at least one
/// element for which `predicate` holds.
///
/// ```rust
/// use strslice_testkit::strslice::any;
///
/// let empty: [&str; 0] = [];
/// assert!(any(&empty, str::is_empty));
/// assert!(any(&["1", ""], str::is_empty));
/// assert!(!any(&["1", "2"], str::is_empty));
/// ```
pub fn any<S, P>(seq: &[S], mut predicate: P) -> bool
where
    S: AsRef<str>,
    P: FnMut(&str) -> bool,
{
    if seq.is_empty() {
        return true;
    }
    seq.iter().any(|value| predicate(value.as_ref()))
}

/// Universal check over `seq`; vacuously true when empty.
pub fn all<S, P>(seq: &[S], mut predicate: P) -> bool
where
    S: AsRef<str>,
    P: FnMut(&str) -> bool,
{
    seq.iter().all(|value| predicate(value.as_ref()))
}

/// New sequence holding, in order, the elements that satisfy `predicate`.
pub fn filter<S, P>(seq: &[S], mut predicate: P) -> Vec<S>
where
    S: AsRef<str> + Clone,
    P: FnMut(&str) -> bool,
{
    seq.iter()
        .filter(|value| predicate(value.as_ref()))
        .cloned()
        .collect()
}

/// New sequence of the same length with each element passed through `transform`.
pub fn map<S, F>(seq: &[S], mut transform: F) -> Vec<String>
where
    S: AsRef<str>,
    F: FnMut(&str) -> String,
{
    seq.iter().map(|value| transform(value.as_ref())).collect()
}
