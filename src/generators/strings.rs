//! String and string-sequence strategies.

use std::collections::HashSet;

use proptest::collection::SizeRange;
use proptest::prelude::*;

/// Arbitrary Unicode text, multi-byte characters included.
pub fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        2 => proptest::string::string_regex("[a-z ,]{1,12}").expect("ascii regex should compile"),
        3 => any::<String>(),
    ]
}

/// Sequences of arbitrary text with a configurable length range.
pub fn string_seq(len: impl Into<SizeRange>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text(), len)
}

/// Decimal integer rendered as a string, biased towards boundary values.
pub fn numeric_string() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(i64::MIN),
        1 => Just(-1_i64),
        1 => Just(0_i64),
        1 => Just(i64::MAX),
        6 => -1_000_i64..1_000,
    ]
    .prop_map(|n| n.to_string())
}

/// Sequences whose elements are pairwise distinct.
pub fn unique_string_seq(
    len: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text(), len).prop_filter("elements must be unique", |values| {
        let mut seen = HashSet::with_capacity(values.len());
        values.iter().all(|value| seen.insert(value.as_str()))
    })
}
