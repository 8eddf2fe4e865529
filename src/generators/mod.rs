//! Strategy generators for string-sequence properties.

pub mod strings;
