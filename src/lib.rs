//! A Rust crate for parsing delimiter-separated key/value tag strings.
//!
//! "Tag strings" are strings of the form `tag1=value1,value2;tag2=value1;`:
//! a list of named tags, each with an ordered list of values, shaped by
//! three configurable separator levels (pairs, key/value, value list).
//!
//! This crate parses such strings into a [`TagMap`], either from a raw
//! string directly or from the annotations attached to the fields of a
//! record type declared with [`field_annotations!`]. Parsing is best-effort
//! and never fails: malformed segments are silently dropped or treated as
//! empty, so every input produces a map.

pub mod fields;
pub mod map;
pub mod parse;
#[cfg(test)]
mod test;

pub use crate::map::TagMap;
pub use crate::parse::parse_tags;
pub use crate::parse::parse_with_separators;
pub use crate::parse::TagParser;
