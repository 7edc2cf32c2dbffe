//! The parsed tag mapping and the separators that shape it.

use itertools::Itertools as _;
use std::collections::HashMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;
use std::ops::DerefMut;

/// A mapping from tag name to its ordered sequence of values.
///
/// Produced by [`parse_tags`][crate::parse::parse_tags] and friends. A tag
/// that appears without a key/value separator is recorded with an _empty_
/// value sequence, so presence and emptiness are distinguishable.
///
/// [`TagMap`] dereferences to its underlying `HashMap`, so the full map API
/// is available when the query helpers below aren't enough. Each parse
/// produces a fresh map which the caller owns outright.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap(HashMap<String, Vec<String>>);

impl TagMap {
    /// Construct an empty [`TagMap`].
    pub fn new() -> Self {
        TagMap(HashMap::new())
    }

    /// Get the values for a tag, along with whether the tag is present.
    ///
    /// An absent tag yields an empty slice, never a null-ish sentinel, so the
    /// returned values are always safe to iterate.
    pub fn get_ok(&self, name: &str) -> (&[String], bool) {
        match self.0.get(name) {
            Some(values) => (values.as_slice(), true),
            None => (&[], false),
        }
    }

    /// Get the first value for a tag, or the empty string if the tag is
    /// absent or has no values.
    pub fn get_single(&self, name: &str) -> String {
        self.get_single_or(name, "")
    }

    /// Get the first value for a tag, or `default` if the tag is absent or
    /// has no values.
    pub fn get_single_or(&self, name: &str, default: &str) -> String {
        match self.0.get(name).and_then(|values| values.first()) {
            Some(value) => value.clone(),
            None => default.to_owned(),
        }
    }

    /// Check whether a tag is present, including tags with zero values.
    pub fn exists(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Reconstruct the string form of the map with the given separators.
    ///
    /// Names are emitted in sorted order so the output is deterministic
    /// despite the unordered underlying map. A tag with no values is emitted
    /// bare, without a key/value separator, matching how it would have been
    /// parsed. Each segment carries a trailing pair separator, per the
    /// canonical grammar `KEY=V1,V2;KEY2=V1;`.
    pub fn render(&self, pair_sep: PairSep, kv_sep: KeyValueSep, list_sep: ListSep) -> String {
        let mut out = String::new();

        for (name, values) in self.0.iter().sorted_by(|(n1, _), (n2, _)| n1.cmp(n2)) {
            out.push_str(name);

            if !values.is_empty() {
                out.push_str(kv_sep.0);
                out.push_str(&values.iter().join(list_sep.0));
            }

            out.push_str(pair_sep.0);
        }

        out
    }

    /// Consume the [`TagMap`], returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, Vec<String>> {
        self.0
    }
}

impl Display for TagMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}",
            self.render(PairSep::default(), KeyValueSep::default(), ListSep::default())
        )
    }
}

impl Deref for TagMap {
    type Target = HashMap<String, Vec<String>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TagMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, Vec<String>>> for TagMap {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        TagMap(map)
    }
}

impl FromIterator<(String, Vec<String>)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        TagMap(iter.into_iter().collect())
    }
}

impl IntoIterator for TagMap {
    type Item = (String, Vec<String>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

//---------------------------------------------------------------------------

/// The separator between tag pairs.
///
/// The default separator is `";"`.
#[derive(Debug, Copy, Clone)]
pub struct PairSep(pub &'static str);

impl Display for PairSep {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Default for PairSep {
    fn default() -> Self {
        PairSep(";")
    }
}

/// The separator between a tag name and its values.
///
/// The default separator is `"="`.
#[derive(Debug, Copy, Clone)]
pub struct KeyValueSep(pub &'static str);

impl Display for KeyValueSep {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Default for KeyValueSep {
    fn default() -> Self {
        KeyValueSep("=")
    }
}

/// The separator between values in a tag's value list.
///
/// The default separator is `","`.
#[derive(Debug, Copy, Clone)]
pub struct ListSep(pub &'static str);

impl Display for ListSep {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Default for ListSep {
    fn default() -> Self {
        ListSep(",")
    }
}
