//! Parsing of delimited tag strings.

#[cfg(feature = "convert_case")]
pub use convert_case::Case;
#[cfg(feature = "convert_case")]
use convert_case::Casing as _;

use crate::fields::from_struct_with;
use crate::fields::FieldTagMap;
use crate::fields::TaggedFields;
use crate::map::KeyValueSep;
use crate::map::ListSep;
use crate::map::PairSep;
use crate::map::TagMap;
use typed_builder::TypedBuilder;

/// Parse a tag string with the default separators `";"`, `"="`, `","`.
///
/// This matches the canonical tag grammar `KEY=V1,V2,V3;KEY2=V1;`.
///
/// ```
/// let tags = tagmap::parse_tags("tag1=value1,value2;tag2=value1;");
///
/// assert_eq!(tags.get_single("tag1"), "value1");
/// assert_eq!(tags["tag2"], vec!["value1"]);
/// ```
pub fn parse_tags(raw: &str) -> TagMap {
    parse_with_separators(
        raw,
        PairSep::default(),
        KeyValueSep::default(),
        ListSep::default(),
    )
}

/// Parse a tag string with the given separators.
///
/// The input is split into segments on `pair_sep`. Each segment is trimmed of
/// surrounding whitespace and then split on `kv_sep`: a lone name becomes a
/// tag with no values, a name/value pair becomes a tag whose value part is
/// split on `list_sep`. Values are _not_ individually trimmed.
///
/// Parsing is best-effort and never fails. Empty segments are skipped, and a
/// segment containing more than one `kv_sep` is ambiguous and dropped
/// outright rather than guessed at.
pub fn parse_with_separators(
    raw: &str,
    pair_sep: PairSep,
    kv_sep: KeyValueSep,
    list_sep: ListSep,
) -> TagMap {
    let mut map = TagMap::new();

    for segment in raw.split(pair_sep.0) {
        let segment = segment.trim();

        if segment.is_empty() {
            continue;
        }

        let parts = segment.split(kv_sep.0).collect::<Vec<_>>();

        match parts.as_slice() {
            [name] => {
                map.insert((*name).to_owned(), Vec::new());
            }
            [name, values] => {
                map.insert(
                    (*name).to_owned(),
                    values.split(list_sep.0).map(str::to_owned).collect(),
                );
            }
            // More than one key/value separator; the segment is ambiguous
            // and gets dropped.
            _ => {}
        }
    }

    map
}

/// Parses tag strings according to a configured set of separators.
///
/// A [`TagParser`] is a reusable configuration for [`parse_with_separators`],
/// convenient when the same non-default separators apply to many inputs, or
/// when extracting the annotations of several record types consistently.
///
/// ```
/// use tagmap::map::KeyValueSep;
/// use tagmap::TagParser;
///
/// let parser = TagParser::builder()
///     .key_value_separator(KeyValueSep(":"))
///     .build();
///
/// let tags = parser.parse("score:1,2,3;");
/// assert_eq!(tags["score"].len(), 3);
/// ```
#[derive(Debug, Copy, Clone, TypedBuilder)]
pub struct TagParser {
    /// The separator between tag pairs (default `";"`).
    #[builder(default)]
    pair_separator: PairSep,

    /// The separator between a tag name and its values (default `"="`).
    #[builder(default)]
    key_value_separator: KeyValueSep,

    /// The separator between values in a value list (default `","`).
    #[builder(default)]
    list_separator: ListSep,

    /// If set, tag names are normalized to this case after parsing.
    #[cfg(feature = "convert_case")]
    #[builder(default, setter(strip_option))]
    name_case: Option<Case>,
}

impl TagParser {
    /// Parse a tag string with the configured separators.
    pub fn parse(&self, raw: &str) -> TagMap {
        self.apply_name_case(parse_with_separators(
            raw,
            self.pair_separator,
            self.key_value_separator,
            self.list_separator,
        ))
    }

    /// Extract the `annotation` tag maps of `T`'s fields with the configured
    /// separators.
    ///
    /// See [`from_struct`][crate::fields::from_struct] for the extraction
    /// rules.
    pub fn from_struct<T: TaggedFields>(&self, annotation: &str) -> FieldTagMap {
        from_struct_with::<T>(annotation, |raw| self.parse(raw))
    }

    /// Get the pair separator (default `";"`) used by the parser.
    pub fn pair_separator(&self) -> PairSep {
        self.pair_separator
    }

    /// Get the key/value separator (default `"="`) used by the parser.
    pub fn key_value_separator(&self) -> KeyValueSep {
        self.key_value_separator
    }

    /// Get the list separator (default `","`) used by the parser.
    pub fn list_separator(&self) -> ListSep {
        self.list_separator
    }

    #[cfg(feature = "convert_case")]
    fn apply_name_case(&self, map: TagMap) -> TagMap {
        match self.name_case {
            None => map,
            Some(case) => map
                .into_iter()
                .map(|(name, values)| (name.to_case(case), values))
                .collect(),
        }
    }

    #[cfg(not(feature = "convert_case"))]
    fn apply_name_case(&self, map: TagMap) -> TagMap {
        map
    }
}

impl Default for TagParser {
    fn default() -> Self {
        TagParser::builder().build()
    }
}
