//! Tests for the crate's APIs.

use crate::field_annotations;
use crate::fields::from_struct;
use crate::fields::FieldMeta;
use crate::fields::TaggedFields;
use crate::map::KeyValueSep;
use crate::map::ListSep;
use crate::map::PairSep;
use crate::parse::parse_tags;
use crate::parse::parse_with_separators;
use crate::TagParser;

// Helper function to run the extractor with the default separators.
fn extract<T: TaggedFields>(annotation: &str) -> crate::fields::FieldTagMap {
    from_struct::<T>(
        annotation,
        PairSep::default(),
        KeyValueSep::default(),
        ListSep::default(),
    )
}

#[test]
fn parse_canonical_tag_string() {
    let tags = parse_tags("tag1=value1,value2,value3;tag2=value1,value2;");

    assert_eq!(tags.len(), 2);
    assert_eq!(tags["tag1"], vec!["value1", "value2", "value3"]);
    assert_eq!(tags["tag2"], vec!["value1", "value2"]);
}

#[test]
fn bare_name_maps_to_empty_values() {
    let tags = parse_tags("standalone;tag=value;");

    assert!(tags.exists("standalone"));
    let (values, present) = tags.get_ok("standalone");
    assert!(present);
    assert!(values.is_empty());
}

#[test]
fn absent_name_yields_empty_slice() {
    let tags = parse_tags("tag=value;");

    let (values, present) = tags.get_ok("missing");
    assert!(!present);
    assert!(values.is_empty());
}

#[test]
fn get_single_returns_first_value() {
    let tags = parse_tags("tag=first,second;");

    assert_eq!(tags.get_single("tag"), "first");
}

#[test]
fn get_single_defaults() {
    let tags = parse_tags("tag=value;empty;");

    assert_eq!(tags.get_single("missing"), "");
    assert_eq!(tags.get_single_or("missing", "fallback"), "fallback");

    // A present tag with zero values also falls back.
    assert_eq!(tags.get_single_or("empty", "fallback"), "fallback");
}

#[test]
fn segments_are_trimmed_but_values_are_not() {
    let tags = parse_tags("  tag1=value1 , value2;\ttag2=value1;");

    assert_eq!(tags["tag1"], vec!["value1 ", " value2"]);
    assert_eq!(tags["tag2"], vec!["value1"]);
}

#[test]
fn empty_segments_are_skipped() {
    let tags = parse_tags(";;  ;tag=value;");

    assert_eq!(tags.len(), 1);
    assert!(tags.exists("tag"));
}

#[test]
fn empty_input_parses_to_empty_map() {
    assert!(parse_tags("").is_empty());
}

#[test]
fn ambiguous_segment_is_dropped() {
    let tags = parse_tags("a=b=c;tag=value;");

    assert_eq!(tags.len(), 1);
    assert!(!tags.exists("a"));
    assert!(tags.exists("tag"));
}

#[test]
fn trailing_separator_yields_one_empty_value() {
    let tags = parse_tags("tag=;");

    assert_eq!(tags["tag"], vec![""]);
}

#[test]
fn duplicate_names_keep_the_last_segment() {
    let tags = parse_tags("tag=first;tag=second;");

    assert_eq!(tags["tag"], vec!["second"]);
}

#[test]
fn parse_with_custom_separators() {
    let tags = parse_with_separators(
        "tag1:value1|value2 tag2:value1",
        PairSep(" "),
        KeyValueSep(":"),
        ListSep("|"),
    );

    assert_eq!(tags["tag1"], vec!["value1", "value2"]);
    assert_eq!(tags["tag2"], vec!["value1"]);
}

#[test]
fn parser_uses_configured_separators() {
    let parser = TagParser::builder()
        .pair_separator(PairSep("&"))
        .key_value_separator(KeyValueSep(":"))
        .build();

    let tags = parser.parse("tag1:value1,value2&tag2:value1");

    assert_eq!(tags["tag1"], vec!["value1", "value2"]);
    assert_eq!(parser.pair_separator().0, "&");
    assert_eq!(parser.key_value_separator().0, ":");
    assert_eq!(parser.list_separator().0, ",");
}

#[cfg(feature = "convert_case")]
#[test]
fn parser_normalizes_tag_names() {
    use crate::parse::Case;

    let parser = TagParser::builder().name_case(Case::Snake).build();
    let tags = parser.parse("MaxLength=255;MinLength=1;");

    assert_eq!(tags.get_single("max_length"), "255");
    assert_eq!(tags.get_single("min_length"), "1");
}

#[test]
fn render_roundtrips_through_parse() {
    let input = "a=1,2;b;c=3;";
    let tags = parse_tags(input);

    assert_eq!(parse_tags(&tags.to_string()), tags);
    // Sorted name order makes the rendering itself deterministic.
    assert_eq!(tags.to_string(), input);
}

#[test]
fn render_with_custom_separators() {
    let tags = parse_tags("a=1,2;b;");
    let rendered = tags.render(PairSep(" "), KeyValueSep(":"), ListSep("|"));

    assert_eq!(rendered, "a:1|2 b ");
}

field_annotations! {
    #[allow(dead_code)]
    struct Record {
        pub first: String => { tag = "tag1=value1,value2,value3;tag2=value1,value2;" },
        pub second: String => { tag = "tag1=value1,value2,value3;tag2=value1,value2;tag3=value1;" },
        pub skipped: String => { tag = "-" },
        pub blank: String => { tag = "" },
        pub untagged: String,
        pub other_namespace: String => { validate = "required;" },
        hidden: String => { tag = "tag1=value1;" },
        embed pub base: u64 => { tag = "tag1=value1;" },
    }
}

#[test]
fn from_struct_extracts_annotated_public_fields() {
    let fields = extract::<Record>("tag");

    assert_eq!(fields.len(), 2);
    assert_eq!(fields["first"].len(), 2);
    assert_eq!(fields["second"].len(), 3);
    assert_eq!(fields["first"]["tag1"], vec!["value1", "value2", "value3"]);
    assert_eq!(fields["second"]["tag3"], vec!["value1"]);
}

#[test]
fn from_struct_matches_standalone_parse() {
    let fields = extract::<Record>("tag");

    assert_eq!(
        fields["first"],
        parse_tags("tag1=value1,value2,value3;tag2=value1,value2;")
    );
}

#[test]
fn from_struct_skips_unusable_fields() {
    let fields = extract::<Record>("tag");

    // Sentinel, empty, and missing annotations are all omitted.
    assert!(!fields.contains_key("skipped"));
    assert!(!fields.contains_key("blank"));
    assert!(!fields.contains_key("untagged"));
    assert!(!fields.contains_key("other_namespace"));

    // Private and embedded fields are omitted even when annotated.
    assert!(!fields.contains_key("hidden"));
    assert!(!fields.contains_key("base"));
}

#[test]
fn from_struct_selects_by_annotation_name() {
    let fields = extract::<Record>("validate");

    assert_eq!(fields.len(), 1);
    assert!(fields["other_namespace"].exists("required"));
}

#[test]
fn parser_from_struct_uses_configured_separators() {
    field_annotations! {
        #[allow(dead_code)]
        struct Custom {
            pub field: String => { tag = "tag1:value1|value2&tag2:value1" },
        }
    }

    let parser = TagParser::builder()
        .pair_separator(PairSep("&"))
        .key_value_separator(KeyValueSep(":"))
        .list_separator(ListSep("|"))
        .build();

    let fields = parser.from_struct::<Custom>("tag");

    assert_eq!(fields["field"]["tag1"], vec!["value1", "value2"]);
    assert_eq!(fields["field"]["tag2"], vec!["value1"]);
}

#[test]
fn field_metadata_records_declarations_in_order() {
    let names = Record::FIELDS
        .iter()
        .map(|field| field.name)
        .collect::<Vec<_>>();

    assert_eq!(
        names,
        vec![
            "first",
            "second",
            "skipped",
            "blank",
            "untagged",
            "other_namespace",
            "hidden",
            "base",
        ]
    );
}

#[test]
fn field_metadata_visibility_and_embedding() {
    let field = |name: &str| -> &FieldMeta {
        Record::FIELDS
            .iter()
            .find(|field| field.name == name)
            .unwrap()
    };

    assert!(field("first").public);
    assert!(!field("first").embedded);
    assert!(!field("hidden").public);
    assert!(field("base").public);
    assert!(field("base").embedded);
}

#[test]
fn field_metadata_annotation_lookup() {
    let first = &Record::FIELDS[0];

    assert!(first.annotation("tag").is_some());
    assert!(first.annotation("validate").is_none());
}

#[test]
fn caller_may_mutate_the_returned_map() {
    let mut tags = parse_tags("tag=value;");
    tags.insert("extra".to_owned(), vec!["added".to_owned()]);

    assert_eq!(tags.get_single("extra"), "added");
}
