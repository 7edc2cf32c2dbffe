//! Extraction of tag maps from the annotated fields of a record type.
//!
//! Rust has no runtime reflection, so per-field annotation strings are
//! declared up front instead of read from type metadata: the
//! [`field_annotations!`][crate::field_annotations] macro defines a struct
//! and records each field's name, visibility, embeddedness, and annotations
//! in a [`TaggedFields`] impl. [`from_struct`] then walks that metadata and
//! parses each usable annotation into a [`TagMap`].

use crate::map::KeyValueSep;
use crate::map::ListSep;
use crate::map::PairSep;
use crate::map::TagMap;
use crate::parse::parse_with_separators;
use std::collections::HashMap;

/// A mapping from field name to that field's parsed [`TagMap`].
pub type FieldTagMap = HashMap<&'static str, TagMap>;

/// Metadata for a single declared field, as recorded by
/// [`field_annotations!`][crate::field_annotations].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldMeta {
    /// The field's declared name.
    pub name: &'static str,

    /// Whether the field is externally visible.
    pub public: bool,

    /// Whether the field is an embedded record rather than data of its own.
    pub embedded: bool,

    /// The annotations attached to the field, as (name, value) pairs.
    pub annotations: &'static [(&'static str, &'static str)],
}

impl FieldMeta {
    /// Look up the value of the annotation with the given name, if present.
    pub fn annotation(&self, name: &str) -> Option<&'static str> {
        self.annotations
            .iter()
            .find(|(annotation, _)| *annotation == name)
            .map(|(_, value)| *value)
    }
}

/// Types whose fields carry tag annotations.
///
/// Implemented by [`field_annotations!`][crate::field_annotations]; the
/// fields appear in declaration order.
pub trait TaggedFields {
    /// The declared fields of the type, in declaration order.
    const FIELDS: &'static [FieldMeta];
}

/// Extract the `annotation` tag maps of `T`'s fields with the given
/// separators.
///
/// Walks `T`'s declared fields in order, skipping fields that are not
/// public, are embedded, or whose `annotation` value is absent, empty, or
/// the sentinel `"-"`. Every remaining annotation string is parsed with
/// [`parse_with_separators`] and stored under the field's name.
///
/// Extraction never fails; fields without a usable annotation are simply
/// omitted from the result.
///
/// ```
/// use tagmap::fields::from_struct;
/// use tagmap::field_annotations;
/// use tagmap::map::KeyValueSep;
/// use tagmap::map::ListSep;
/// use tagmap::map::PairSep;
///
/// field_annotations! {
///     pub struct Account {
///         pub username: String => { db = "column=username;index=unique;" },
///         pub password: String => { db = "-" },
///     }
/// }
///
/// let fields = from_struct::<Account>(
///     "db",
///     PairSep::default(),
///     KeyValueSep::default(),
///     ListSep::default(),
/// );
///
/// assert_eq!(fields["username"].get_single("column"), "username");
/// assert!(!fields.contains_key("password"));
/// ```
pub fn from_struct<T: TaggedFields>(
    annotation: &str,
    pair_sep: PairSep,
    kv_sep: KeyValueSep,
    list_sep: ListSep,
) -> FieldTagMap {
    from_struct_with::<T>(annotation, |raw| {
        parse_with_separators(raw, pair_sep, kv_sep, list_sep)
    })
}

// Shared between `from_struct` and `TagParser::from_struct`, which differ
// only in how the annotation string is parsed.
pub(crate) fn from_struct_with<T: TaggedFields>(
    annotation: &str,
    parse: impl Fn(&str) -> TagMap,
) -> FieldTagMap {
    let mut map = FieldTagMap::new();

    for field in T::FIELDS {
        if !field.public || field.embedded {
            continue;
        }

        let Some(raw) = field.annotation(annotation) else {
            continue;
        };

        if raw.is_empty() || raw == "-" {
            continue;
        }

        map.insert(field.name, parse(raw));
    }

    map
}

/// Declare a struct whose fields carry tag annotations.
///
/// This macro:
///
/// 1. Defines the struct as written, minus the annotation syntax.
/// 2. Implements [`TaggedFields`] for it, recording each field's name,
///    visibility, embeddedness, and annotations in declaration order.
///
/// The syntax of each field is:
///
/// ```text
/// (embed)? (pub)? <name>: <type> (=> { <annotation> = "<tag string>", ... })?,
/// ```
///
/// Every field, including the last, must end with a comma. The `embed`
/// marker declares the field as an embedded record, which the extractor
/// skips. Fields are either fully `pub` or private; restricted visibilities
/// aren't supported.
///
/// ```
/// tagmap::field_annotations! {
///     /// A user record.
///     pub struct User {
///         pub name: String => { json = "name=username;", validate = "required;" },
///         pub age: u32 => { json = "name=age;" },
///         session_token: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_annotations {
    (
        $( #[$attr:meta] )*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::field_annotations! {
            @munch
            def = [ $( #[$attr] )* $vis struct $name ],
            name = [ $name ],
            fields = [],
            metas = [],
            rest = [ $($body)* ]
        }
    };

    // All fields consumed; emit the struct and its metadata table.
    (
        @munch
        def = [ $($def:tt)* ],
        name = [ $name:ident ],
        fields = [ $($fields:tt)* ],
        metas = [ $($metas:tt)* ],
        rest = []
    ) => {
        $($def)* {
            $($fields)*
        }

        impl $crate::fields::TaggedFields for $name {
            const FIELDS: &'static [$crate::fields::FieldMeta] = &[ $($metas)* ];
        }
    };

    // Embedded public field.
    (
        @munch
        def = [ $($def:tt)* ],
        name = [ $name:ident ],
        fields = [ $($fields:tt)* ],
        metas = [ $($metas:tt)* ],
        rest = [
            $( #[$fattr:meta] )*
            embed pub $fname:ident : $fty:ty
            $(=> { $($aname:ident = $aval:literal),* $(,)? })?
            , $($rest:tt)*
        ]
    ) => {
        $crate::field_annotations! {
            @munch
            def = [ $($def)* ],
            name = [ $name ],
            fields = [ $($fields)* $( #[$fattr] )* pub $fname: $fty, ],
            metas = [
                $($metas)*
                $crate::fields::FieldMeta {
                    name: stringify!($fname),
                    public: true,
                    embedded: true,
                    annotations: &[ $($( (stringify!($aname), $aval) ),*)? ],
                },
            ],
            rest = [ $($rest)* ]
        }
    };

    // Embedded private field.
    (
        @munch
        def = [ $($def:tt)* ],
        name = [ $name:ident ],
        fields = [ $($fields:tt)* ],
        metas = [ $($metas:tt)* ],
        rest = [
            $( #[$fattr:meta] )*
            embed $fname:ident : $fty:ty
            $(=> { $($aname:ident = $aval:literal),* $(,)? })?
            , $($rest:tt)*
        ]
    ) => {
        $crate::field_annotations! {
            @munch
            def = [ $($def)* ],
            name = [ $name ],
            fields = [ $($fields)* $( #[$fattr] )* $fname: $fty, ],
            metas = [
                $($metas)*
                $crate::fields::FieldMeta {
                    name: stringify!($fname),
                    public: false,
                    embedded: true,
                    annotations: &[ $($( (stringify!($aname), $aval) ),*)? ],
                },
            ],
            rest = [ $($rest)* ]
        }
    };

    // Public field.
    (
        @munch
        def = [ $($def:tt)* ],
        name = [ $name:ident ],
        fields = [ $($fields:tt)* ],
        metas = [ $($metas:tt)* ],
        rest = [
            $( #[$fattr:meta] )*
            pub $fname:ident : $fty:ty
            $(=> { $($aname:ident = $aval:literal),* $(,)? })?
            , $($rest:tt)*
        ]
    ) => {
        $crate::field_annotations! {
            @munch
            def = [ $($def)* ],
            name = [ $name ],
            fields = [ $($fields)* $( #[$fattr] )* pub $fname: $fty, ],
            metas = [
                $($metas)*
                $crate::fields::FieldMeta {
                    name: stringify!($fname),
                    public: true,
                    embedded: false,
                    annotations: &[ $($( (stringify!($aname), $aval) ),*)? ],
                },
            ],
            rest = [ $($rest)* ]
        }
    };

    // Private field.
    (
        @munch
        def = [ $($def:tt)* ],
        name = [ $name:ident ],
        fields = [ $($fields:tt)* ],
        metas = [ $($metas:tt)* ],
        rest = [
            $( #[$fattr:meta] )*
            $fname:ident : $fty:ty
            $(=> { $($aname:ident = $aval:literal),* $(,)? })?
            , $($rest:tt)*
        ]
    ) => {
        $crate::field_annotations! {
            @munch
            def = [ $($def)* ],
            name = [ $name ],
            fields = [ $($fields)* $( #[$fattr] )* $fname: $fty, ],
            metas = [
                $($metas)*
                $crate::fields::FieldMeta {
                    name: stringify!($fname),
                    public: false,
                    embedded: false,
                    annotations: &[ $($( (stringify!($aname), $aval) ),*)? ],
                },
            ],
            rest = [ $($rest)* ]
        }
    };
}
