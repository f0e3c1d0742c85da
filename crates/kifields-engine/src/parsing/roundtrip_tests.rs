//! Round-trip tests for the field-list notation.
//!
//! Serializing a parsed list must reproduce the same entries; the only
//! permitted drift against the source text is whitespace normalization
//! inside the flag text.

use crate::editing::FieldList;
use crate::parsing::{escape_name, parse_field_names, unescape_name};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn name_and_flags(sexpr: &str) -> Vec<(String, String)> {
    parse_field_names(sexpr)
        .into_iter()
        .map(|f| (f.name.clone(), f.trimmed_flags().to_string()))
        .collect()
}

#[test]
fn test_reparse_equals_first_parse() {
    let source = "(templatefields\n\
                  (field (name \"MANUFACTURER\") visible)\n\
                  (field (name \"COMPONENT_LINK_URL\") url)\n\
                  (field (name \"ZZZ\") visible url)\n\
                  (field (name \"NOTES\")))";

    let serialized = FieldList::parse(source).to_sexpr();

    assert_eq!(name_and_flags(&serialized), name_and_flags(source));
}

#[test]
fn test_serialize_normalizes_only_whitespace() {
    let source = "(templatefields(field (name \"A\")   visible  )(field (name \"B\") url))";

    let serialized = FieldList::parse(source).to_sexpr();

    assert_eq!(
        serialized,
        "(templatefields(field (name \"A\") visible)(field (name \"B\") url))"
    );
}

#[test]
fn test_serialized_form_is_stable() {
    // A second parse/serialize pass must not change the text again.
    let source = "(templatefields\n  (field (name \"A\") visible)\n  (field (name \"B\")))";

    let once = FieldList::parse(source).to_sexpr();
    let twice = FieldList::parse(&once).to_sexpr();

    assert_eq!(twice, once);
}

#[test]
fn test_empty_list_round_trip() {
    let serialized = FieldList::new().to_sexpr();

    assert_eq!(serialized, "(templatefields)");
    assert_eq!(parse_field_names(&serialized), vec![]);
}

#[rstest]
#[case("MANUFACTURER")]
#[case("with space")]
#[case("quote\"inside")]
#[case("back\\slash")]
#[case("\\\"both\\\"")]
#[case("trailing\\")]
#[case("\"")]
#[case("\\")]
fn test_escape_round_trip(#[case] name: &str) {
    assert_eq!(unescape_name(&escape_name(name)), name);
}

#[rstest]
#[case("quote\"inside")]
#[case("back\\slash")]
#[case("\\\"both\\\"")]
fn test_awkward_names_survive_full_round_trip(#[case] name: &str) {
    let mut list = FieldList::new();
    assert!(list.add(name));

    let reparsed = parse_field_names(&list.to_sexpr());

    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].name, name);
}
