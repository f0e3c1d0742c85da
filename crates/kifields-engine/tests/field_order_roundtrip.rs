//! End-to-end exercises of the parse → edit → serialize cycle against
//! realistic `eeschema.json` field_names content.

use kifields_engine::{Direction, Field, FieldList};
use pretty_assertions::assert_eq;

const REAL_WORLD_FIELD_NAMES: &str = "(templatefields\
    (field (name \"MANUFACTURER\") visible)\
    (field (name \"MPN\") visible)\
    (field (name \"COMPONENT_LINK_URL\") url)\
    (field (name \"DISTRIBUTOR\"))\
    (field (name \"HOUSING\") visible experimental_flag))";

#[test]
fn test_untouched_list_serializes_identically() {
    let list = FieldList::parse(REAL_WORLD_FIELD_NAMES);

    assert_eq!(list.to_sexpr(), REAL_WORLD_FIELD_NAMES);
}

#[test]
fn test_unknown_flag_tokens_survive_editing() {
    let mut list = FieldList::parse(REAL_WORLD_FIELD_NAMES);

    // Push HOUSING (carrying a token no release of this tool knows) to
    // the top, drop DISTRIBUTOR, add a fresh field.
    list.move_field(4, Direction::Up);
    list.move_field(3, Direction::Up);
    list.move_field(2, Direction::Up);
    list.move_field(1, Direction::Up);
    list.remove(4);
    assert!(list.add("ASSEMBLY_NOTE"));

    assert_eq!(
        list.to_sexpr(),
        "(templatefields\
         (field (name \"HOUSING\") visible experimental_flag)\
         (field (name \"MANUFACTURER\") visible)\
         (field (name \"MPN\") visible)\
         (field (name \"COMPONENT_LINK_URL\") url)\
         (field (name \"ASSEMBLY_NOTE\")))"
    );
}

#[test]
fn test_import_order_round_trip() {
    let mut list = FieldList::parse(REAL_WORLD_FIELD_NAMES);

    // An exported order file lists names only; flags must reattach.
    let imported = ["MPN", "MANUFACTURER", "NEW_FROM_OTHER_MACHINE"];
    list.reorder_by_names(&imported);

    assert_eq!(
        list.fields()[..3],
        [
            Field::with_flags("MPN", " visible"),
            Field::with_flags("MANUFACTURER", " visible"),
            Field::new("NEW_FROM_OTHER_MACHINE"),
        ]
    );
    // Everything the order file did not mention keeps its original
    // relative order at the end.
    assert_eq!(
        list.names()[3..],
        ["COMPONENT_LINK_URL", "DISTRIBUTOR", "HOUSING"]
    );
}

#[test]
fn test_messy_source_normalizes_once_then_stays_stable() {
    let messy = "(templatefields\n\
                 \t(field (name \"A\")  visible )\n\
                 \t(field (name \"B\")\n\t\turl)\n\
                 )";

    let once = FieldList::parse(messy).to_sexpr();
    assert_eq!(
        once,
        "(templatefields(field (name \"A\") visible)(field (name \"B\") url))"
    );

    let twice = FieldList::parse(&once).to_sexpr();
    assert_eq!(twice, once);
}
