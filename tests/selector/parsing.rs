//! Selector syntax

use sigil_arguments::entity_type::player_type;
use sigil_arguments::selector::{
    DISTANCE_NEGATIVE, ENTITY_TYPE_INVALID, EXPECTED_END_OF_OPTIONS, EXPECTED_OPTION_VALUE,
    INAPPLICABLE_OPTION, INVALID_NAME_OR_UUID, LIMIT_TOO_SMALL, MISSING_SELECTOR_TYPE,
    SELECTORS_NOT_ALLOWED, SORT_UNKNOWN, UNKNOWN_OPTION, UNKNOWN_SELECTOR_TYPE,
};
use sigil_arguments::{EntitySelectorParser, SelectorOrder};
use sigil_foundation::StringReader;
use uuid::Uuid;

use crate::parse;

fn error_at(input: &str) -> (sigil_foundation::CommandSyntaxError, Option<usize>) {
    let err = parse(input).unwrap_err();
    let cursor = err.cursor();
    (err, cursor)
}

// =============================================================================
// Forms
// =============================================================================

#[test]
fn options_shape_the_selector() {
    let selector = parse("@e[type=!minecraft:pig,limit=5,sort=nearest]").unwrap();
    assert!(selector.includes_entities());
    assert!(selector.uses_selector());
    assert_eq!(selector.max_results(), 5);
    assert_eq!(selector.order(), SelectorOrder::Nearest);
    assert!(selector.type_limit().is_none());
}

#[test]
fn selector_type_defaults() {
    let nearest = parse("@p").unwrap();
    assert_eq!(nearest.max_results(), 1);
    assert!(!nearest.includes_entities());
    assert_eq!(nearest.order(), SelectorOrder::Nearest);
    assert_eq!(nearest.type_limit(), Some(&player_type()));

    let all = parse("@a").unwrap();
    assert_eq!(all.max_results(), usize::MAX);
    assert_eq!(all.order(), SelectorOrder::Arbitrary);

    assert_eq!(parse("@r").unwrap().order(), SelectorOrder::Random);
    assert!(parse("@s").unwrap().is_self_selector());
}

#[test]
fn name_form() {
    let selector = parse("Steve").unwrap();
    assert_eq!(selector.player_name(), Some("Steve"));
    assert_eq!(selector.max_results(), 1);
    assert!(!selector.includes_entities());
    assert!(!selector.uses_selector());
}

#[test]
fn uuid_form() {
    let selector = parse("00000000-0000-0000-0000-000000000004").unwrap();
    assert_eq!(selector.entity_uuid(), Some(Uuid::from_u128(4)));
    assert!(selector.includes_entities());
}

#[test]
fn whitespace_inside_options() {
    let selector = parse("@e[ type = pig , limit = 2 ]").unwrap();
    assert_eq!(selector.max_results(), 2);
    assert!(selector.type_limit().is_some());
}

#[test]
fn reader_stops_after_selector() {
    let mut reader = StringReader::new("@e[limit=1] rest");
    EntitySelectorParser::new(&mut reader, true).parse().unwrap();
    assert_eq!(reader.remaining(), " rest");
}

#[test]
fn distance_sets_world_limit() {
    let selector = parse("@e[distance=..10]").unwrap();
    assert!(selector.is_world_limited());
    assert_eq!(selector.distance().max, Some(10.0));
    assert!(!parse("@e").unwrap().is_world_limited());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn repeated_limit_is_inapplicable() {
    let (err, cursor) = error_at("@e[limit=5,limit=3]");
    assert!(err.is(&INAPPLICABLE_OPTION));
    assert_eq!(cursor, Some(16));
}

#[test]
fn type_on_player_selector_is_inapplicable() {
    let (err, _) = error_at("@p[type=pig]");
    assert!(err.is(&INAPPLICABLE_OPTION));
    let (err, _) = error_at("@e[type=pig,type=cow]");
    assert!(err.is(&INAPPLICABLE_OPTION));
}

#[test]
fn negative_distance() {
    let (err, cursor) = error_at("@p[distance=-5..10]");
    assert!(err.is(&DISTANCE_NEGATIVE));
    assert_eq!(cursor, Some(12));
}

#[test]
fn bad_option_values() {
    let (err, cursor) = error_at("@e[limit=0]");
    assert!(err.is(&LIMIT_TOO_SMALL));
    assert_eq!(cursor, Some(9));

    let (err, cursor) = error_at("@e[sort=sideways]");
    assert!(err.is(&SORT_UNKNOWN));
    assert_eq!(cursor, Some(8));

    let (err, cursor) = error_at("@e[type=dragon]");
    assert!(err.is(&ENTITY_TYPE_INVALID));
    assert_eq!(cursor, Some(8));
}

#[test]
fn unknown_option_points_at_key() {
    let (err, cursor) = error_at("@e[colour=red]");
    assert!(err.is(&UNKNOWN_OPTION));
    assert_eq!(cursor, Some(3));
    assert_eq!(err.raw_message(), "Unknown option 'colour'");
}

#[test]
fn option_without_value() {
    let (err, cursor) = error_at("@e[limit]");
    assert!(err.is(&EXPECTED_OPTION_VALUE));
    assert_eq!(cursor, Some(3));
}

#[test]
fn unterminated_options() {
    let (err, _) = error_at("@e[type=pig");
    assert!(err.is(&EXPECTED_END_OF_OPTIONS));
    let (err, _) = error_at("@e[type=pig;limit=1]");
    assert!(err.is(&EXPECTED_END_OF_OPTIONS));
}

#[test]
fn bad_selector_type() {
    let (err, cursor) = error_at("@x");
    assert!(err.is(&UNKNOWN_SELECTOR_TYPE));
    assert_eq!(cursor, Some(1));
    let (err, _) = error_at("@");
    assert!(err.is(&MISSING_SELECTOR_TYPE));
}

#[test]
fn overlong_name() {
    let (err, cursor) = error_at("Steve_the_builder_long");
    assert!(err.is(&INVALID_NAME_OR_UUID));
    assert_eq!(cursor, Some(0));
}

#[test]
fn selectors_can_be_disallowed() {
    let mut reader = StringReader::new("@e");
    let err = EntitySelectorParser::new(&mut reader, false)
        .parse()
        .unwrap_err();
    assert!(err.is(&SELECTORS_NOT_ALLOWED));

    let mut reader = StringReader::new("Steve");
    assert!(EntitySelectorParser::new(&mut reader, false).parse().is_ok());
}
