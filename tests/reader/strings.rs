//! Integration tests for quoted and unquoted strings

use proptest::prelude::*;
use sigil_dispatch::escape_if_required;
use sigil_foundation::{StringReader, builtin};

// =============================================================================
// Round Trips
// =============================================================================

proptest! {
    #[test]
    fn unquoted_round_trips(text in "[0-9A-Za-z_.+-]{1,20}") {
        let mut reader = StringReader::new(&format!("{text} tail"));
        prop_assert_eq!(reader.read_string().unwrap(), text.clone());
        prop_assert_eq!(reader.cursor(), text.len());
    }

    #[test]
    fn escaped_strings_round_trip(text in "[ a-z\"\\\\']{0,20}") {
        let escaped = escape_if_required(&text);
        let mut reader = StringReader::new(&escaped);
        prop_assert_eq!(reader.read_string().unwrap(), text);
        prop_assert_eq!(reader.cursor(), escaped.len());
    }
}

// =============================================================================
// Quoting
// =============================================================================

#[test]
fn either_quote_style() {
    assert_eq!(StringReader::new("\"hello world\"").read_string().unwrap(), "hello world");
    assert_eq!(StringReader::new("'say \"hi\"'").read_string().unwrap(), "say \"hi\"");
    assert_eq!(StringReader::new("\"a\\\"b\\\\c\"").read_string().unwrap(), "a\"b\\c");
}

#[test]
fn unterminated_quote() {
    let mut reader = StringReader::new("\"open");
    let error = reader.read_string().unwrap_err();
    assert!(error.is(&builtin::READER_EXPECTED_END_OF_QUOTE));
    assert_eq!(error.cursor(), Some(5));
}

#[test]
fn invalid_escape_points_at_escaped_char() {
    let mut reader = StringReader::new("\"a\\nb\"");
    let error = reader.read_string().unwrap_err();
    assert!(error.is(&builtin::READER_INVALID_ESCAPE));
    assert_eq!(error.cursor(), Some(3));
}

#[test]
fn quoted_string_requires_quote() {
    let mut reader = StringReader::new("plain");
    assert!(
        reader
            .read_quoted_string()
            .unwrap_err()
            .is(&builtin::READER_EXPECTED_START_OF_QUOTE)
    );
    assert_eq!(reader.read_quoted_string().ok(), None);
    assert_eq!(StringReader::new("").read_quoted_string().unwrap(), "");
}

#[test]
fn unquoted_stops_at_disallowed_chars() {
    let mut reader = StringReader::new("minecraft:pig");
    assert_eq!(reader.read_unquoted_string(), "minecraft");
    assert_eq!(reader.peek(), Some(':'));
}

#[test]
fn expect_symbol() {
    let mut reader = StringReader::new("[x]");
    reader.expect('[').unwrap();
    let error = reader.expect(']').unwrap_err();
    assert_eq!(error.raw_message(), "Expected ']'");
    assert_eq!(reader.cursor(), 1);
}
