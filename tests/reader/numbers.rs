//! Integration tests for numeric and boolean reads

use proptest::prelude::*;
use sigil_foundation::{StringReader, builtin};

// =============================================================================
// Round Trips
// =============================================================================

proptest! {
    #[test]
    fn int_round_trips(value: i32) {
        let text = value.to_string();
        let mut reader = StringReader::new(&format!("{text} rest"));
        prop_assert_eq!(reader.read_int().unwrap(), value);
        prop_assert_eq!(reader.cursor(), text.len());
    }

    #[test]
    fn long_round_trips(value: i64) {
        let text = value.to_string();
        let mut reader = StringReader::new(&text);
        prop_assert_eq!(reader.read_long().unwrap(), value);
        prop_assert!(!reader.can_read());
    }

    #[test]
    fn double_round_trips(value in -1.0e9f64..1.0e9) {
        let text = value.to_string();
        let mut reader = StringReader::new(&text);
        prop_assert_eq!(reader.read_double().unwrap(), value);
        prop_assert_eq!(reader.cursor(), text.len());
    }

    #[test]
    fn boolean_round_trips(value: bool) {
        let text = value.to_string();
        let mut reader = StringReader::new(&text);
        prop_assert_eq!(reader.read_boolean().unwrap(), value);
        prop_assert_eq!(reader.cursor(), text.len());
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn missing_number_keeps_cursor() {
    let mut reader = StringReader::new("abc");
    let error = reader.read_int().unwrap_err();
    assert!(error.is(&builtin::READER_EXPECTED_INT));
    assert_eq!(error.cursor(), Some(0));
    assert_eq!(reader.cursor(), 0);
}

#[test]
fn malformed_number_restores_cursor() {
    let mut reader = StringReader::new("x 12.34.56");
    reader.set_cursor(2);
    let error = reader.read_double().unwrap_err();
    assert!(error.is(&builtin::READER_INVALID_DOUBLE));
    assert_eq!(error.raw_message(), "Invalid double '12.34.56'");
    assert_eq!(reader.cursor(), 2);
}

#[test]
fn overflowing_int_is_invalid() {
    let mut reader = StringReader::new("99999999999");
    assert!(reader.read_int().unwrap_err().is(&builtin::READER_INVALID_INT));
    assert_eq!(reader.read_long().unwrap(), 99_999_999_999);
}

#[test]
fn invalid_boolean_restores_cursor() {
    let mut reader = StringReader::new("yes");
    let error = reader.read_boolean().unwrap_err();
    assert!(error.is(&builtin::READER_INVALID_BOOL));
    assert_eq!(reader.cursor(), 0);
    assert!(StringReader::new("").read_boolean().unwrap_err().is(&builtin::READER_EXPECTED_BOOL));
}

#[test]
fn error_context_points_at_cursor() {
    let mut reader = StringReader::new("give player abc");
    reader.set_cursor(12);
    let error = reader.read_int().unwrap_err();
    assert_eq!(error.context().as_deref(), Some("...ve player <--[HERE]"));
    assert_eq!(
        error.to_string(),
        "Expected integer at position 12: ...ve player <--[HERE]"
    );
}
