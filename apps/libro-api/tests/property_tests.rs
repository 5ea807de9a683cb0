//! Property-based tests for libro-api
//!
//! Tests the API's identifier handling and payload opacity using proptest.

use libro_core::{SectionContent, SectionType};
use proptest::prelude::*;

// ============================================================
// Identifier Validation
// ============================================================

/// Book ids are UUIDs (36 characters with hyphens)
fn valid_book_id() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

/// Invalid book ids (too short, too long, or invalid characters)
fn invalid_book_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,10}",        // Too short
        "[a-z]{50,100}",      // Too long
        "[!@#$%^&*]{10,20}",  // Invalid characters
        Just("".to_string()), // Empty
    ]
}

/// The canonical wire spellings the section route accepts
fn known_section_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("GENERAL_DATA"),
        Just("CONSTRUCTION"),
        Just("CERTIFICATES"),
        Just("MAINTENANCE"),
        Just("INSTALLATIONS"),
        Just("INSURANCE"),
        Just("RENOVATIONS"),
        Just("DOCUMENTS"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Book Id Tests
    // ============================================================

    #[test]
    fn valid_book_ids_are_36_chars(id in valid_book_id()) {
        prop_assert_eq!(id.len(), 36);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
    }

    #[test]
    fn invalid_book_ids_dont_match_uuid_pattern(id in invalid_book_id()) {
        let uuid_pattern = regex::Regex::new(
            r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
        ).unwrap();
        prop_assert!(!uuid_pattern.is_match(&id));
    }

    // ============================================================
    // Section Type Route Parameter Tests
    // ============================================================

    #[test]
    fn known_section_types_parse(wire in known_section_type()) {
        let parsed = SectionType::parse(wire);
        prop_assert!(parsed.is_some());
        prop_assert_eq!(parsed.unwrap().as_str(), wire);
    }

    #[test]
    fn lowercase_or_garbage_section_types_are_rejected(
        wire in "[a-z_]{1,30}",
    ) {
        // Wire types are SCREAMING_SNAKE_CASE; anything lowercase is not
        // a canonical type and the route must 400 it.
        prop_assert!(SectionType::parse(&wire).is_none());
    }

    #[test]
    fn unknown_uppercase_section_types_are_rejected(
        wire in "[A-Z_]{1,30}",
    ) {
        let known = [
            "GENERAL_DATA",
            "CONSTRUCTION",
            "CERTIFICATES",
            "MAINTENANCE",
            "INSTALLATIONS",
            "INSURANCE",
            "RENOVATIONS",
            "DOCUMENTS",
        ];
        prop_assume!(!known.contains(&wire.as_str()));
        prop_assert!(SectionType::parse(&wire).is_none());
    }

    // ============================================================
    // Payload Opacity Tests
    // ============================================================

    /// Section content is an opaque map; the API stores and returns it
    /// verbatim, so a serde round trip must be lossless.
    #[test]
    fn section_content_round_trips_verbatim(
        entries in proptest::collection::hash_map(
            "[a-z_]{1,20}",
            "[a-zA-Z0-9 .,/-]{0,60}",
            0..12,
        )
    ) {
        let content: SectionContent = entries
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v.clone())))
            .collect();

        let json = serde_json::to_string(&content).unwrap();
        let back: SectionContent = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, content);
    }
}
