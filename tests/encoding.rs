//! Integration tests for encoding detection and decoding.
//!
//! Fixtures are built as byte vectors so every encoding is exercised
//! byte-for-byte: UTF-8 (with and without BOM), UTF-16 LE/BE (with and
//! without BOM), ASCII, and ANSEL with combining diacritics.

use ged_parse::{parse, GedcomError};

fn utf16_bytes(content: &str, little_endian: bool, bom: bool) -> Vec<u8> {
    let mut bytes = Vec::new();
    if bom {
        bytes.extend_from_slice(if little_endian {
            &[0xFF, 0xFE]
        } else {
            &[0xFE, 0xFF]
        });
    }
    for unit in content.encode_utf16() {
        bytes.extend_from_slice(&if little_endian {
            unit.to_le_bytes()
        } else {
            unit.to_be_bytes()
        });
    }
    bytes
}

fn sample_with_name(name: &str, char_tag: &str) -> String {
    format!(
        "0 HEAD\n\
         1 GEDC\n\
         2 VERS 5.5.1\n\
         1 CHAR {char_tag}\n\
         0 @I1@ INDI\n\
         1 NAME {name}\n\
         0 TRLR\n"
    )
}

// ============================================================================
// UTF-8
// ============================================================================

#[test]
fn test_utf8_without_bom() {
    let content = sample_with_name("José /García/", "UTF-8");
    let outcome = parse(content.as_bytes()).unwrap();
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("José /García/"));
}

#[test]
fn test_utf8_with_bom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(sample_with_name("Müller /Schröder/", "UTF-8").as_bytes());
    let outcome = parse(&bytes).unwrap();
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("Müller /Schröder/"));
}

#[test]
fn test_utf8_invalid_sequence_replaced_with_warning() {
    let mut bytes = b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR UTF-8\n0 @I1@ INDI\n1 NAME Jos".to_vec();
    bytes.push(0xE9); // a lone Latin-1 byte is not valid UTF-8
    bytes.extend_from_slice(b"\n0 TRLR\n");

    let outcome = parse(&bytes).unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("replaced")));
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("Jos\u{FFFD}"));
}

// ============================================================================
// UTF-16
// ============================================================================

#[test]
fn test_utf16_le_with_bom() {
    let bytes = utf16_bytes(&sample_with_name("José /García/", "UNICODE"), true, true);
    let outcome = parse(&bytes).unwrap();
    assert!(outcome.errors.is_empty());
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("José /García/"));
}

#[test]
fn test_utf16_be_with_bom() {
    let bytes = utf16_bytes(&sample_with_name("José /García/", "UNICODE"), false, true);
    let outcome = parse(&bytes).unwrap();
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("José /García/"));
}

#[test]
fn test_utf16_le_without_bom_detected_by_pattern() {
    let bytes = utf16_bytes(&sample_with_name("Plain /Name/", "UNICODE"), true, false);
    let outcome = parse(&bytes).unwrap();
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("Plain /Name/"));
}

#[test]
fn test_utf16_be_without_bom_detected_by_pattern() {
    let bytes = utf16_bytes(&sample_with_name("Plain /Name/", "UNICODE"), false, false);
    let outcome = parse(&bytes).unwrap();
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("Plain /Name/"));
}

#[test]
fn test_utf16_bom_wins_over_contradicting_char() {
    let bytes = utf16_bytes(&sample_with_name("Somebody /Else/", "UTF-8"), true, true);
    let outcome = parse(&bytes).unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("byte-order mark")));
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("Somebody /Else/"));
}

// ============================================================================
// ASCII and ANSEL
// ============================================================================

#[test]
fn test_ascii_declared() {
    let content = sample_with_name("John /Doe/", "ASCII");
    let outcome = parse(content.as_bytes()).unwrap();
    assert!(outcome.errors.is_empty());
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_ansel_diacritics_reordered() {
    // "José" in ANSEL: acute (0xE2) precedes the base 'e'.
    let mut bytes = b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ANSEL\n0 @I1@ INDI\n1 NAME Jos".to_vec();
    bytes.extend_from_slice(&[0xE2, b'e']);
    bytes.extend_from_slice(b" /Garc");
    bytes.extend_from_slice(&[0xE2, b'i']);
    bytes.extend_from_slice(b"a/\n0 TRLR\n");

    let outcome = parse(&bytes).unwrap();
    assert!(outcome.errors.is_empty());
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(
        name.value.as_deref(),
        Some("Jose\u{0301} /Garci\u{0301}a/")
    );
}

#[test]
fn test_ansel_special_characters() {
    // 0xA1 is Ł, 0xB2 is ø.
    let mut bytes = b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ANSEL\n0 @I1@ INDI\n1 NAME ".to_vec();
    bytes.extend_from_slice(&[0xA1, b'o', b'd', b'z', b' ', 0xB2]);
    bytes.extend_from_slice(b"\n0 TRLR\n");

    let outcome = parse(&bytes).unwrap();
    let name = &outcome.gedcom.individual("@I1@").unwrap().names[0];
    assert_eq!(name.value.as_deref(), Some("\u{0141}odz \u{00F8}"));
}

#[test]
fn test_undeclared_charset_assumes_ansel_with_warning() {
    let outcome = parse(b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n0 TRLR\n").unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("assuming ANSEL")));
}

#[test]
fn test_unknown_declared_charset_is_fatal() {
    let failure = parse(b"0 HEAD\n1 CHAR EBCDIC\n0 TRLR\n").unwrap_err();
    assert!(matches!(
        failure.error,
        GedcomError::UnsupportedEncoding(ref name) if name == "EBCDIC"
    ));
}

// ============================================================================
// Terminator dialects
// ============================================================================

#[test]
fn test_terminator_dialects_yield_identical_graphs() {
    let with = |sep: &str| {
        format!("0 HEAD{sep}1 GEDC{sep}2 VERS 5.5.1{sep}1 CHAR ASCII{sep}0 @I1@ INDI{sep}1 NAME A /B/{sep}0 TRLR{sep}")
    };
    let reference = parse(with("\n").as_bytes()).unwrap();
    for sep in ["\r", "\r\n", "\n\r"] {
        let outcome = parse(with(sep).as_bytes()).unwrap();
        assert_eq!(
            outcome.gedcom.individuals, reference.gedcom.individuals,
            "separator {sep:?}"
        );
        assert_eq!(outcome.gedcom.header, reference.gedcom.header);
    }
}
