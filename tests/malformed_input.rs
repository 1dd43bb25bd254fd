//! Tests for malformed input: what is fatal, what is recorded, what is
//! silently repaired.

use ged_parse::{parse, GedcomError};

// ============================================================================
// Missing frame records
// ============================================================================

#[test]
fn test_empty_file_is_missing_header() {
    let failure = parse(b"").unwrap_err();
    assert!(matches!(failure.error, GedcomError::MissingHeader));
}

#[test]
fn test_record_without_header_is_fatal() {
    let failure = parse(b"0 @X@ INDI\n0 TRLR\n").unwrap_err();
    assert!(matches!(failure.error, GedcomError::MissingHeader));
}

#[test]
fn test_missing_trailer_is_fatal() {
    let failure = parse(b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n0 @I1@ INDI\n").unwrap_err();
    assert!(matches!(failure.error, GedcomError::MissingTrailer));
}

#[test]
fn test_fatal_failure_carries_prior_diagnostics() {
    // Level skip is recorded, then the missing trailer aborts.
    let failure = parse(b"0 HEAD\n2 GEDC\n0 @I1@ INDI\n").unwrap_err();
    assert!(matches!(failure.error, GedcomError::MissingTrailer));
    assert!(failure
        .errors
        .iter()
        .any(|e| e.message.contains("level skipped")));
}

#[test]
fn test_content_after_trailer_warns() {
    let outcome =
        parse(b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n0 TRLR\n0 @I1@ INDI\n").unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("after TRLR")));
    assert!(outcome.gedcom.individuals.is_empty());
}

// ============================================================================
// Levels
// ============================================================================

#[test]
fn test_level_99_accepted_level_100_rejected() {
    // A synthetic chain down to level 99.
    let mut deep = String::from("0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n0 @I1@ INDI\n");
    for level in 1..=99 {
        deep.push_str(&format!("{level} _N{level} x\n"));
    }
    deep.push_str("0 TRLR\n");
    assert!(parse(deep.as_bytes()).is_ok());

    let failure = parse(b"0 HEAD\n100 NOTE deep\n0 TRLR\n").unwrap_err();
    assert!(matches!(failure.error, GedcomError::InvalidLine { .. }));
}

#[test]
fn test_level_skip_recorded_and_repaired() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n0 @I1@ INDI\n3 NAME John /Doe/\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.message.contains("level skipped")));
    // The name still lands on the individual after the repair.
    let indi = outcome.gedcom.individual("@I1@").unwrap();
    assert_eq!(indi.names.len(), 1);
}

#[test]
fn test_non_numeric_level_is_fatal() {
    let failure = parse(b"0 HEAD\nX GEDC\n0 TRLR\n").unwrap_err();
    assert!(matches!(failure.error, GedcomError::InvalidLine { .. }));
}

// ============================================================================
// Cross-references
// ============================================================================

#[test]
fn test_dangling_reference_recorded_graph_complete() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @F1@ FAM\n1 HUSB @NONEXISTENT@\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.message.contains("dangling cross-reference @NONEXISTENT@")));
    // The graph is otherwise complete and the link kept as written.
    let family = outcome.gedcom.family("@F1@").unwrap();
    assert_eq!(family.husband.as_deref(), Some("@NONEXISTENT@"));
}

#[test]
fn test_dangling_reference_names_expected_kind() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @I1@ INDI\n1 FAMS @F9@\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.message.contains("of kind family")));
}

#[test]
fn test_forward_reference_resolves() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @F1@ FAM\n1 CHIL @I1@\n0 @I1@ INDI\n1 NAME Late /Defined/\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);
}

#[test]
fn test_duplicate_xref_first_wins_with_error() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @I1@ INDI\n1 NAME First /Kept/\n\
          0 @I1@ INDI\n1 NAME Second /Dropped/\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.message.contains("duplicate cross-reference")));
    assert_eq!(outcome.gedcom.individuals.len(), 1);
    let indi = outcome.gedcom.individual("@I1@").unwrap();
    assert_eq!(indi.names[0].value.as_deref(), Some("First /Kept/"));
}

#[test]
fn test_same_xref_in_different_kinds_is_allowed() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @X1@ INDI\n0 @X1@ SOUR\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome.errors.is_empty());
    assert!(outcome.gedcom.individual("@X1@").is_some());
    assert!(outcome.gedcom.source("@X1@").is_some());
}

#[test]
fn test_malformed_xref_recorded() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @I 1@ INDI\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.message.contains("malformed cross-reference")));
}

// ============================================================================
// Cardinality and values
// ============================================================================

#[test]
fn test_duplicate_sex_warns_last_wins() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @I1@ INDI\n1 SEX M\n1 SEX F\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("duplicate SEX")));
    let indi = outcome.gedcom.individual("@I1@").unwrap();
    assert_eq!(indi.sex, Some(ged_parse::types::Sex::Female));
}

#[test]
fn test_numeric_parse_failure_warns_and_leaves_unset() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @F1@ FAM\n1 NCHI several\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("expected a number")));
    assert_eq!(outcome.gedcom.family("@F1@").unwrap().num_children, None);
}

#[test]
fn test_invalid_date_is_kept_raw() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n\
          0 @I1@ INDI\n1 BIRT\n2 DATE not-a-real-date\n0 TRLR\n",
    )
    .unwrap();
    let indi = outcome.gedcom.individual("@I1@").unwrap();
    assert_eq!(
        indi.events[0].detail.date.as_ref().unwrap().value.as_deref(),
        Some("not-a-real-date")
    );
}

// ============================================================================
// Strict options
// ============================================================================

#[test]
fn test_strict_custom_tags_warns() {
    let sample = b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n0 _CUSTOM v\n0 TRLR\n";

    let lenient = parse(sample).unwrap();
    assert!(lenient
        .warnings
        .iter()
        .all(|w| !w.message.contains("user-defined")));

    let strict = ged_parse::GedcomBuilder::new()
        .strict_custom_tags(true)
        .build_from_bytes(sample)
        .unwrap();
    assert!(strict
        .warnings
        .iter()
        .any(|w| w.message.contains("user-defined")));
}

#[test]
fn test_strict_line_breaks_warns_on_bare_cr() {
    let sample = b"0 HEAD\r1 GEDC\r2 VERS 5.5\r1 CHAR ASCII\r0 TRLR\r";

    let lenient = parse(sample).unwrap();
    assert!(lenient.warnings.is_empty());

    let strict = ged_parse::GedcomBuilder::new()
        .strict_line_breaks(true)
        .build_from_bytes(sample)
        .unwrap();
    assert!(strict
        .warnings
        .iter()
        .any(|w| w.message.contains("bare CR")));
}

// ============================================================================
// Whitespace tolerance
// ============================================================================

#[test]
fn test_leading_whitespace_tolerated_with_warning() {
    let outcome = parse(
        b"0 HEAD\n1 GEDC\n2 VERS 5.5\n1 CHAR ASCII\n  0 @I1@ INDI\n0 TRLR\n",
    )
    .unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("leading whitespace")));
    assert!(outcome.gedcom.individual("@I1@").is_some());
}
