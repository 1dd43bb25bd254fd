//! The line tokenizer.
//!
//! Splits one logical line into its `level [xref] tag [value]` parts, per
//! the GEDCOM grammar:
//!
//! ```text
//! line  := level WS [ xref WS ] tag [ WS value ]
//! level := 1*2 DIGIT              ; 0-99
//! xref  := '@' 1*CHAR '@'         ; no '@' or space inside
//! tag   := 1*TAGCHAR              ; A-Z, 0-9, or leading '_'
//! ```
//!
//! A missing or out-of-range level and a missing tag are fatal; everything
//! else (leading whitespace, malformed xrefs, unconventional tag casing) is
//! tolerated with a diagnostic.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::options::ParseOptions;
use crate::reader::SourceLine;
use crate::util;
use crate::GedcomError;

/// One tokenized GEDCOM line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLine {
    /// Depth in the record hierarchy, 0-99.
    pub level: u8,
    /// The line's cross-reference identifier, `@` delimiters included.
    pub xref: Option<String>,
    /// The tag, as written.
    pub tag: String,
    /// Everything after the tag's delimiter, verbatim. `Some("")` when the
    /// delimiter was present with nothing after it.
    pub value: Option<String>,
    /// 1-based physical line number, for diagnostics.
    pub number: u32,
}

/// Tokenizes one logical line.
///
/// # Errors
///
/// Returns [`GedcomError::InvalidLine`] when the level or tag cannot be
/// recovered.
pub(crate) fn tokenize(
    line: &SourceLine,
    options: &ParseOptions,
    sink: &mut DiagnosticSink,
) -> Result<ParsedLine, GedcomError> {
    let number = line.number;
    let mut rest = line.text.as_ref();

    if rest.starts_with(char::is_whitespace) {
        sink.warning(Diagnostic::new("leading whitespace before level number").at_line(number));
        rest = rest.trim_start();
    }

    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits == 0 {
        return Err(GedcomError::InvalidLine {
            line: number,
            message: "expected digit for level number".to_string(),
        });
    }
    if digits > 2 {
        return Err(GedcomError::InvalidLine {
            line: number,
            message: format!("level number out of range: {}", &rest[..digits]),
        });
    }
    // Two digits cap the value at 99; the u8 parse cannot fail here.
    let level: u8 = rest[..digits].parse().map_err(|_| GedcomError::InvalidLine {
        line: number,
        message: "unparseable level number".to_string(),
    })?;
    rest = rest[digits..].trim_start();

    let mut xref = None;
    if rest.starts_with('@') {
        let word_end = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len());
        let word = &rest[..word_end];
        if is_well_formed_xref(word) {
            if level != 0 {
                sink.warning(
                    Diagnostic::new("cross-reference identifier on a non-record line")
                        .at_line(number)
                        .with_xref(word),
                );
            }
            xref = Some(word.to_string());
        } else {
            sink.error(
                Diagnostic::new("malformed cross-reference identifier")
                    .at_line(number)
                    .with_xref(word),
            );
        }
        rest = rest[word_end..].trim_start();
    }

    let tag_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let tag = &rest[..tag_end];
    if tag.is_empty() {
        return Err(GedcomError::InvalidLine {
            line: number,
            message: "missing tag".to_string(),
        });
    }
    if let Some(stripped) = tag.strip_prefix('_') {
        if options.strict_custom_tags {
            sink.warning(
                Diagnostic::new("user-defined tag")
                    .at_line(number)
                    .with_tag(tag),
            );
        }
        if stripped.is_empty() {
            return Err(GedcomError::InvalidLine {
                line: number,
                message: "missing tag".to_string(),
            });
        }
    } else if !tag
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        sink.warning(
            Diagnostic::new("tag is not uppercase alphanumeric")
                .at_line(number)
                .with_tag(tag),
        );
    }
    let tag = util::intern(tag).map_or_else(|| tag.to_string(), str::to_string);
    rest = &rest[tag_end..];

    // One delimiter separates tag and value; anything beyond it, including
    // further leading spaces, belongs to the value.
    let value = rest.strip_prefix(' ').map(str::to_string).or_else(|| {
        rest.strip_prefix('\t')
            .map(str::to_string)
            .or_else(|| (!rest.is_empty()).then(|| rest.trim_start().to_string()))
    });

    Ok(ParsedLine {
        level,
        xref,
        tag,
        value,
        number,
    })
}

/// True when `word` matches `@[^@ ]+@`.
fn is_well_formed_xref(word: &str) -> bool {
    let Some(interior) = word
        .strip_prefix('@')
        .and_then(|w| w.strip_suffix('@'))
    else {
        return false;
    };
    !interior.is_empty() && !interior.contains(['@', ' '])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn parse(text: &str) -> Result<ParsedLine, GedcomError> {
        let mut sink = DiagnosticSink::new();
        parse_with_sink(text, &mut sink)
    }

    fn parse_with_sink(text: &str, sink: &mut DiagnosticSink) -> Result<ParsedLine, GedcomError> {
        let line = SourceLine {
            text: Cow::Owned(text.to_string()),
            number: 7,
        };
        tokenize(&line, &ParseOptions::default(), sink)
    }

    #[test]
    fn test_plain_record_line() {
        let parsed = parse("0 HEAD").unwrap();
        assert_eq!(parsed.level, 0);
        assert_eq!(parsed.xref, None);
        assert_eq!(parsed.tag, "HEAD");
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.number, 7);
    }

    #[test]
    fn test_line_with_xref() {
        let parsed = parse("0 @I1@ INDI").unwrap();
        assert_eq!(parsed.xref.as_deref(), Some("@I1@"));
        assert_eq!(parsed.tag, "INDI");
    }

    #[test]
    fn test_line_with_value() {
        let parsed = parse("1 NAME John /Doe/").unwrap();
        assert_eq!(parsed.level, 1);
        assert_eq!(parsed.value.as_deref(), Some("John /Doe/"));
    }

    #[test]
    fn test_value_preserves_inner_spacing() {
        let parsed = parse("2 CONC  two  spaces ").unwrap();
        assert_eq!(parsed.value.as_deref(), Some(" two  spaces "));
    }

    #[test]
    fn test_empty_value_after_delimiter() {
        let parsed = parse("1 NOTE ").unwrap();
        assert_eq!(parsed.value.as_deref(), Some(""));
    }

    #[test]
    fn test_max_level_accepted() {
        assert_eq!(parse("99 NOTE deep").unwrap().level, 99);
    }

    #[test]
    fn test_level_100_rejected() {
        assert!(matches!(
            parse("100 NOTE too deep"),
            Err(GedcomError::InvalidLine { .. })
        ));
    }

    #[test]
    fn test_missing_level_rejected() {
        assert!(matches!(
            parse("NOTE no level"),
            Err(GedcomError::InvalidLine { .. })
        ));
    }

    #[test]
    fn test_missing_tag_rejected() {
        assert!(matches!(
            parse("0 @I1@"),
            Err(GedcomError::InvalidLine { .. })
        ));
    }

    #[test]
    fn test_leading_whitespace_warns() {
        let mut sink = DiagnosticSink::new();
        let parsed = parse_with_sink("  0 HEAD", &mut sink).unwrap();
        assert_eq!(parsed.level, 0);
        assert_eq!(sink.warnings.len(), 1);
        assert!(sink.warnings[0].message.contains("leading whitespace"));
    }

    #[test]
    fn test_malformed_xref_recorded_as_error() {
        let mut sink = DiagnosticSink::new();
        let parsed = parse_with_sink("0 @I1 INDI", &mut sink);
        // "@I1" never closes; the word is consumed and INDI becomes the tag.
        let parsed = parsed.unwrap();
        assert_eq!(parsed.xref, None);
        assert_eq!(parsed.tag, "INDI");
        assert_eq!(sink.errors.len(), 1);
    }

    #[test]
    fn test_xref_on_non_record_line_warns() {
        let mut sink = DiagnosticSink::new();
        let parsed = parse_with_sink("2 @X@ SOUR cited", &mut sink).unwrap();
        assert_eq!(parsed.xref.as_deref(), Some("@X@"));
        assert_eq!(sink.warnings.len(), 1);
    }

    #[test]
    fn test_custom_tag_accepted_silently_by_default() {
        let mut sink = DiagnosticSink::new();
        let parsed = parse_with_sink("1 _MYTAG custom", &mut sink).unwrap();
        assert_eq!(parsed.tag, "_MYTAG");
        assert!(sink.warnings.is_empty());
    }

    #[test]
    fn test_custom_tag_warns_under_strict() {
        let line = SourceLine {
            text: Cow::Owned("1 _MYTAG custom".to_string()),
            number: 1,
        };
        let options = ParseOptions {
            strict_custom_tags: true,
            ..ParseOptions::default()
        };
        let mut sink = DiagnosticSink::new();
        tokenize(&line, &options, &mut sink).unwrap();
        assert_eq!(sink.warnings.len(), 1);
    }

    #[test]
    fn test_lowercase_tag_warns() {
        let mut sink = DiagnosticSink::new();
        let parsed = parse_with_sink("1 name John", &mut sink).unwrap();
        assert_eq!(parsed.tag, "name");
        assert_eq!(sink.warnings.len(), 1);
    }

    #[test]
    fn test_xref_pattern() {
        assert!(is_well_formed_xref("@I1@"));
        assert!(is_well_formed_xref("@SUBMITTER@"));
        assert!(!is_well_formed_xref("@@"));
        assert!(!is_well_formed_xref("@I 1@"));
        assert!(!is_well_formed_xref("@I@1@"));
        assert!(!is_well_formed_xref("@I1"));
    }
}
