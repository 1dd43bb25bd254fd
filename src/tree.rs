//! Folding tokenized lines into trees of tag nodes.
//!
//! Levels drive the nesting: a line at level `L` becomes a child of the
//! nearest open node at level `L - 1`. A line that skips levels is
//! repaired (clamped to one below the deepest open node) and recorded as
//! an error. The file frame is validated here too: the first record must
//! be `HEAD`, the last `TRLR`, and anything after `TRLR` is dropped with a
//! warning.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::line::ParsedLine;
use crate::GedcomError;

/// One node of the tag tree: a parsed line plus its nested children.
///
/// Invariant: every child's level is exactly one more than its parent's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// The line this node was built from.
    pub line: ParsedLine,
    /// Child nodes, in input order.
    pub children: Vec<Node>,
}

impl Node {
    /// The node's tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.line.tag
    }

    /// The node's level.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.line.level
    }

    /// The node's physical line number.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.line.number
    }

    /// The node's raw value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.line.value.as_deref()
    }

    /// The node's cross-reference identifier, if any.
    #[must_use]
    pub fn xref(&self) -> Option<&str> {
        self.line.xref.as_deref()
    }

    /// The node's value with `CONT`/`CONC` continuation children applied:
    /// `CONT` inserts a newline before its value, `CONC` appends without a
    /// separator. Returns `None` when there is neither a value nor a
    /// continuation.
    #[must_use]
    pub fn continued_value(&self) -> Option<String> {
        let mut out = self.line.value.clone();
        for child in &self.children {
            match child.tag() {
                "CONT" => {
                    let text = out.get_or_insert_with(String::new);
                    text.push('\n');
                    if let Some(more) = child.value() {
                        text.push_str(more);
                    }
                }
                "CONC" => {
                    let text = out.get_or_insert_with(String::new);
                    if let Some(more) = child.value() {
                        text.push_str(more);
                    }
                }
                _ => {}
            }
        }
        out
    }
}

/// Folds the flat line sequence into the ordered sequence of level-0
/// record trees.
///
/// # Errors
///
/// Returns [`GedcomError::MissingHeader`] when the file is empty or does
/// not begin with `0 HEAD`, and [`GedcomError::MissingTrailer`] when no
/// `0 TRLR` record ends it.
pub(crate) fn build(
    lines: Vec<ParsedLine>,
    sink: &mut DiagnosticSink,
) -> Result<Vec<Node>, GedcomError> {
    let mut roots: Vec<Node> = Vec::new();
    // Open nodes; the node at stack index i sits at level i.
    let mut stack: Vec<Node> = Vec::new();

    for mut line in lines {
        // The stack never holds more than 100 nodes (levels are 0-99).
        if usize::from(line.level) > stack.len() {
            sink.error(
                Diagnostic::new(format!(
                    "level skipped: expected at most {}, found {}",
                    stack.len(),
                    line.level
                ))
                .at_line(line.number)
                .with_tag(&line.tag),
            );
            line.level = u8::try_from(stack.len()).unwrap_or(u8::MAX);
        }
        while stack.len() > usize::from(line.level) {
            if let Some(node) = stack.pop() {
                close(node, &mut stack, &mut roots);
            }
        }
        stack.push(Node {
            line,
            children: Vec::new(),
        });
    }
    while let Some(node) = stack.pop() {
        close(node, &mut stack, &mut roots);
    }

    validate_frame(&mut roots, sink)?;
    Ok(roots)
}

/// Attaches a finished node to its parent, or to the root sequence.
fn close(node: Node, stack: &mut [Node], roots: &mut Vec<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Enforces the HEAD-first / TRLR-last frame.
fn validate_frame(roots: &mut Vec<Node>, sink: &mut DiagnosticSink) -> Result<(), GedcomError> {
    match roots.first() {
        None => return Err(GedcomError::MissingHeader),
        Some(first) if first.tag() != "HEAD" => return Err(GedcomError::MissingHeader),
        Some(_) => {}
    }
    let Some(trailer_at) = roots.iter().position(|node| node.tag() == "TRLR") else {
        return Err(GedcomError::MissingTrailer);
    };
    if trailer_at + 1 < roots.len() {
        let first_extra = &roots[trailer_at + 1];
        sink.warning(
            Diagnostic::new(format!(
                "{} record(s) after TRLR ignored",
                roots.len() - trailer_at - 1
            ))
            .at_line(first_extra.number()),
        );
        roots.truncate(trailer_at + 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;
    use crate::reader::SourceLine;
    use std::borrow::Cow;

    fn lines_from(text: &str) -> Vec<ParsedLine> {
        let options = ParseOptions::default();
        let mut sink = DiagnosticSink::new();
        text.lines()
            .enumerate()
            .map(|(i, l)| {
                let source = SourceLine {
                    text: Cow::Owned(l.to_string()),
                    number: u32::try_from(i).unwrap() + 1,
                };
                crate::line::tokenize(&source, &options, &mut sink).unwrap()
            })
            .collect()
    }

    fn build_ok(text: &str) -> Vec<Node> {
        let mut sink = DiagnosticSink::new();
        build(lines_from(text), &mut sink).unwrap()
    }

    #[test]
    fn test_nesting_follows_levels() {
        let roots = build_ok("0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ASCII\n0 TRLR");
        assert_eq!(roots.len(), 2);
        let head = &roots[0];
        assert_eq!(head.tag(), "HEAD");
        assert_eq!(head.children.len(), 2);
        assert_eq!(head.children[0].tag(), "GEDC");
        assert_eq!(head.children[0].children[0].value(), Some("5.5.1"));
        assert_eq!(head.children[1].tag(), "CHAR");
    }

    #[test]
    fn test_child_levels_are_parent_plus_one() {
        fn check(node: &Node) {
            for child in &node.children {
                assert_eq!(child.level(), node.level() + 1);
                check(child);
            }
        }
        for root in build_ok("0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 SOUR sys\n2 CORP c\n3 ADDR a\n0 TRLR")
        {
            check(&root);
        }
    }

    #[test]
    fn test_level_skip_repaired_with_error() {
        let mut sink = DiagnosticSink::new();
        let roots = build(lines_from("0 HEAD\n2 GEDC\n0 TRLR"), &mut sink).unwrap();
        // The skipped line is clamped to level 1 and kept as a child.
        assert_eq!(roots[0].children.len(), 1);
        assert_eq!(roots[0].children[0].level(), 1);
        assert_eq!(sink.errors.len(), 1);
        assert!(sink.errors[0].message.contains("level skipped"));
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let mut sink = DiagnosticSink::new();
        assert!(matches!(
            build(Vec::new(), &mut sink),
            Err(GedcomError::MissingHeader)
        ));
    }

    #[test]
    fn test_wrong_first_record_is_missing_header() {
        let mut sink = DiagnosticSink::new();
        assert!(matches!(
            build(lines_from("0 @X@ INDI\n0 TRLR"), &mut sink),
            Err(GedcomError::MissingHeader)
        ));
    }

    #[test]
    fn test_no_trailer_is_fatal() {
        let mut sink = DiagnosticSink::new();
        assert!(matches!(
            build(lines_from("0 HEAD\n1 GEDC"), &mut sink),
            Err(GedcomError::MissingTrailer)
        ));
    }

    #[test]
    fn test_content_after_trailer_dropped_with_warning() {
        let mut sink = DiagnosticSink::new();
        let roots = build(
            lines_from("0 HEAD\n0 TRLR\n0 @I1@ INDI\n1 NAME Late /Arrival/"),
            &mut sink,
        )
        .unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots.last().unwrap().tag(), "TRLR");
        assert_eq!(sink.warnings.len(), 1);
    }

    #[test]
    fn test_continued_value_cont_and_conc() {
        let roots = build_ok(
            "0 HEAD\n0 @I1@ INDI\n1 NOTE This is a long note that spans\n2 CONT multiple lines using CONT\n2 CONC  and CONC tags.\n0 TRLR",
        );
        let note = &roots[1].children[0];
        assert_eq!(
            note.continued_value().unwrap(),
            "This is a long note that spans\nmultiple lines using CONT and CONC tags."
        );
    }

    #[test]
    fn test_continued_value_without_own_value() {
        let roots = build_ok("0 HEAD\n0 @I1@ INDI\n1 NOTE\n2 CONT starts below\n0 TRLR");
        let note = &roots[1].children[0];
        assert_eq!(note.continued_value().unwrap(), "\nstarts below");
    }
}
