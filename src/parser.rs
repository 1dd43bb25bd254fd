//! The object-graph interpreter.
//!
//! Two logical passes run over the level-0 record trees:
//!
//! - **Pass A (discovery)** registers a typed entity in the right
//!   xref-keyed map for every record that carries an xref, without looking
//!   at children. This makes forward cross-references resolvable.
//! - **Pass B (hydration)** dispatches each record to its tag handler,
//!   which walks the children and populates fields. References encountered
//!   along the way are queued rather than checked.
//!
//! After Pass B every queued reference is resolved against the maps; a
//! miss records a `dangling cross-reference` error and the link is left as
//! written.

use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::progress::{RecordEvent, RecordObserver};
use crate::tree::Node;
use crate::types::{
    Annotations, ChangeDate, CustomFact, Family, Gedcom, Header, Individual, Multimedia, Note,
    NoteRecord, Repository, Source, Submission, Submitter, Trailer,
};

/// The record kinds that participate in cross-referencing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordKind {
    Individual,
    Family,
    Multimedia,
    Note,
    Source,
    Repository,
    Submitter,
    Submission,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Individual => "individual",
            RecordKind::Family => "family",
            RecordKind::Multimedia => "multimedia",
            RecordKind::Note => "note",
            RecordKind::Source => "source",
            RecordKind::Repository => "repository",
            RecordKind::Submitter => "submitter",
            RecordKind::Submission => "submission",
        };
        write!(f, "{name}")
    }
}

/// A reference waiting for resolution at the end of Pass B.
#[derive(Debug)]
struct PendingRef {
    xref: String,
    kind: RecordKind,
    line: u32,
    tag: String,
}

/// Shared interpreter state threaded through every handler.
pub(crate) struct Interp<'a> {
    sink: &'a mut DiagnosticSink,
    pending: Vec<PendingRef>,
}

impl<'a> Interp<'a> {
    pub(crate) fn new(sink: &'a mut DiagnosticSink) -> Self {
        Interp {
            sink,
            pending: Vec::new(),
        }
    }

    pub(crate) fn warning(&mut self, diagnostic: Diagnostic) {
        self.sink.warning(diagnostic);
    }

    pub(crate) fn error(&mut self, diagnostic: Diagnostic) {
        self.sink.error(diagnostic);
    }

    /// Queues a reference for end-of-parse resolution.
    pub(crate) fn pending_ref(&mut self, node: &Node, kind: RecordKind, xref: &str) {
        self.pending.push(PendingRef {
            xref: xref.to_string(),
            kind,
            line: node.number(),
            tag: node.tag().to_string(),
        });
    }

    /// The node's value with continuations applied.
    #[allow(clippy::unused_self)]
    pub(crate) fn value(&mut self, node: &Node) -> Option<String> {
        node.continued_value()
    }

    /// The node's value as a 32-bit integer. Parse failure is a warning
    /// and leaves the field unset.
    pub(crate) fn value_i32(&mut self, node: &Node) -> Option<i32> {
        let value = node.value()?.trim().to_string();
        match value.parse() {
            Ok(number) => Some(number),
            Err(_) => {
                self.warning(
                    Diagnostic::new(format!("expected a number, found `{value}`"))
                        .at_line(node.number())
                        .with_tag(node.tag()),
                );
                None
            }
        }
    }

    /// Stores a singleton subtag value. A repeated occurrence draws a
    /// cardinality warning; the last-seen value wins.
    pub(crate) fn set_once<T>(&mut self, node: &Node, slot: &mut Option<T>, value: Option<T>) {
        if value.is_none() {
            return;
        }
        if slot.is_some() {
            self.warning(
                Diagnostic::new(format!("duplicate {}; last value wins", node.tag()))
                    .at_line(node.number())
                    .with_tag(node.tag()),
            );
        }
        *slot = value;
    }
}

/// True when `value` has the shape of a cross-reference (`@...@` with no
/// interior `@` or space). Used to split pointer payloads from inline
/// payloads.
pub(crate) fn is_xref(value: &str) -> bool {
    let Some(interior) = value.strip_prefix('@').and_then(|v| v.strip_suffix('@')) else {
        return false;
    };
    !interior.is_empty() && !interior.contains(['@', ' '])
}

/// Walks a node's children, routing each to the caller's handler.
///
/// The cluster every structure shares is handled here once: `CONT`/`CONC`
/// are skipped (their content is folded into values), `NOTE` and `CHAN`
/// land in the returned [`Annotations`], `_`-prefixed tags are preserved
/// as custom facts, and tags the handler declines are preserved as custom
/// facts with a warning.
pub(crate) fn walk_children<F>(node: &Node, interp: &mut Interp, mut handler: F) -> Annotations
where
    F: FnMut(&str, &Node, &mut Interp) -> bool,
{
    let mut annotations = Annotations::default();
    for child in &node.children {
        let tag = child.tag();
        match tag {
            "CONT" | "CONC" => continue,
            _ if tag.starts_with('_') => {
                annotations.custom_facts.push(CustomFact::interpret(child));
                continue;
            }
            "NOTE" => {
                let note = Note::interpret(child, interp);
                annotations.notes.push(note);
                continue;
            }
            "CHAN" => {
                let change = ChangeDate::interpret(child, interp);
                interp.set_once(child, &mut annotations.change_date, Some(change));
                continue;
            }
            _ => {}
        }
        if !handler(tag, child, interp) {
            interp.warning(
                Diagnostic::new(format!("unknown tag {tag} under {}", node.tag()))
                    .at_line(child.number())
                    .with_tag(tag),
            );
            annotations.custom_facts.push(CustomFact::interpret(child));
        }
    }
    annotations
}

/// Runs passes A and B plus reference resolution over the record trees.
pub(crate) fn interpret(
    roots: &[Node],
    sink: &mut DiagnosticSink,
    record_observers: &mut [RecordObserver],
) -> Gedcom {
    let mut gedcom = Gedcom::default();
    let mut interp = Interp::new(sink);

    // Pass A: register every xref-bearing record so forward references
    // resolve. Duplicate xrefs within a kind: first wins, error recorded.
    let mut duplicates = vec![false; roots.len()];
    for (index, node) in roots.iter().enumerate() {
        let Some(xref) = node.xref() else { continue };
        let registered = match node.tag() {
            "INDI" => insert_new(&mut gedcom.individuals, xref, Individual::with_xref),
            "FAM" => insert_new(&mut gedcom.families, xref, Family::with_xref),
            "OBJE" => insert_new(&mut gedcom.multimedia, xref, Multimedia::with_xref),
            "NOTE" => insert_new(&mut gedcom.notes, xref, NoteRecord::with_xref),
            "SOUR" => insert_new(&mut gedcom.sources, xref, Source::with_xref),
            "REPO" => insert_new(&mut gedcom.repositories, xref, Repository::with_xref),
            "SUBM" => insert_new(&mut gedcom.submitters, xref, Submitter::with_xref),
            _ => continue,
        };
        if !registered {
            duplicates[index] = true;
            interp.error(
                Diagnostic::new(format!("duplicate cross-reference within {}", node.tag()))
                    .at_line(node.number())
                    .with_tag(node.tag())
                    .with_xref(xref),
            );
        }
    }

    // Pass B: hydrate each record and notify observers.
    let mut processed = 0usize;
    for (index, node) in roots.iter().enumerate() {
        if duplicates[index] {
            continue;
        }
        hydrate_record(node, index, &mut gedcom, &mut interp);
        processed += 1;
        let event = RecordEvent {
            tag: node.tag().to_string(),
            xref: node.xref().map(str::to_string),
            records_processed: processed,
        };
        for observer in record_observers.iter_mut() {
            observer(&event);
        }
    }

    resolve_references(&mut interp, &gedcom);
    gedcom
}

/// Inserts a placeholder record unless the xref is already taken.
fn insert_new<T>(
    map: &mut indexmap::IndexMap<String, T>,
    xref: &str,
    make: impl FnOnce(String) -> T,
) -> bool {
    if map.contains_key(xref) {
        return false;
    }
    map.insert(xref.to_string(), make(xref.to_string()));
    true
}

/// Dispatches one level-0 record to its handler.
fn hydrate_record(node: &Node, index: usize, gedcom: &mut Gedcom, interp: &mut Interp) {
    let tag = node.tag();
    if tag.starts_with('_') {
        gedcom.custom_records.push(CustomFact::interpret(node));
        return;
    }
    match tag {
        "HEAD" => {
            // The tree builder guarantees the first record is HEAD; any
            // other position makes this a duplicate.
            if index == 0 {
                gedcom.header = Header::interpret(node, interp);
            } else {
                interp.error(
                    Diagnostic::new("more than one HEAD record; first kept")
                        .at_line(node.number())
                        .with_tag("HEAD"),
                );
            }
        }
        "SUBN" => {
            let submission = Submission::interpret(node, interp);
            if gedcom.submission.is_some() {
                interp.error(
                    Diagnostic::new("more than one SUBN record; first kept")
                        .at_line(node.number())
                        .with_tag("SUBN"),
                );
            } else {
                gedcom.submission = Some(submission);
            }
        }
        "TRLR" => gedcom.trailer = Some(Trailer),
        "INDI" | "FAM" | "OBJE" | "NOTE" | "SOUR" | "REPO" | "SUBM" => {
            let Some(xref) = node.xref() else {
                interp.error(
                    Diagnostic::new(format!("{tag} record without a cross-reference; skipped"))
                        .at_line(node.number())
                        .with_tag(tag),
                );
                return;
            };
            let xref = xref.to_string();
            match tag {
                "INDI" => {
                    let record = Individual::interpret(node, interp);
                    gedcom.individuals.insert(xref, record);
                }
                "FAM" => {
                    let record = Family::interpret(node, interp);
                    gedcom.families.insert(xref, record);
                }
                "OBJE" => {
                    let record = Multimedia::interpret(node, interp);
                    gedcom.multimedia.insert(xref, record);
                }
                "NOTE" => {
                    let record = NoteRecord::interpret(node, interp);
                    gedcom.notes.insert(xref, record);
                }
                "SOUR" => {
                    let record = Source::interpret(node, interp);
                    gedcom.sources.insert(xref, record);
                }
                "REPO" => {
                    let record = Repository::interpret(node, interp);
                    gedcom.repositories.insert(xref, record);
                }
                "SUBM" => {
                    let record = Submitter::interpret(node, interp);
                    gedcom.submitters.insert(xref, record);
                }
                _ => {}
            }
        }
        _ => {
            interp.warning(
                Diagnostic::new(format!("unknown record tag {tag}"))
                    .at_line(node.number())
                    .with_tag(tag),
            );
            gedcom.custom_records.push(CustomFact::interpret(node));
        }
    }
}

/// Checks every queued reference against the finished maps.
fn resolve_references(interp: &mut Interp, gedcom: &Gedcom) {
    let pending = std::mem::take(&mut interp.pending);
    for reference in pending {
        let hit = match reference.kind {
            RecordKind::Individual => gedcom.individuals.contains_key(&reference.xref),
            RecordKind::Family => gedcom.families.contains_key(&reference.xref),
            RecordKind::Multimedia => gedcom.multimedia.contains_key(&reference.xref),
            RecordKind::Note => gedcom.notes.contains_key(&reference.xref),
            RecordKind::Source => gedcom.sources.contains_key(&reference.xref),
            RecordKind::Repository => gedcom.repositories.contains_key(&reference.xref),
            RecordKind::Submitter => gedcom.submitters.contains_key(&reference.xref),
            RecordKind::Submission => gedcom
                .submission
                .as_ref()
                .is_some_and(|s| s.xref.as_deref() == Some(reference.xref.as_str())),
        };
        if !hit {
            interp.error(
                Diagnostic::new(format!(
                    "dangling cross-reference {} of kind {}",
                    reference.xref, reference.kind
                ))
                .at_line(reference.line)
                .with_tag(reference.tag)
                .with_xref(reference.xref),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_xref() {
        assert!(is_xref("@I1@"));
        assert!(is_xref("@NONEXISTENT@"));
        assert!(!is_xref("plain text"));
        assert!(!is_xref("@unclosed"));
        assert!(!is_xref("@a b@"));
        assert!(!is_xref("@@"));
    }
}
