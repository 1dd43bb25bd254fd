//! Note structures and standalone note records.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{is_xref, walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Citation, Xref};

/// A note attached to another structure (tag: NOTE).
///
/// The payload is either inline text (possibly spanning CONT/CONC lines) or
/// a pointer to a standalone [`NoteRecord`]; exactly one of `text` and
/// `xref` is set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Note {
    /// Pointer to a level-0 note record, when the payload was an xref.
    pub xref: Option<Xref>,
    /// Inline note text, when the payload was literal.
    pub text: Option<String>,
    /// Source citations qualifying the note.
    pub citations: Vec<Citation>,
    /// User-defined subtrees found under the note.
    pub custom_facts: Vec<crate::types::CustomFact>,
}

impl Note {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Note {
        let mut note = Note::default();
        match node.value() {
            Some(value) if is_xref(value) => {
                note.xref = Some(value.to_string());
                interp.pending_ref(node, RecordKind::Note, value);
            }
            _ => note.text = node.continued_value(),
        }
        let extras = walk_children(node, interp, |tag, child, interp| match tag {
            "SOUR" => {
                note.citations.push(Citation::interpret(child, interp));
                true
            }
            _ => false,
        });
        note.custom_facts = extras.custom_facts;
        note
    }
}

/// A standalone note record (level-0 tag: NOTE), shareable by reference
/// from any number of structures.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct NoteRecord {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// The note text, with continuations applied.
    pub text: Option<String>,
    /// Source citations qualifying the note.
    pub citations: Vec<Citation>,
    /// User reference number (tag: REFN).
    pub user_reference_number: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes-on-notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl NoteRecord {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        NoteRecord {
            xref,
            ..Default::default()
        }
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> NoteRecord {
        let mut record = NoteRecord::with_xref(node.xref().unwrap_or_default().to_string());
        record.text = node.continued_value();
        record.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "SOUR" => {
                record.citations.push(Citation::interpret(child, interp));
                true
            }
            "REFN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut record.user_reference_number, value);
                true
            }
            "RIN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut record.automated_record_id, value);
                true
            }
            _ => false,
        });
        record
    }
}
