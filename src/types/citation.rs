//! Source citations.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{is_xref, walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Date, MediaLink, Xref};

/// A citation (tag: SOUR below a record or structure).
///
/// Two payload forms exist: a pointer to a level-0 source record, or an
/// inline description for sources not kept as records. `xref` is set for
/// the pointer form, `description` for the inline form.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Citation {
    /// Pointer to a source record.
    pub xref: Option<Xref>,
    /// Inline source description, continuations applied.
    pub description: Option<String>,
    /// Where within the source (tag: PAGE).
    pub page: Option<String>,
    /// The event type the source records (tag: EVEN).
    pub event: Option<String>,
    /// The role of the cited person in that event (tag: ROLE).
    pub role: Option<String>,
    /// Data extracted from the source (tag: DATA).
    pub data: Option<CitationData>,
    /// Text quoted from the source, for the inline form (tag: TEXT).
    pub texts: Vec<String>,
    /// Certainty assessment 0-3 (tag: QUAY).
    pub quality: Option<i32>,
    /// Linked multimedia.
    pub media: Vec<MediaLink>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

/// The DATA substructure of a citation: when the source recorded the event
/// and what it said.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CitationData {
    /// Entry recording date (tag: DATE).
    pub date: Option<Date>,
    /// Text from the source document (tag: TEXT), one entry per TEXT tag.
    pub texts: Vec<String>,
}

impl Citation {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Citation {
        let mut citation = Citation::default();
        match node.value() {
            Some(value) if is_xref(value) => {
                citation.xref = Some(value.to_string());
                interp.pending_ref(node, RecordKind::Source, value);
            }
            _ => citation.description = node.continued_value(),
        }
        citation.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "PAGE" => {
                let value = interp.value(child);
                interp.set_once(child, &mut citation.page, value);
                true
            }
            "EVEN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut citation.event, value);
                for grandchild in &child.children {
                    if grandchild.tag() == "ROLE" {
                        citation.role = grandchild.value().map(str::to_string);
                    }
                }
                true
            }
            "DATA" => {
                let value = CitationData::interpret(child, interp);
                interp.set_once(child, &mut citation.data, Some(value));
                true
            }
            "TEXT" => {
                if let Some(text) = child.continued_value() {
                    citation.texts.push(text);
                }
                true
            }
            "QUAY" => {
                let value = interp.value_i32(child);
                interp.set_once(child, &mut citation.quality, value);
                true
            }
            "OBJE" => {
                citation.media.push(MediaLink::interpret(child, interp));
                true
            }
            _ => false,
        });
        citation
    }
}

impl CitationData {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> CitationData {
        let mut data = CitationData::default();
        walk_children(node, interp, |tag, child, interp| match tag {
            "DATE" => {
                let value = Date::interpret(child, interp);
                interp.set_once(child, &mut data.date, Some(value));
                true
            }
            "TEXT" => {
                if let Some(text) = child.continued_value() {
                    data.texts.push(text);
                }
                true
            }
            _ => false,
        });
        data
    }
}
