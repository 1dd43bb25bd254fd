//! Source records.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{is_xref, walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Date, MediaLink, Place, Xref};

/// An event class covered by a source (tag: EVEN below DATA).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceDataEvent {
    /// Comma-separated event types, as written.
    pub events: Option<String>,
    /// Period covered (tag: DATE).
    pub date: Option<Date>,
    /// Jurisdiction covered (tag: PLAC).
    pub place: Option<Place>,
}

/// What a source contains (tag: DATA on a source record).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceData {
    /// Covered event classes, in input order.
    pub events: Vec<SourceDataEvent>,
    /// Responsible agency (tag: AGNC).
    pub agency: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl SourceData {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> SourceData {
        let mut data = SourceData::default();
        data.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "EVEN" => {
                let mut event = SourceDataEvent {
                    events: child.value().map(str::to_string),
                    ..Default::default()
                };
                walk_children(child, interp, |tag, grandchild, interp| match tag {
                    "DATE" => {
                        let value = Date::interpret(grandchild, interp);
                        interp.set_once(grandchild, &mut event.date, Some(value));
                        true
                    }
                    "PLAC" => {
                        let value = Place::interpret(grandchild, interp);
                        interp.set_once(grandchild, &mut event.place, Some(value));
                        true
                    }
                    _ => false,
                });
                data.events.push(event);
                true
            }
            "AGNC" => {
                let value = interp.value(child);
                interp.set_once(child, &mut data.agency, value);
                true
            }
            _ => false,
        });
        data
    }
}

/// A source's call number within a repository (tag: CALN).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CallNumber {
    /// The call number itself.
    pub value: Option<String>,
    /// The medium it identifies (tag: MEDI).
    pub media_type: Option<String>,
}

/// A link from a source to the repository holding it (tag: REPO).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct RepoCitation {
    /// The repository record pointed to, when one was given.
    pub xref: Option<Xref>,
    /// Call numbers within that repository, in input order.
    pub call_numbers: Vec<CallNumber>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl RepoCitation {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> RepoCitation {
        let mut citation = RepoCitation::default();
        if let Some(value) = node.value() {
            if is_xref(value) {
                citation.xref = Some(value.to_string());
                interp.pending_ref(node, RecordKind::Repository, value);
            }
        }
        citation.annotations = walk_children(node, interp, |tag, child, _interp| match tag {
            "CALN" => {
                let mut call = CallNumber {
                    value: child.value().map(str::to_string),
                    media_type: None,
                };
                for grandchild in &child.children {
                    if grandchild.tag() == "MEDI" {
                        call.media_type = grandchild.value().map(str::to_string);
                    }
                }
                citation.call_numbers.push(call);
                true
            }
            _ => false,
        });
        citation
    }
}

/// A source record (level-0 tag: SOUR): a book, document, census, or other
/// origin of facts.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Source {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// What the source contains (tag: DATA).
    pub data: Option<SourceData>,
    /// Who created it (tag: AUTH).
    pub originator: Option<String>,
    /// The source title (tag: TITL), continuations applied.
    pub title: Option<String>,
    /// Short title for filing (tag: ABBR).
    pub abbreviation: Option<String>,
    /// Publication facts (tag: PUBL).
    pub publication: Option<String>,
    /// Verbatim text from the source (tag: TEXT).
    pub text: Option<String>,
    /// The repository holding the source (tag: REPO).
    pub repo_citation: Option<RepoCitation>,
    /// Linked multimedia.
    pub media: Vec<MediaLink>,
    /// User reference number (tag: REFN).
    pub user_reference_number: Option<String>,
    /// User reference type (tag: TYPE under REFN).
    pub user_reference_type: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Source {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        Source {
            xref,
            ..Default::default()
        }
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Source {
        let mut source = Source::with_xref(node.xref().unwrap_or_default().to_string());
        source.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "DATA" => {
                let value = SourceData::interpret(child, interp);
                interp.set_once(child, &mut source.data, Some(value));
                true
            }
            "AUTH" => {
                let value = child.continued_value();
                interp.set_once(child, &mut source.originator, value);
                true
            }
            "TITL" => {
                let value = child.continued_value();
                interp.set_once(child, &mut source.title, value);
                true
            }
            "ABBR" => {
                let value = interp.value(child);
                interp.set_once(child, &mut source.abbreviation, value);
                true
            }
            "PUBL" => {
                let value = child.continued_value();
                interp.set_once(child, &mut source.publication, value);
                true
            }
            "TEXT" => {
                let value = child.continued_value();
                interp.set_once(child, &mut source.text, value);
                true
            }
            "REPO" => {
                let value = RepoCitation::interpret(child, interp);
                interp.set_once(child, &mut source.repo_citation, Some(value));
                true
            }
            "OBJE" => {
                source.media.push(MediaLink::interpret(child, interp));
                true
            }
            "REFN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut source.user_reference_number, value);
                for grandchild in &child.children {
                    if grandchild.tag() == "TYPE" {
                        source.user_reference_type = grandchild.value().map(str::to_string);
                    }
                }
                true
            }
            "RIN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut source.automated_record_id, value);
                true
            }
            _ => false,
        });
        source
    }
}
