//! Multimedia records and links.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{is_xref, walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Citation, Xref};

/// One referenced media file (tag: FILE) with its format qualifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct MultimediaFile {
    /// The file reference (path or URL).
    pub file: Option<String>,
    /// The file format (tag: FORM), e.g. `jpeg`.
    pub format: Option<String>,
    /// The source media type (tag: MEDI or TYPE under FORM).
    pub media_type: Option<String>,
    /// A title for this file (tag: TITL).
    pub title: Option<String>,
}

impl MultimediaFile {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> MultimediaFile {
        let mut file = MultimediaFile {
            file: node.value().map(str::to_string),
            ..Default::default()
        };
        walk_children(node, interp, |tag, child, interp| match tag {
            "FORM" => {
                let value = interp.value(child);
                interp.set_once(child, &mut file.format, value);
                for grandchild in &child.children {
                    if matches!(grandchild.tag(), "MEDI" | "TYPE") {
                        file.media_type = grandchild.value().map(str::to_string);
                    }
                }
                true
            }
            "TITL" => {
                let value = interp.value(child);
                interp.set_once(child, &mut file.title, value);
                true
            }
            _ => false,
        });
        file
    }
}

/// A multimedia record (level-0 tag: OBJE).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Multimedia {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// The referenced files, in input order.
    pub files: Vec<MultimediaFile>,
    /// A record-level title (5.5-style TITL).
    pub title: Option<String>,
    /// A record-level format (5.5-style FORM).
    pub format: Option<String>,
    /// Source citations for the media.
    pub citations: Vec<Citation>,
    /// User reference number (tag: REFN).
    pub user_reference_number: Option<String>,
    /// User reference type (tag: TYPE under REFN).
    pub user_reference_type: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Multimedia {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        Multimedia {
            xref,
            ..Default::default()
        }
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Multimedia {
        let mut media = Multimedia::with_xref(node.xref().unwrap_or_default().to_string());
        media.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "FILE" => {
                media.files.push(MultimediaFile::interpret(child, interp));
                true
            }
            "TITL" => {
                let value = interp.value(child);
                interp.set_once(child, &mut media.title, value);
                true
            }
            "FORM" => {
                let value = interp.value(child);
                interp.set_once(child, &mut media.format, value);
                true
            }
            "SOUR" => {
                media.citations.push(Citation::interpret(child, interp));
                true
            }
            "REFN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut media.user_reference_number, value);
                for grandchild in &child.children {
                    if grandchild.tag() == "TYPE" {
                        media.user_reference_type = grandchild.value().map(str::to_string);
                    }
                }
                true
            }
            "RIN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut media.automated_record_id, value);
                true
            }
            _ => false,
        });
        media
    }
}

/// A multimedia link below another structure (tag: OBJE), either a pointer
/// to a [`Multimedia`] record or an inline file list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct MediaLink {
    /// Pointer to a multimedia record, when the payload was an xref.
    pub xref: Option<Xref>,
    /// Inline files, for the linked form without a record.
    pub files: Vec<MultimediaFile>,
    /// A title for the linked media (tag: TITL).
    pub title: Option<String>,
}

impl MediaLink {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> MediaLink {
        let mut link = MediaLink::default();
        if let Some(value) = node.value() {
            if is_xref(value) {
                link.xref = Some(value.to_string());
                interp.pending_ref(node, RecordKind::Multimedia, value);
                return link;
            }
        }
        walk_children(node, interp, |tag, child, interp| match tag {
            "FILE" => {
                link.files.push(MultimediaFile::interpret(child, interp));
                true
            }
            "TITL" => {
                let value = interp.value(child);
                interp.set_once(child, &mut link.title, value);
                true
            }
            _ => false,
        });
        link
    }
}
