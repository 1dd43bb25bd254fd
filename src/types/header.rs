//! The header pseudo-record.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Address, Annotations, Date, Xref};

/// The business producing the transmitting system (tag: CORP).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Corporation {
    /// The corporation's name.
    pub name: Option<String>,
    /// Postal address.
    pub address: Option<Address>,
    /// Phone numbers (tag: PHON), in input order.
    pub phone: Vec<String>,
    /// Email addresses (tag: EMAIL).
    pub email: Vec<String>,
    /// Fax numbers (tag: FAX).
    pub fax: Vec<String>,
    /// Web addresses (tag: WWW).
    pub website: Vec<String>,
}

impl Corporation {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Corporation {
        let mut corp = Corporation {
            name: node.value().map(str::to_string),
            ..Default::default()
        };
        walk_children(node, interp, |tag, child, interp| match tag {
            "ADDR" => {
                let value = Address::interpret(child, interp);
                interp.set_once(child, &mut corp.address, Some(value));
                true
            }
            "PHON" => {
                if let Some(value) = interp.value(child) {
                    corp.phone.push(value);
                }
                true
            }
            "EMAIL" => {
                if let Some(value) = interp.value(child) {
                    corp.email.push(value);
                }
                true
            }
            "FAX" => {
                if let Some(value) = interp.value(child) {
                    corp.fax.push(value);
                }
                true
            }
            "WWW" => {
                if let Some(value) = interp.value(child) {
                    corp.website.push(value);
                }
                true
            }
            _ => false,
        });
        corp
    }
}

/// Facts about the data the source system drew on (tag: DATA below
/// HEAD.SOUR).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct HeadSourceData {
    /// Name of the originating data collection.
    pub name: Option<String>,
    /// Publication date of that collection (tag: DATE).
    pub date: Option<Date>,
    /// Copyright statement of that collection (tag: COPR).
    pub copyright: Option<String>,
}

/// The system that produced the file (tag: SOUR below HEAD).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceSystem {
    /// The registered system identifier (the SOUR line value).
    pub system_id: Option<String>,
    /// The product version (tag: VERS).
    pub version: Option<String>,
    /// The product name (tag: NAME).
    pub name: Option<String>,
    /// The producing business (tag: CORP).
    pub corporation: Option<Corporation>,
    /// The data collection the system drew on (tag: DATA).
    pub data: Option<HeadSourceData>,
}

impl SourceSystem {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> SourceSystem {
        let mut system = SourceSystem {
            system_id: node.value().map(str::to_string),
            ..Default::default()
        };
        walk_children(node, interp, |tag, child, interp| match tag {
            "VERS" => {
                let value = interp.value(child);
                interp.set_once(child, &mut system.version, value);
                true
            }
            "NAME" => {
                let value = interp.value(child);
                interp.set_once(child, &mut system.name, value);
                true
            }
            "CORP" => {
                let value = Corporation::interpret(child, interp);
                interp.set_once(child, &mut system.corporation, Some(value));
                true
            }
            "DATA" => {
                let mut data = HeadSourceData {
                    name: child.value().map(str::to_string),
                    ..Default::default()
                };
                walk_children(child, interp, |tag, grandchild, interp| match tag {
                    "DATE" => {
                        let value = Date::interpret(grandchild, interp);
                        interp.set_once(grandchild, &mut data.date, Some(value));
                        true
                    }
                    "COPR" => {
                        let value = grandchild.continued_value();
                        interp.set_once(grandchild, &mut data.copyright, value);
                        true
                    }
                    _ => false,
                });
                interp.set_once(child, &mut system.data, Some(data));
                true
            }
            _ => false,
        });
        system
    }
}

/// The GEDCOM specification the file claims to follow (tag: GEDC).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct GedcomMeta {
    /// The version number (tag: VERS), e.g. `5.5.1`.
    pub version: Option<String>,
    /// The transmission form (tag: FORM), normally `LINEAGE-LINKED`.
    pub form: Option<String>,
}

/// The declared character set (tag: CHAR). Detection has already happened
/// by the time this is populated; the declared value is kept for
/// inspection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CharacterSet {
    /// The declared set, e.g. `ANSEL`.
    pub value: Option<String>,
    /// The declared version of that set (tag: VERS).
    pub version: Option<String>,
}

/// The header (tag: HEAD), carrying metadata about the whole file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Header {
    /// The producing system (tag: SOUR).
    pub source_system: Option<SourceSystem>,
    /// The intended receiving system (tag: DEST).
    pub destination: Option<String>,
    /// When the file was created (tag: DATE, with TIME below).
    pub date: Option<Date>,
    /// Pointer to the file's submitter record (tag: SUBM).
    pub submitter: Option<Xref>,
    /// Pointer to the submission record (tag: SUBN).
    pub submission: Option<Xref>,
    /// The transmission file name (tag: FILE).
    pub file_name: Option<String>,
    /// Copyright statement for the data (tag: COPR).
    pub copyright: Option<String>,
    /// The claimed specification (tag: GEDC).
    pub gedcom: Option<GedcomMeta>,
    /// The declared character set (tag: CHAR).
    pub character_set: Option<CharacterSet>,
    /// The primary language of the data (tag: LANG).
    pub language: Option<String>,
    /// Default place hierarchy (tag: PLAC with FORM below).
    pub place_hierarchy: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Header {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Header {
        let mut header = Header::default();
        header.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "SOUR" => {
                let value = SourceSystem::interpret(child, interp);
                interp.set_once(child, &mut header.source_system, Some(value));
                true
            }
            "DEST" => {
                let value = interp.value(child);
                interp.set_once(child, &mut header.destination, value);
                true
            }
            "DATE" => {
                let value = Date::interpret(child, interp);
                interp.set_once(child, &mut header.date, Some(value));
                true
            }
            "SUBM" => {
                if let Some(value) = child.value() {
                    interp.pending_ref(child, RecordKind::Submitter, value);
                    let value = value.to_string();
                    interp.set_once(child, &mut header.submitter, Some(value));
                }
                true
            }
            "SUBN" => {
                if let Some(value) = child.value() {
                    interp.pending_ref(child, RecordKind::Submission, value);
                    let value = value.to_string();
                    interp.set_once(child, &mut header.submission, Some(value));
                }
                true
            }
            "FILE" => {
                let value = interp.value(child);
                interp.set_once(child, &mut header.file_name, value);
                true
            }
            "COPR" => {
                let value = child.continued_value();
                interp.set_once(child, &mut header.copyright, value);
                true
            }
            "GEDC" => {
                let mut meta = GedcomMeta::default();
                walk_children(child, interp, |tag, grandchild, interp| {
                    let slot = match tag {
                        "VERS" => &mut meta.version,
                        "FORM" => &mut meta.form,
                        _ => return false,
                    };
                    let value = interp.value(grandchild);
                    interp.set_once(grandchild, slot, value);
                    true
                });
                interp.set_once(child, &mut header.gedcom, Some(meta));
                true
            }
            "CHAR" => {
                let mut charset = CharacterSet {
                    value: child.value().map(str::to_string),
                    version: None,
                };
                for grandchild in &child.children {
                    if grandchild.tag() == "VERS" {
                        charset.version = grandchild.value().map(str::to_string);
                    }
                }
                interp.set_once(child, &mut header.character_set, Some(charset));
                true
            }
            "LANG" => {
                let value = interp.value(child);
                interp.set_once(child, &mut header.language, value);
                true
            }
            "PLAC" => {
                for grandchild in &child.children {
                    if grandchild.tag() == "FORM" {
                        header.place_hierarchy = grandchild.value().map(str::to_string);
                    }
                }
                true
            }
            _ => false,
        });
        header
    }

    /// The claimed GEDCOM version string, when present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.gedcom.as_ref()?.version.as_deref()
    }
}
