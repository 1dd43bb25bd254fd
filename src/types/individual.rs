//! Individual records and their substructures.

use std::fmt;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::parser::{walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Citation, Event, EventDetail, MediaLink, Xref};

/// Individual event tags (GEDCOM 5.5.1 INDIVIDUAL_EVENT_STRUCTURE).
const EVENT_TAGS: [&str; 23] = [
    "ADOP", "BIRT", "BAPM", "BARM", "BASM", "BLES", "BURI", "CENS", "CHR", "CHRA", "CONF", "CREM",
    "DEAT", "EMIG", "FCOM", "GRAD", "IMMI", "NATU", "ORDN", "PROB", "RETI", "WILL", "EVEN",
];

/// Individual attribute tags (GEDCOM 5.5.1 INDIVIDUAL_ATTRIBUTE_STRUCTURE).
/// RESI sits here rather than with the events: it carries a value the way
/// attributes do.
const ATTRIBUTE_TAGS: [&str; 14] = [
    "CAST", "DSCR", "EDUC", "IDNO", "NATI", "NCHI", "NMR", "OCCU", "PROP", "RELI", "SSN", "TITL",
    "FACT", "RESI",
];

/// The sex recorded for an individual (tag: SEX).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Sex {
    /// `M`
    Male,
    /// `F`
    Female,
    /// `U`, missing, or unrecognized.
    #[default]
    Unknown,
}

impl Sex {
    fn interpret(node: &Node, interp: &mut Interp) -> Sex {
        match node.value().map(str::trim) {
            Some("M") => Sex::Male,
            Some("F") => Sex::Female,
            Some("U") | None => Sex::Unknown,
            Some(other) => {
                interp.warning(
                    Diagnostic::new(format!("unrecognized SEX value `{other}`"))
                        .at_line(node.number())
                        .with_tag("SEX"),
                );
                Sex::Unknown
            }
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Unknown => "Unknown",
        };
        write!(f, "{label}")
    }
}

/// A personal name (tag: NAME), with the slash-delimited surname kept as
/// written in `value` and the optional piece subtags broken out.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PersonalName {
    /// The whole name as written, e.g. `John /Doe/`.
    pub value: Option<String>,
    /// tag: GIVN
    pub given: Option<String>,
    /// tag: SURN
    pub surname: Option<String>,
    /// tag: NPFX
    pub prefix: Option<String>,
    /// tag: SPFX
    pub surname_prefix: Option<String>,
    /// tag: NSFX
    pub suffix: Option<String>,
    /// tag: NICK
    pub nickname: Option<String>,
    /// tag: TYPE
    pub name_type: Option<String>,
    /// Citations supporting the name.
    pub citations: Vec<Citation>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl PersonalName {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> PersonalName {
        let mut name = PersonalName {
            value: node.continued_value(),
            ..Default::default()
        };
        name.annotations = walk_children(node, interp, |tag, child, interp| {
            let slot = match tag {
                "GIVN" => &mut name.given,
                "SURN" => &mut name.surname,
                "NPFX" => &mut name.prefix,
                "SPFX" => &mut name.surname_prefix,
                "NSFX" => &mut name.suffix,
                "NICK" => &mut name.nickname,
                "TYPE" => &mut name.name_type,
                "SOUR" => {
                    name.citations.push(Citation::interpret(child, interp));
                    return true;
                }
                _ => return false,
            };
            let value = interp.value(child);
            interp.set_once(child, slot, value);
            true
        });
        name
    }

    /// The display form of the name with surname slashes removed.
    #[must_use]
    pub fn display(&self) -> Option<String> {
        let value = self.value.as_ref()?;
        let cleaned: String = value.chars().filter(|&c| c != '/').collect();
        let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }
}

/// Membership of an individual in a family (tags: FAMC, FAMS).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FamilyLink {
    /// The family record pointed to.
    pub xref: Xref,
    /// Pedigree linkage for FAMC (tag: PEDI): `birth`, `adopted`, ...
    pub pedigree: Option<String>,
    /// Child linkage status for FAMC (tag: STAT).
    pub status: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl FamilyLink {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> FamilyLink {
        let xref = node.value().unwrap_or_default().to_string();
        interp.pending_ref(node, RecordKind::Family, &xref);
        let mut link = FamilyLink {
            xref,
            ..Default::default()
        };
        link.annotations = walk_children(node, interp, |tag, child, interp| {
            let slot = match tag {
                "PEDI" => &mut link.pedigree,
                "STAT" => &mut link.status,
                _ => return false,
            };
            let value = interp.value(child);
            interp.set_once(child, slot, value);
            true
        });
        link
    }
}

/// An association with another individual (tag: ASSO).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Association {
    /// The associated individual.
    pub xref: Xref,
    /// The nature of the association (tag: RELA).
    pub relation: Option<String>,
    /// Citations supporting the association.
    pub citations: Vec<Citation>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Association {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Association {
        let xref = node.value().unwrap_or_default().to_string();
        interp.pending_ref(node, RecordKind::Individual, &xref);
        let mut association = Association {
            xref,
            ..Default::default()
        };
        association.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "RELA" => {
                let value = interp.value(child);
                interp.set_once(child, &mut association.relation, value);
                true
            }
            "SOUR" => {
                association
                    .citations
                    .push(Citation::interpret(child, interp));
                true
            }
            _ => false,
        });
        association
    }
}

/// An attribute of an individual (tags: OCCU, RESI, DSCR...): a fact with
/// a value, carrying the same detail cluster as an event.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// The attribute tag as written.
    pub attribute: String,
    /// The attribute's value, continuations applied.
    pub value: Option<String>,
    /// The shared detail cluster.
    pub detail: EventDetail,
}

impl Attribute {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Attribute {
        let mut attribute = Attribute {
            attribute: node.tag().to_string(),
            value: node.continued_value(),
            ..Default::default()
        };
        let annotations = walk_children(node, interp, |tag, child, interp| {
            attribute.detail.handle(tag, child, interp)
        });
        attribute.detail.annotations = annotations;
        attribute
    }
}

/// An individual record (level-0 tag: INDI).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Individual {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// Names, in input order; the first is the preferred one.
    pub names: Vec<PersonalName>,
    /// tag: SEX
    pub sex: Option<Sex>,
    /// Events, in input order, duplicates preserved.
    pub events: Vec<Event>,
    /// Attributes, in input order.
    pub attributes: Vec<Attribute>,
    /// Families this individual belongs to as a child (tag: FAMC).
    pub child_to_families: Vec<FamilyLink>,
    /// Families this individual belongs to as a spouse (tag: FAMS).
    pub spouse_to_families: Vec<FamilyLink>,
    /// Associations with other individuals (tag: ASSO).
    pub associations: Vec<Association>,
    /// Other records describing the same person (tag: ALIA).
    pub aliases: Vec<Xref>,
    /// Submitters interested in this person's ancestors (tag: ANCI).
    pub ancestor_interest: Vec<Xref>,
    /// Submitters interested in this person's descendants (tag: DESI).
    pub descendant_interest: Vec<Xref>,
    /// Submitters of this record (tag: SUBM).
    pub submitters: Vec<Xref>,
    /// Record-level citations.
    pub citations: Vec<Citation>,
    /// Record-level multimedia links.
    pub media: Vec<MediaLink>,
    /// Restriction notice (tag: RESN).
    pub restriction: Option<String>,
    /// Permanent record file number (tag: RFN).
    pub permanent_record_file_number: Option<String>,
    /// Ancestral File number (tag: AFN).
    pub ancestral_file_number: Option<String>,
    /// User reference number (tag: REFN).
    pub user_reference_number: Option<String>,
    /// User reference type (tag: TYPE under REFN).
    pub user_reference_type: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Individual {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        Individual {
            xref,
            ..Default::default()
        }
    }

    /// The display form of the preferred name.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.names.first()?.display()
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Individual {
        let mut indi = Individual::with_xref(node.xref().unwrap_or_default().to_string());
        indi.annotations = walk_children(node, interp, |tag, child, interp| {
            if EVENT_TAGS.contains(&tag) {
                indi.events.push(Event::interpret(child, interp));
                return true;
            }
            if ATTRIBUTE_TAGS.contains(&tag) {
                indi.attributes.push(Attribute::interpret(child, interp));
                return true;
            }
            match tag {
                "NAME" => indi.names.push(PersonalName::interpret(child, interp)),
                "SEX" => {
                    let value = Sex::interpret(child, interp);
                    interp.set_once(child, &mut indi.sex, Some(value));
                }
                "FAMC" => indi
                    .child_to_families
                    .push(FamilyLink::interpret(child, interp)),
                "FAMS" => indi
                    .spouse_to_families
                    .push(FamilyLink::interpret(child, interp)),
                "ASSO" => indi
                    .associations
                    .push(Association::interpret(child, interp)),
                "ALIA" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Individual, value);
                        indi.aliases.push(value.to_string());
                    }
                }
                "ANCI" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Submitter, value);
                        indi.ancestor_interest.push(value.to_string());
                    }
                }
                "DESI" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Submitter, value);
                        indi.descendant_interest.push(value.to_string());
                    }
                }
                "SUBM" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Submitter, value);
                        indi.submitters.push(value.to_string());
                    }
                }
                "SOUR" => indi.citations.push(Citation::interpret(child, interp)),
                "OBJE" => indi.media.push(MediaLink::interpret(child, interp)),
                "RESN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut indi.restriction, value);
                }
                "RFN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut indi.permanent_record_file_number, value);
                }
                "AFN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut indi.ancestral_file_number, value);
                }
                "REFN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut indi.user_reference_number, value);
                    for grandchild in &child.children {
                        if grandchild.tag() == "TYPE" {
                            indi.user_reference_type = grandchild.value().map(str::to_string);
                        }
                    }
                }
                "RIN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut indi.automated_record_id, value);
                }
                _ => return false,
            }
            true
        });
        indi
    }
}
