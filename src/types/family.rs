//! Family records.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Citation, Event, MediaLink, Xref};

/// Family event tags (GEDCOM 5.5.1 FAMILY_EVENT_STRUCTURE).
const EVENT_TAGS: [&str; 13] = [
    "ANUL", "CENS", "DIV", "DIVF", "ENGA", "MARB", "MARC", "MARR", "MARL", "MARS", "RESI", "EVEN",
    "SEP",
];

/// A family record (level-0 tag: FAM), linking partners and children.
///
/// HUSB and WIFE are kept as the pointers they are; no validation of the
/// referenced individuals' sex is done on parse.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Family {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// tag: HUSB
    pub husband: Option<Xref>,
    /// tag: WIFE
    pub wife: Option<Xref>,
    /// tag: CHIL, in input order.
    pub children: Vec<Xref>,
    /// Count of children (tag: NCHI), when stated.
    pub num_children: Option<i32>,
    /// Family events, in input order, duplicates preserved.
    pub events: Vec<Event>,
    /// Submitters of this record (tag: SUBM).
    pub submitters: Vec<Xref>,
    /// Record-level citations.
    pub citations: Vec<Citation>,
    /// Record-level multimedia links.
    pub media: Vec<MediaLink>,
    /// Restriction notice (tag: RESN).
    pub restriction: Option<String>,
    /// User reference number (tag: REFN).
    pub user_reference_number: Option<String>,
    /// User reference type (tag: TYPE under REFN).
    pub user_reference_type: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Family {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        Family {
            xref,
            ..Default::default()
        }
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Family {
        let mut family = Family::with_xref(node.xref().unwrap_or_default().to_string());
        family.annotations = walk_children(node, interp, |tag, child, interp| {
            if EVENT_TAGS.contains(&tag) {
                family.events.push(Event::interpret(child, interp));
                return true;
            }
            match tag {
                "HUSB" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Individual, value);
                        let value = value.to_string();
                        interp.set_once(child, &mut family.husband, Some(value));
                    }
                }
                "WIFE" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Individual, value);
                        let value = value.to_string();
                        interp.set_once(child, &mut family.wife, Some(value));
                    }
                }
                "CHIL" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Individual, value);
                        family.children.push(value.to_string());
                    }
                }
                "NCHI" => {
                    let value = interp.value_i32(child);
                    interp.set_once(child, &mut family.num_children, value);
                }
                "SUBM" => {
                    if let Some(value) = child.value() {
                        interp.pending_ref(child, RecordKind::Submitter, value);
                        family.submitters.push(value.to_string());
                    }
                }
                "SOUR" => family.citations.push(Citation::interpret(child, interp)),
                "OBJE" => family.media.push(MediaLink::interpret(child, interp)),
                "RESN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut family.restriction, value);
                }
                "REFN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut family.user_reference_number, value);
                    for grandchild in &child.children {
                        if grandchild.tag() == "TYPE" {
                            family.user_reference_type = grandchild.value().map(str::to_string);
                        }
                    }
                }
                "RIN" => {
                    let value = interp.value(child);
                    interp.set_once(child, &mut family.automated_record_id, value);
                }
                _ => return false,
            }
            true
        });
        family
    }
}
