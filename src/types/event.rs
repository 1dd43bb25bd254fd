//! Event and attribute detail structures.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Address, Annotations, Citation, Date, MediaLink, Place, Xref};

/// The detail cluster shared by every event and attribute: when, where,
/// who says so.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EventDetail {
    /// Classification of the event (tag: TYPE).
    pub event_type: Option<String>,
    /// When it happened (tag: DATE), raw string.
    pub date: Option<Date>,
    /// Where it happened (tag: PLAC).
    pub place: Option<Place>,
    /// Address associated with the event.
    pub address: Option<Address>,
    /// Phone numbers at that address (tag: PHON).
    pub phone: Vec<String>,
    /// Responsible agency (tag: AGNC).
    pub agency: Option<String>,
    /// Religious affiliation (tag: RELI).
    pub religion: Option<String>,
    /// Cause of the event (tag: CAUS).
    pub cause: Option<String>,
    /// Age of the principal at the event (tag: AGE), raw string.
    pub age: Option<String>,
    /// Restriction notice (tag: RESN).
    pub restriction: Option<String>,
    /// Supporting citations.
    pub citations: Vec<Citation>,
    /// Linked multimedia.
    pub media: Vec<MediaLink>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl EventDetail {
    /// Handles the detail tags common to events and attributes. Returns
    /// false for tags outside the shared cluster so callers can layer
    /// their own handling on top.
    pub(crate) fn handle(&mut self, tag: &str, child: &Node, interp: &mut Interp) -> bool {
        match tag {
            "TYPE" => {
                let value = interp.value(child);
                interp.set_once(child, &mut self.event_type, value);
            }
            "DATE" => {
                let value = Date::interpret(child, interp);
                interp.set_once(child, &mut self.date, Some(value));
            }
            "PLAC" => {
                let value = Place::interpret(child, interp);
                interp.set_once(child, &mut self.place, Some(value));
            }
            "ADDR" => {
                let value = Address::interpret(child, interp);
                interp.set_once(child, &mut self.address, Some(value));
            }
            "PHON" => {
                if let Some(value) = interp.value(child) {
                    self.phone.push(value);
                }
            }
            "AGNC" => {
                let value = interp.value(child);
                interp.set_once(child, &mut self.agency, value);
            }
            "RELI" => {
                let value = interp.value(child);
                interp.set_once(child, &mut self.religion, value);
            }
            "CAUS" => {
                let value = interp.value(child);
                interp.set_once(child, &mut self.cause, value);
            }
            "AGE" => {
                let value = interp.value(child);
                interp.set_once(child, &mut self.age, value);
            }
            "RESN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut self.restriction, value);
            }
            "SOUR" => self.citations.push(Citation::interpret(child, interp)),
            "OBJE" => self.media.push(MediaLink::interpret(child, interp)),
            _ => return false,
        }
        true
    }
}

/// One event on an individual or family (tags: BIRT, DEAT, MARR, EVEN...).
///
/// The tag is kept as written, so consumers can distinguish event kinds
/// without this crate enumerating them; duplicate events of the same kind
/// are preserved in input order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Event {
    /// The event tag (`BIRT`, `MARR`, ...).
    pub event: String,
    /// The line value: `Y` for bare assertions, or a descriptor for EVEN.
    pub value: Option<String>,
    /// Family link for birth-type events (tag: FAMC below BIRT/CHR/ADOP),
    /// with the ADOP qualifier for adoptions.
    pub family_xref: Option<Xref>,
    /// Which parent adopted (tag: ADOP below FAMC): `HUSB`, `WIFE`, `BOTH`.
    pub adopted_by: Option<String>,
    /// Age of the husband at a family event (tag: AGE below HUSB).
    pub husband_age: Option<String>,
    /// Age of the wife at a family event (tag: AGE below WIFE).
    pub wife_age: Option<String>,
    /// The shared detail cluster.
    pub detail: EventDetail,
}

impl Event {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Event {
        let mut event = Event {
            event: node.tag().to_string(),
            value: node.value().map(str::to_string),
            ..Default::default()
        };
        let annotations = walk_children(node, interp, |tag, child, interp| {
            if event.detail.handle(tag, child, interp) {
                return true;
            }
            match tag {
                "FAMC" => {
                    if let Some(value) = interp.value(child) {
                        interp.pending_ref(child, RecordKind::Family, &value);
                        event.family_xref = Some(value);
                    }
                    for grandchild in &child.children {
                        if grandchild.tag() == "ADOP" {
                            event.adopted_by = grandchild.value().map(str::to_string);
                        }
                    }
                    true
                }
                "HUSB" | "WIFE" => {
                    for grandchild in &child.children {
                        if grandchild.tag() == "AGE" {
                            let slot = if tag == "HUSB" {
                                &mut event.husband_age
                            } else {
                                &mut event.wife_age
                            };
                            *slot = grandchild.value().map(str::to_string);
                        }
                    }
                    true
                }
                _ => false,
            }
        });
        event.detail.annotations = annotations;
        event
    }
}
