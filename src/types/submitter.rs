//! Submitter records.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp};
use crate::tree::Node;
use crate::types::{Address, Annotations, MediaLink, Xref};

/// A submitter record (level-0 tag: SUBM): the person or organization that
/// contributed the data. All records are attributed to the submitter named
/// in the header unless they name their own.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Submitter {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// The submitter's name (tag: NAME).
    pub name: Option<String>,
    /// Postal address.
    pub address: Option<Address>,
    /// Phone numbers (tag: PHON).
    pub phone: Vec<String>,
    /// Email addresses (tag: EMAIL).
    pub email: Vec<String>,
    /// Fax numbers (tag: FAX).
    pub fax: Vec<String>,
    /// Web addresses (tag: WWW).
    pub website: Vec<String>,
    /// Linked multimedia.
    pub media: Vec<MediaLink>,
    /// Language preferences, most preferred first (tag: LANG).
    pub languages: Vec<String>,
    /// Registered Ancestral File number (tag: RFN).
    pub registered_refn: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Submitter {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        Submitter {
            xref,
            ..Default::default()
        }
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Submitter {
        let mut subm = Submitter::with_xref(node.xref().unwrap_or_default().to_string());
        subm.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "NAME" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subm.name, value);
                true
            }
            "ADDR" => {
                let value = Address::interpret(child, interp);
                interp.set_once(child, &mut subm.address, Some(value));
                true
            }
            "PHON" => {
                if let Some(value) = interp.value(child) {
                    subm.phone.push(value);
                }
                true
            }
            "EMAIL" => {
                if let Some(value) = interp.value(child) {
                    subm.email.push(value);
                }
                true
            }
            "FAX" => {
                if let Some(value) = interp.value(child) {
                    subm.fax.push(value);
                }
                true
            }
            "WWW" => {
                if let Some(value) = interp.value(child) {
                    subm.website.push(value);
                }
                true
            }
            "OBJE" => {
                subm.media.push(MediaLink::interpret(child, interp));
                true
            }
            "LANG" => {
                if let Some(value) = interp.value(child) {
                    subm.languages.push(value);
                }
                true
            }
            "RFN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subm.registered_refn, value);
                true
            }
            "RIN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subm.automated_record_id, value);
                true
            }
            _ => false,
        });
        subm
    }
}
