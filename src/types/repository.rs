//! Repository records.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp};
use crate::tree::Node;
use crate::types::{Address, Annotations, Xref};

/// A repository record (level-0 tag: REPO): an archive, library, or other
/// holder of sources.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Repository {
    /// The record's cross-reference identifier.
    pub xref: Xref,
    /// The repository's name (tag: NAME).
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
    /// User reference number (tag: REFN).
    pub user_reference_number: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Repository {
    pub(crate) fn with_xref(xref: Xref) -> Self {
        Repository {
            xref,
            ..Default::default()
        }
    }

    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Repository {
        let mut repo = Repository::with_xref(node.xref().unwrap_or_default().to_string());
        repo.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "NAME" => {
                let value = interp.value(child);
                interp.set_once(child, &mut repo.name, value);
                true
            }
            "ADDR" => {
                let value = Address::interpret(child, interp);
                interp.set_once(child, &mut repo.address, Some(value));
                true
            }
            "PHON" => {
                if let Some(value) = interp.value(child) {
                    repo.phone.push(value);
                }
                true
            }
            "EMAIL" => {
                if let Some(value) = interp.value(child) {
                    repo.email.push(value);
                }
                true
            }
            "FAX" => {
                if let Some(value) = interp.value(child) {
                    repo.fax.push(value);
                }
                true
            }
            "WWW" => {
                if let Some(value) = interp.value(child) {
                    repo.website.push(value);
                }
                true
            }
            "REFN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut repo.user_reference_number, value);
                true
            }
            "RIN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut repo.automated_record_id, value);
                true
            }
            _ => false,
        });
        repo
    }
}
