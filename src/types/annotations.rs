//! The annotation cluster every record carries.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::types::{ChangeDate, CustomFact, Note};

/// Notes, last-change date, and preserved unknown tags: the cluster common
/// to every GEDCOM record, embedded by value rather than inherited.
///
/// [`crate::parser`]'s child walker fills this automatically: `NOTE` and
/// `CHAN` children and unrecognized tags never need per-record handling.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Annotations {
    /// Notes attached to the owner, inline or by reference, in input order.
    pub notes: Vec<Note>,
    /// Date of the last change to the owning record (tag: CHAN).
    pub change_date: Option<ChangeDate>,
    /// User-defined and unrecognized subtrees, in input order.
    pub custom_facts: Vec<CustomFact>,
}

impl Annotations {
    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.change_date.is_none() && self.custom_facts.is_empty()
    }
}
