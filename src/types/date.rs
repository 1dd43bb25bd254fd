//! Date payloads, stored verbatim.
//!
//! Interpretation of GEDCOM date strings (calendars, ranges, approximations)
//! belongs to an external collaborator; the parser only carries the raw
//! text through.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp};
use crate::tree::Node;
use crate::types::Note;

/// A date value (tag: DATE), optionally qualified with a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Date {
    /// The raw date string, exactly as written.
    pub value: Option<String>,
    /// The raw time string (tag: TIME), exactly as written.
    pub time: Option<String>,
}

impl Date {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Date {
        let mut date = Date {
            value: node.value().map(str::to_string),
            time: None,
        };
        walk_children(node, interp, |tag, child, interp| match tag {
            "TIME" => {
                let value = interp.value(child);
                interp.set_once(child, &mut date.time, value);
                true
            }
            _ => false,
        });
        date
    }
}

/// The last-change marker on a record (tag: CHAN).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ChangeDate {
    /// When the record last changed.
    pub date: Option<Date>,
    /// Notes about the change.
    pub notes: Vec<Note>,
}

impl ChangeDate {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> ChangeDate {
        let mut change = ChangeDate::default();
        let extras = walk_children(node, interp, |tag, child, interp| match tag {
            "DATE" => {
                let value = Date::interpret(child, interp);
                interp.set_once(child, &mut change.date, Some(value));
                true
            }
            _ => false,
        });
        change.notes = extras.notes;
        change
    }
}
