//! Place structure.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp};
use crate::tree::Node;
use crate::types::{Citation, Note};

/// A place name (tag: PLAC), as a jurisdiction list string.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Place {
    /// The place text, most-specific jurisdiction first.
    pub value: Option<String>,
    /// Override of the header's place hierarchy (tag: FORM).
    pub form: Option<String>,
    /// Citations supporting the place.
    pub citations: Vec<Citation>,
    /// Notes on the place.
    pub notes: Vec<Note>,
}

impl Place {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Place {
        let mut place = Place {
            value: node.value().map(str::to_string),
            ..Default::default()
        };
        let extras = walk_children(node, interp, |tag, child, interp| match tag {
            "FORM" => {
                let value = interp.value(child);
                interp.set_once(child, &mut place.form, value);
                true
            }
            "SOUR" => {
                place.citations.push(Citation::interpret(child, interp));
                true
            }
            _ => false,
        });
        place.notes = extras.notes;
        place
    }
}
