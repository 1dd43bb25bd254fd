//! Postal address structure.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp};
use crate::tree::Node;

/// An address block (tag: ADDR). The value plus CONT lines carry the
/// formatted address; the optional structured subtags break it down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Address {
    /// The formatted address text, continuations applied.
    pub value: Option<String>,
    /// tag: ADR1
    pub line1: Option<String>,
    /// tag: ADR2
    pub line2: Option<String>,
    /// tag: ADR3
    pub line3: Option<String>,
    /// tag: CITY
    pub city: Option<String>,
    /// tag: STAE
    pub state: Option<String>,
    /// tag: POST
    pub postal_code: Option<String>,
    /// tag: CTRY
    pub country: Option<String>,
}

impl Address {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Address {
        let mut address = Address {
            value: node.continued_value(),
            ..Default::default()
        };
        walk_children(node, interp, |tag, child, interp| {
            let slot = match tag {
                "ADR1" => &mut address.line1,
                "ADR2" => &mut address.line2,
                "ADR3" => &mut address.line3,
                "CITY" => &mut address.city,
                "STAE" => &mut address.state,
                "POST" => &mut address.postal_code,
                "CTRY" => &mut address.country,
                _ => return false,
            };
            let value = interp.value(child);
            interp.set_once(child, slot, value);
            true
        });
        address
    }
}
