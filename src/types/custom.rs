//! User-defined and otherwise unrecognized tag data.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::tree::Node;
use crate::types::Xref;

/// A subtree the interpreter had no schema for: either a `_`-prefixed
/// user-defined tag, or a standard-looking tag in a position this reader
/// does not model. The whole subtree is preserved verbatim so no
/// information is lost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CustomFact {
    /// The tag as it appeared in the file.
    pub tag: String,
    /// The line value, with CONT/CONC continuations applied.
    pub value: Option<String>,
    /// The cross-reference identifier, for level-0 custom records.
    pub xref: Option<Xref>,
    /// Nested facts, in input order.
    pub children: Vec<CustomFact>,
}

impl CustomFact {
    pub(crate) fn interpret(node: &Node) -> CustomFact {
        CustomFact {
            tag: node.tag().to_string(),
            value: node.continued_value(),
            xref: node.xref().map(str::to_string),
            children: node
                .children
                .iter()
                .filter(|child| !matches!(child.tag(), "CONT" | "CONC"))
                .map(CustomFact::interpret)
                .collect(),
        }
    }
}
