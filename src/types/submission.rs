//! Submission records.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::parser::{walk_children, Interp, RecordKind};
use crate::tree::Node;
use crate::types::{Annotations, Xref};

/// The submission record (level-0 tag: SUBN), describing a transmission to
/// the Family History System. At most one per file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Submission {
    /// The record's cross-reference identifier, when present.
    pub xref: Option<Xref>,
    /// The responsible submitter (tag: SUBM).
    pub submitter: Option<Xref>,
    /// Name of the family file (tag: FAMF).
    pub family_file: Option<String>,
    /// Temple code (tag: TEMP).
    pub temple_code: Option<String>,
    /// Generations of ancestors in the transmission (tag: ANCE).
    pub ancestor_generations: Option<i32>,
    /// Generations of descendants in the transmission (tag: DESC).
    pub descendant_generations: Option<i32>,
    /// Ordinance process flag (tag: ORDI), `yes` or `no`.
    pub ordinance_flag: Option<String>,
    /// Automated record id (tag: RIN).
    pub automated_record_id: Option<String>,
    /// Notes, change date, and preserved unknown tags.
    pub annotations: Annotations,
}

impl Submission {
    pub(crate) fn interpret(node: &Node, interp: &mut Interp) -> Submission {
        let mut subn = Submission {
            xref: node.xref().map(str::to_string),
            ..Default::default()
        };
        subn.annotations = walk_children(node, interp, |tag, child, interp| match tag {
            "SUBM" => {
                if let Some(value) = child.value() {
                    interp.pending_ref(child, RecordKind::Submitter, value);
                    let value = value.to_string();
                    interp.set_once(child, &mut subn.submitter, Some(value));
                }
                true
            }
            "FAMF" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subn.family_file, value);
                true
            }
            "TEMP" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subn.temple_code, value);
                true
            }
            "ANCE" => {
                let value = interp.value_i32(child);
                interp.set_once(child, &mut subn.ancestor_generations, value);
                true
            }
            "DESC" => {
                let value = interp.value_i32(child);
                interp.set_once(child, &mut subn.descendant_generations, value);
                true
            }
            "ORDI" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subn.ordinance_flag, value);
                true
            }
            "RIN" => {
                let value = interp.value(child);
                interp.set_once(child, &mut subn.automated_record_id, value);
                true
            }
            _ => false,
        });
        subn
    }
}
