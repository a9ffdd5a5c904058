//! The trigger table: literal text values that expand a node into slots.
//!
//! Rule data is kept separate from the control flow that applies it; the
//! editor consults [`expansion_for`] once per text assignment, matching the
//! raw (pre-normalization) input exactly.

use crate::kind::NodeKind;

/// Trigger strings and the slot variants each one produces, in order.
pub const TRIGGERS: &[(&str, &[NodeKind])] = &[
    ("def ", &[NodeKind::Identifier, NodeKind::Params]),
    ("class ", &[NodeKind::Constant]),
];

/// The slot variants to expand into when `raw` is exactly a trigger string.
///
/// The empty string is deliberately absent: it means "delete past the last
/// character" and is handled as back-navigation, not expansion.
pub fn expansion_for(raw: &str) -> Option<&'static [NodeKind]> {
    TRIGGERS
        .iter()
        .find(|(trigger, _)| *trigger == raw)
        .map(|(_, kinds)| *kinds)
}
