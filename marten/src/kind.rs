//! Node variants and their behavior table.
//!
//! Variants form a closed set, so behavior is dispatched through plain
//! `match` arms rather than trait objects: each variant maps to a
//! normalization rule and a display color key.

use crate::case;
use marten_config::ColorKey;

/// The fixed category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Freeform fragment text; the only variant eligible for structural
    /// expansion via the trigger table.
    Generic,
    /// Function and slot names, normalized to `lower_underscore` form.
    Identifier,
    /// Class names, normalized to `UpperCamel` form.
    Constant,
    /// Parameter list placeholder; pinned to the literal `"()"`.
    Params,
}

impl NodeKind {
    /// Applies this variant's normalization rule to raw input.
    ///
    /// Every rule strips leading and trailing whitespace, and re-applying a
    /// rule to its own output is a no-op.
    pub fn normalize(self, raw: &str) -> String {
        match self {
            NodeKind::Generic => raw.trim().to_string(),
            NodeKind::Identifier => case::underscore(raw),
            NodeKind::Constant => case::camelize(raw),
            NodeKind::Params => "()".to_string(),
        }
    }

    /// The symbolic color this variant is drawn with.
    pub fn color(self) -> ColorKey {
        match self {
            NodeKind::Generic | NodeKind::Params => ColorKey::Default,
            NodeKind::Identifier => ColorKey::Identifier,
            NodeKind::Constant => ColorKey::Constant,
        }
    }

    /// Whether text on this variant is matched against the trigger table.
    pub fn expands(self) -> bool {
        matches!(self, NodeKind::Generic)
    }
}
