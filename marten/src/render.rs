//! Draw-intent production.
//!
//! The core never paints: a render pass walks the tree depth-first,
//! left-to-right, and emits one [`DrawRecord`] per reachable node. The host
//! resolves each record's [`ColorKey`] against the settings color map and
//! turns the records into pixels.

use crate::node::{NodeId, NodeTree};
use marten_config::{ColorKey, FontSpec};

/// Monospace text measurement derived from the configured font.
///
/// Font rasterization is a host concern, so extents are approximated from
/// the point size alone: a Courier-like advance of 0.6 em and a line height
/// of 4/3 em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance per character, in pixels.
    pub advance: f32,
    /// Height of a single text line, in pixels.
    pub line_height: f32,
}

impl TextMetrics {
    pub fn of(font: &FontSpec) -> Self {
        Self {
            advance: font.size * 0.6,
            line_height: font.size * (4.0 / 3.0),
        }
    }

    /// Width and height of a single line of text, margins excluded.
    pub fn measure(&self, text: &str) -> (f32, f32) {
        (
            text.chars().count() as f32 * self.advance,
            self.line_height,
        )
    }
}

/// One draw intent: a node's text, color, placement, and focus flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub text: String,
    pub color: ColorKey,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Exactly one record per pass carries `true`.
    pub is_active: bool,
}

/// Walk the subtree at `id`, appending one record per node.
///
/// Slots and children are placed immediately to the right of their node,
/// top-aligned, advancing by each sibling's own width.
pub(crate) fn walk(
    tree: &NodeTree,
    id: NodeId,
    active: NodeId,
    x: f32,
    y: f32,
    out: &mut Vec<DrawRecord>,
) {
    let Some(node) = tree.get(id) else { return };

    out.push(DrawRecord {
        text: node.text.to_string(),
        color: node.kind.color(),
        x,
        y,
        width: node.size.width,
        height: node.size.height,
        is_active: id == active,
    });

    let mut cursor = x + node.size.width;
    for &slot in &node.slots {
        walk(tree, slot, active, cursor, y, out);
        cursor += tree.get(slot).map_or(0.0, |slot| slot.size.width);
    }
    for &child in &node.children {
        walk(tree, child, active, cursor, y, out);
        cursor += tree.get(child).map_or(0.0, |child| child.size.width);
    }
}
