//! Arena-backed node table for the fragment tree.
//!
//! All nodes live in a [`NodeTree`] and refer to each other by [`NodeId`],
//! so ownership stays strictly tree-shaped: parents own their slots and
//! children through id lists, and the parent back-reference is a query, not
//! an owning link. Subtrees detached by a structural edit are released from
//! the table eagerly.

use crate::kind::NodeKind;
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Unique identifier for a node in a [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// Cached bounding-box extent of a node, margins included.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// A fragment of structured text.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique id of this node.
    pub id: NodeId,
    /// The variant of this node, fixed at creation.
    pub kind: NodeKind,
    /// Normalized text content, transform applied per variant.
    pub text: CompactString,
    /// Enclosing node, `None` for the root. Never reassigned after creation.
    pub parent: Option<NodeId>,
    /// Ordered regular children, for nested composition.
    pub children: SmallVec<[NodeId; 2]>,
    /// Ordered slot nodes created by a trigger match; mandatory structural
    /// placeholders (e.g. a function's name and parameter list).
    pub slots: SmallVec<[NodeId; 2]>,
    /// Which slot last held or returned focus; `None` when no slot is
    /// focused. `Some(i)` is always in bounds of `slots`.
    pub slot_pos: Option<usize>,
    /// Cached extent, recomputed whenever `text` changes.
    pub size: Size,
}

/// Flat node table with all nodes stored in a vector.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    /// Maps NodeId to index in `nodes` for fast lookup.
    index: FxHashMap<NodeId, usize>,
    next_id: u64,
}

impl NodeTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh leaf node of the given kind.
    ///
    /// The node starts with empty text, no parent, and no slots; callers
    /// wire it into the tree afterwards.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let node = Node {
            id,
            kind,
            text: CompactString::default(),
            parent: None,
            children: SmallVec::new(),
            slots: SmallVec::new(),
            slot_pos: None,
            size: Size::default(),
        };

        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).and_then(|&idx| self.nodes.get(idx))
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.index
            .get(&id)
            .and_then(|&idx| self.nodes.get_mut(idx))
    }

    /// Whether the table still holds the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all live nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Release a node and everything reachable through its slots and
    /// children.
    ///
    /// Detached subtrees are unreachable from the root; releasing them keeps
    /// the table from growing across structural edits.
    pub fn release_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.remove(id) {
                pending.extend(node.slots);
                pending.extend(node.children);
            }
        }
    }

    fn remove(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.index.remove(&id)?;
        let node = self.nodes.swap_remove(idx);
        if idx < self.nodes.len() {
            // Re-point the entry that swap_remove moved into the hole.
            let moved = self.nodes[idx].id;
            self.index.insert(moved, idx);
        }
        Some(node)
    }
}
