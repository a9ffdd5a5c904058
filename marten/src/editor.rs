//! The editing context: active-node tracking and the keyboard state machine.
//!
//! The host delivers one [`KeyEvent`] at a time through [`Editor::dispatch`];
//! the event is interpreted against the currently active node, which may
//! mutate its text, replace its slots, and move focus. Each event is fully
//! processed (text update, trigger evaluation, focus change, size recompute)
//! before the next one is accepted, and a later event always observes the
//! tree state left by all prior events.
//!
//! The state machine is total: out-of-range navigation and backspace on
//! empty text are defined no-ops or back-navigation, never errors.

use crate::{
    events::KeyEvent,
    kind::NodeKind,
    node::{Node, NodeId, NodeTree, Size},
    render::{self, DrawRecord, TextMetrics},
    trigger,
};
use marten_config::Settings;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// The editing context.
///
/// Owns the node table, the root, the single active-node pointer, and the
/// settings-derived text metrics shared by every node. All node creation
/// goes through this type, so there is no process-wide factory state.
pub struct Editor {
    tree: NodeTree,
    root: NodeId,
    active: NodeId,
    metrics: TextMetrics,
    margin: f32,
}

impl Editor {
    /// Create an editor with a single empty root node, which starts active.
    pub fn new(settings: &Settings) -> Self {
        let mut tree = NodeTree::new();
        let root = tree.alloc(NodeKind::Generic);

        let mut editor = Self {
            tree,
            root,
            active: root,
            metrics: TextMetrics::of(&settings.font),
            margin: settings.node.margin,
        };
        editor.set_text(root, "");
        editor
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node currently receiving keyboard events.
    pub fn active(&self) -> NodeId {
        self.active
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.active == id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Deliver one keyboard event to the active node.
    pub fn dispatch(&mut self, event: KeyEvent) {
        trace!(?event, active = ?self.active, "dispatch");
        match event {
            KeyEvent::Backspace => {
                let mut text = self.text_of(self.active);
                text.pop();
                self.set_text(self.active, &text);
            }
            KeyEvent::Left => self.retreat(self.active),
            KeyEvent::Right => self.advance(self.active),
            KeyEvent::Char(ch) => {
                let mut text = self.text_of(self.active);
                text.push(ch);
                self.set_text(self.active, &text);
            }
        }
    }

    /// Assign text to a node, evaluating the trigger table.
    ///
    /// The node's variant normalization is applied to `raw` before storing;
    /// the trigger table sees the raw input. An empty `raw` means "deleted
    /// past the last character" and back-navigates instead of touching the
    /// slots.
    pub fn set_text(&mut self, id: NodeId, raw: &str) {
        let Some(node) = self.tree.get(id) else { return };
        let kind = node.kind;

        let normalized = kind.normalize(raw);
        if let Some(node) = self.tree.get_mut(id) {
            node.text = normalized.into();
        }

        match trigger::expansion_for(raw) {
            Some(kinds) if kind.expands() => self.expand(id, kinds),
            _ if raw.is_empty() => self.retreat(id),
            _ => self.collapse(id),
        }

        self.refresh_size(id);
    }

    /// Produce draw records for the whole tree, depth-first from the root.
    pub fn render(&self) -> Vec<DrawRecord> {
        let mut records = Vec::new();
        render::walk(&self.tree, self.root, self.active, 0.0, 0.0, &mut records);
        records
    }

    /// Replace `id`'s slots with freshly produced nodes of `kinds`, moving
    /// focus to the first one.
    fn expand(&mut self, id: NodeId, kinds: &[NodeKind]) {
        self.collapse(id);

        let mut slots: SmallVec<[NodeId; 2]> = SmallVec::new();
        for &kind in kinds {
            let slot = self.produce(kind);
            if let Some(node) = self.tree.get_mut(slot) {
                node.parent = Some(id);
            }
            slots.push(slot);
        }

        let first = slots.first().copied();
        if let Some(node) = self.tree.get_mut(id) {
            node.slots = slots;
            node.slot_pos = Some(0);
        }
        if let Some(first) = first {
            self.active = first;
        }

        debug!(node = ?id, slots = kinds.len(), "expanded");
    }

    /// Drop `id`'s slots, releasing the detached subtrees.
    fn collapse(&mut self, id: NodeId) {
        let slots = match self.tree.get_mut(id) {
            Some(node) => {
                node.slot_pos = None;
                std::mem::take(&mut node.slots)
            }
            None => return,
        };

        if !slots.is_empty() {
            debug!(node = ?id, slots = slots.len(), "collapsed");
        }
        for slot in slots {
            self.tree.release_subtree(slot);
        }
    }

    /// Allocate a node of `kind`, initialized through the same `set_text`
    /// path used for all edits.
    fn produce(&mut self, kind: NodeKind) -> NodeId {
        let id = self.tree.alloc(kind);
        self.set_text(id, "");
        id
    }

    /// Back-navigation: move focus from a first slot to its parent.
    ///
    /// Fires only when the parent's focused slot index is exactly 0; from
    /// any other position this is a no-op, as is retreat at the root.
    fn retreat(&mut self, id: NodeId) {
        let Some(parent) = self.tree.get(id).and_then(|node| node.parent) else {
            return;
        };
        let Some(parent_node) = self.tree.get_mut(parent) else {
            return;
        };
        if parent_node.slot_pos == Some(0) {
            parent_node.slot_pos = None;
            self.active = parent;
            trace!(from = ?id, to = ?parent, "focus retreated");
        }
    }

    /// Forward-navigation: move focus into the first slot, when the node
    /// has slots and none is focused.
    fn advance(&mut self, id: NodeId) {
        let Some(node) = self.tree.get(id) else { return };
        if node.slot_pos.is_some() {
            return;
        }
        let Some(&first) = node.slots.first() else {
            return;
        };

        if let Some(node) = self.tree.get_mut(id) {
            node.slot_pos = Some(0);
        }
        self.active = first;
        trace!(from = ?id, to = ?first, "focus advanced");
    }

    fn refresh_size(&mut self, id: NodeId) {
        let Some(node) = self.tree.get(id) else { return };
        let (width, height) = self.metrics.measure(&node.text);
        let size = Size {
            width: width + 2.0 * self.margin,
            height: height + 2.0 * self.margin,
        };
        if let Some(node) = self.tree.get_mut(id) {
            node.size = size;
        }
    }

    fn text_of(&self, id: NodeId) -> String {
        self.tree
            .get(id)
            .map(|node| node.text.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(&Settings::default())
    }

    fn type_str(editor: &mut Editor, text: &str) {
        for ch in text.chars() {
            editor.dispatch(KeyEvent::Char(ch));
        }
    }

    fn kinds_of(editor: &Editor, ids: &[NodeId]) -> Vec<NodeKind> {
        ids.iter()
            .filter_map(|&id| editor.node(id).map(|n| n.kind))
            .collect()
    }

    #[test]
    fn starts_with_an_active_empty_root() {
        let editor = editor();
        let root = editor.node(editor.root()).expect("root exists");

        assert_eq!(root.text, "");
        assert_eq!(root.parent, None);
        assert!(root.slots.is_empty());
        assert!(editor.is_active(editor.root()));
    }

    #[test]
    fn def_trigger_expands_into_identifier_and_params() {
        let mut editor = editor();
        type_str(&mut editor, "def ");

        let root = editor.node(editor.root()).expect("root exists");
        assert_eq!(root.text, "def");
        assert_eq!(root.slot_pos, Some(0));
        assert_eq!(
            kinds_of(&editor, &root.slots),
            [NodeKind::Identifier, NodeKind::Params]
        );
        assert_eq!(editor.active(), root.slots[0]);
    }

    #[test]
    fn class_trigger_expands_into_constant() {
        let mut editor = editor();
        type_str(&mut editor, "class ");

        let root = editor.node(editor.root()).expect("root exists");
        assert_eq!(root.text, "class");
        assert_eq!(root.slot_pos, Some(0));
        assert_eq!(kinds_of(&editor, &root.slots), [NodeKind::Constant]);
        assert_eq!(editor.active(), root.slots[0]);
    }

    #[test]
    fn trigger_fires_only_on_exact_accumulated_text() {
        let mut editor = editor();
        type_str(&mut editor, "def");

        let root = editor.node(editor.root()).expect("root exists");
        assert!(root.slots.is_empty());
        assert_eq!(root.slot_pos, None);
    }

    #[test]
    fn params_slot_ignores_input() {
        let mut editor = editor();
        type_str(&mut editor, "def ");
        let params = editor.node(editor.root()).expect("root exists").slots[1];

        assert_eq!(editor.node(params).expect("params exists").text, "()");
        editor.set_text(params, "anything at all");
        assert_eq!(editor.node(params).expect("params exists").text, "()");
    }

    #[test]
    fn identifier_slot_normalizes_typed_text() {
        let mut editor = editor();
        type_str(&mut editor, "def ");
        type_str(&mut editor, "HelloWorld");

        let name = editor.active();
        assert_eq!(editor.node(name).expect("name exists").text, "hello_world");
    }

    #[test]
    fn backspace_to_empty_returns_focus_to_parent() {
        let mut editor = editor();
        type_str(&mut editor, "def ");
        type_str(&mut editor, "a");

        editor.dispatch(KeyEvent::Backspace);

        let root = editor.node(editor.root()).expect("root exists");
        assert!(editor.is_active(editor.root()));
        assert_eq!(root.slot_pos, None);
        // The slot itself survives with empty text.
        assert_eq!(editor.node(root.slots[0]).expect("slot exists").text, "");
    }

    #[test]
    fn backspace_on_empty_root_is_noop() {
        let mut editor = editor();
        editor.dispatch(KeyEvent::Backspace);
        assert!(editor.is_active(editor.root()));
        assert_eq!(editor.tree().len(), 1);
    }

    #[test]
    fn left_right_round_trip_is_shape_neutral() {
        let mut editor = editor();
        type_str(&mut editor, "class ");
        editor.dispatch(KeyEvent::Left);
        assert!(editor.is_active(editor.root()));

        let before = editor.tree().len();

        editor.dispatch(KeyEvent::Right);
        let root = editor.node(editor.root()).expect("root exists");
        assert_eq!(root.slot_pos, Some(0));
        assert_eq!(editor.active(), root.slots[0]);

        editor.dispatch(KeyEvent::Left);
        let root = editor.node(editor.root()).expect("root exists");
        assert_eq!(root.slot_pos, None);
        assert!(editor.is_active(editor.root()));
        assert_eq!(editor.tree().len(), before);
    }

    #[test]
    fn right_without_slots_is_noop() {
        let mut editor = editor();
        type_str(&mut editor, "x");
        editor.dispatch(KeyEvent::Right);
        assert!(editor.is_active(editor.root()));
    }

    #[test]
    fn left_at_root_is_noop() {
        let mut editor = editor();
        editor.dispatch(KeyEvent::Left);
        assert!(editor.is_active(editor.root()));
    }

    #[test]
    fn non_trigger_text_releases_slots() {
        let mut editor = editor();
        type_str(&mut editor, "def ");
        assert_eq!(editor.tree().len(), 3);

        editor.dispatch(KeyEvent::Left);
        type_str(&mut editor, "x");

        let root = editor.node(editor.root()).expect("root exists");
        assert_eq!(root.text, "defx");
        assert!(root.slots.is_empty());
        assert_eq!(root.slot_pos, None);
        assert_eq!(editor.tree().len(), 1);
    }

    #[test]
    fn retrigger_after_collapse_creates_fresh_slots() {
        let mut editor = editor();
        type_str(&mut editor, "def ");
        let old_slots: Vec<NodeId> =
            editor.node(editor.root()).expect("root exists").slots.to_vec();

        editor.dispatch(KeyEvent::Left);
        type_str(&mut editor, "x");
        editor.dispatch(KeyEvent::Backspace);
        type_str(&mut editor, " ");

        let root = editor.node(editor.root()).expect("root exists");
        assert_eq!(root.text, "def");
        assert_eq!(root.slots.len(), 2);
        for old in old_slots {
            assert!(!editor.tree().contains(old));
        }
    }

    #[test]
    fn size_tracks_text_and_margin() {
        let mut editor = editor();
        let settings = Settings::default();
        let metrics = TextMetrics::of(&settings.font);
        type_str(&mut editor, "def");

        let root = editor.node(editor.root()).expect("root exists");
        let (w, h) = metrics.measure("def");
        assert_eq!(root.size.width, w + 2.0 * settings.node.margin);
        assert_eq!(root.size.height, h + 2.0 * settings.node.margin);
    }

    #[test]
    fn slot_parents_point_at_the_expanding_node() {
        let mut editor = editor();
        type_str(&mut editor, "def ");

        let root_id = editor.root();
        let slots = editor.node(root_id).expect("root exists").slots.clone();
        for slot in slots {
            assert_eq!(editor.node(slot).expect("slot exists").parent, Some(root_id));
        }
    }
}
