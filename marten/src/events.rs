//! Input events delivered to the editing core.
//!
//! Each event represents one keystroke already decoded by the host. Events
//! are pure data and contain no behavior themselves; the active node's state
//! machine in [`crate::editor`] interprets them.

/// A single decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Delete the last character of the active node's text.
    Backspace,
    /// Retreat focus from a slot to its parent.
    Left,
    /// Advance focus from a node into its first slot.
    Right,
    /// Append a printable character to the active node's text.
    ///
    /// Character-set validity is a host responsibility; any `char` value is
    /// accepted as appendable text.
    Char(char),
}
