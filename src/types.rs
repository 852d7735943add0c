/// An offset into a field's text.
///
/// Positions are zero-based and count the units the [`TextBuffer`] exposes
/// (grapheme clusters for [`MemoryBuffer`]). Line breaks count as regular
/// characters.
///
/// [`TextBuffer`]: crate::traits::TextBuffer
/// [`MemoryBuffer`]: crate::buffer::MemoryBuffer
pub type Position = usize;

/// The current mode of the vim engine.
///
/// Vim is a modal editor where the same keys perform different
/// actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Normal mode - keystrokes are commands.
    #[default]
    Normal,
    /// Insert mode - keystrokes are handed to the host as text.
    Insert,
    /// Visual mode - movements grow or shrink a selection around an anchor.
    Visual,
    /// Command-line mode. Reserved; no binding enters it.
    Command,
}

impl Mode {
    /// Whether keystrokes in this mode are interpreted as commands.
    pub fn is_command_mode(self) -> bool {
        matches!(self, Mode::Normal | Mode::Visual)
    }
}

/// Identity of an editable field, chosen by the host.
///
/// Editor state and undo history are keyed by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldId(pub u64);

/// A full snapshot of a field taken before a destructive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    /// Caret position to restore.
    pub position: Position,
    /// The whole text of the field.
    pub text: String,
}
