use crate::types::{Mode, Position};

/// Per-field modal state.
///
/// The visual anchor and cursor only mean something while the mode is
/// [`Mode::Visual`]; leaving visual mode or refocusing the field clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    mode: Mode,
    /// Fixed end of the visual selection.
    pub(crate) visual_anchor: Option<Position>,
    /// Moving end of the visual selection; `None` until the first movement.
    pub(crate) visual_cursor: Option<Position>,
    /// Set by `r` until the next keystroke replaces the selected character.
    pub(crate) replace_pending: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_mode(&self, mode: Mode) -> bool {
        self.mode == mode
    }

    pub fn visual_anchor(&self) -> Option<Position> {
        self.visual_anchor
    }

    pub fn visual_cursor(&self) -> Option<Position> {
        self.visual_cursor
    }

    pub fn replace_pending(&self) -> bool {
        self.replace_pending
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "mode change");
        }
        self.mode = mode;
        if mode != Mode::Visual {
            self.visual_anchor = None;
            self.visual_cursor = None;
        }
    }

    /// Starts a visual selection anchored at `anchor`.
    pub fn begin_visual(&mut self, anchor: Position) {
        self.switch_mode(Mode::Visual);
        self.visual_anchor = Some(anchor);
        self.visual_cursor = None;
    }

    /// Clears the transient state when the field gains focus. The mode is kept.
    pub fn reset_transient(&mut self) {
        self.visual_anchor = None;
        self.visual_cursor = None;
        self.replace_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_normal_mode() {
        let state = EditorState::new();
        assert_eq!(state.mode(), Mode::Normal);
        assert_eq!(state.visual_anchor(), None);
    }

    #[test]
    fn leaving_visual_clears_anchors() {
        let mut state = EditorState::new();
        state.begin_visual(4);
        state.visual_cursor = Some(6);
        assert_eq!(state.visual_anchor(), Some(4));

        state.switch_mode(Mode::Normal);
        assert_eq!(state.visual_anchor(), None);
        assert_eq!(state.visual_cursor(), None);
    }

    #[test]
    fn focus_reset_keeps_mode() {
        let mut state = EditorState::new();
        state.begin_visual(2);
        state.replace_pending = true;

        state.reset_transient();
        assert_eq!(state.mode(), Mode::Visual);
        assert_eq!(state.visual_anchor(), None);
        assert!(!state.replace_pending());
    }
}
