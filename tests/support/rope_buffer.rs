use modal_field::traits::TextBuffer;
use modal_field::types::Position;
use ropey::Rope;

/// A text widget stand-in backed by a rope, addressed by `char`.
pub struct RopeBuffer {
    rope: Rope,
    selection: (Position, Position),
    focused: usize,
}

impl RopeBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: (0, 0),
            focused: 0,
        }
    }

    pub fn with_selection(mut self, start: Position, end: Position) -> Self {
        self.select(start, end);
        self
    }

    pub fn as_string(&self) -> String {
        self.rope.to_string()
    }

    /// How many times the engine asked for focus.
    pub fn focus_requests(&self) -> usize {
        self.focused
    }
}

impl TextBuffer for RopeBuffer {
    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, pos: Position) -> Option<char> {
        self.rope.get_char(pos)
    }

    fn slice(&self, start: Position, end: Position) -> String {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.len();
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
    }

    fn selection_range(&self) -> (Position, Position) {
        self.selection
    }

    fn set_selection_range(&mut self, start: Position, end: Position) {
        self.selection = (start, end);
    }

    fn focus(&mut self) {
        self.focused += 1;
    }
}
