use crate::types::Position;

/// How [`TextBuffer::insert_at`] places the selection after inserting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Select the inserted span.
    Plain,
    /// Paste after the cursor or after the current line.
    PasteAfter { line_wise: bool },
    /// Paste before the cursor or before the current line.
    PasteBefore { line_wise: bool },
}

/// The editable widget the engine drives.
///
/// Implementors only provide raw access to the text and the selection; the
/// editing primitives the engine relies on are provided on top of them.
pub trait TextBuffer {
    // Raw widget access
    fn len(&self) -> usize;
    fn char_at(&self, pos: Position) -> Option<char>;
    fn slice(&self, start: Position, end: Position) -> String;
    fn set_text(&mut self, text: &str);

    fn selection_range(&self) -> (Position, Position);
    fn set_selection_range(&mut self, start: Position, end: Position);

    // Move input focus to the widget, if the host has such a notion
    fn focus(&mut self) {}

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn text(&self) -> String {
        self.slice(0, self.len())
    }

    fn cursor(&self) -> Position {
        self.selection_range().0
    }

    fn selection_end(&self) -> Position {
        self.selection_range().1
    }

    fn selected_text(&self) -> String {
        let (start, end) = self.selection_range();
        self.slice(start, end)
    }

    /// Selects `[start, end)`, swapping reversed bounds and clamping both to
    /// the text, then focuses the widget.
    fn select(&mut self, start: Position, end: Position) {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let len = self.len();
        self.set_selection_range(start.min(len), end.min(len));
        self.focus();
    }

    /// Removes `[start, end)` and returns the removed text.
    ///
    /// Returns `None` for an empty range. A field is never left empty: when
    /// the whole text goes away a single space takes its place.
    fn delete_range(&mut self, start: Position, end: Position) -> Option<String> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        if start == end {
            return None;
        }

        let len = self.len();
        let start = start.min(len);
        let end = end.min(len);
        let removed = self.slice(start, end);
        let mut rest = self.slice(0, start);
        rest.push_str(&self.slice(end, len));
        if rest.is_empty() {
            rest.push(' ');
        }
        self.set_text(&rest);
        Some(removed)
    }

    fn insert_at(&mut self, text: &str, pos: Position, mode: InsertMode) {
        let before = self.len();
        let pos = pos.min(before);
        let mut joined = self.slice(0, pos);
        joined.push_str(text);
        joined.push_str(&self.slice(pos, before));
        self.set_text(&joined);

        let inserted = self.len().saturating_sub(before);
        match mode {
            InsertMode::Plain => self.select(pos, pos + inserted),
            InsertMode::PasteAfter { line_wise: true } if pos > 0 => self.select(pos + 1, pos + 2),
            InsertMode::PasteBefore { line_wise: true } => self.select(pos, pos + 1),
            // Reversed on purpose, select() puts it back in order
            _ => self.select(pos + inserted, (pos + inserted).saturating_sub(1)),
        }
        self.focus();
    }

    /// Types `text` over the current selection and collapses the caret after
    /// it, the way a text widget handles an unsuppressed keystroke.
    fn replace_selection(&mut self, text: &str) {
        let (start, end) = self.selection_range();
        let len = self.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let mut joined = self.slice(0, start);
        joined.push_str(text);
        joined.push_str(&self.slice(end, len));
        let kept = len - (end - start);
        self.set_text(&joined);
        let caret = start + self.len().saturating_sub(kept);
        self.set_selection_range(caret, caret);
    }
}

/// A storage slot for yanked and deleted text.
pub trait Clipboard {
    fn get(&mut self) -> Option<String>;
    fn set(&mut self, text: String);
}
