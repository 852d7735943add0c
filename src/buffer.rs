//! An in-memory [`TextBuffer`] for hosts without a native text widget.

use std::iter;

use unicode_segmentation::UnicodeSegmentation;

use crate::traits::TextBuffer;
use crate::types::Position;

/// A text field held in memory, addressed by grapheme cluster.
///
/// Emoji and combining sequences count as a single position, so the cursor
/// never lands inside a cluster.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    text: String,
    // Byte offset of every cluster start, followed by `text.len()`
    bounds: Vec<usize>,
    selection: (Position, Position),
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryBuffer {
    pub fn new(text: &str) -> Self {
        let mut buffer = Self {
            text: String::new(),
            bounds: vec![0],
            selection: (0, 0),
        };
        buffer.set_text(text);
        buffer
    }

    pub fn with_selection(mut self, start: Position, end: Position) -> Self {
        self.select(start, end);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn cluster(&self, pos: Position) -> Option<&str> {
        let start = *self.bounds.get(pos)?;
        let end = *self.bounds.get(pos + 1)?;
        Some(&self.text[start..end])
    }
}

impl TextBuffer for MemoryBuffer {
    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    fn char_at(&self, pos: Position) -> Option<char> {
        match self.cluster(pos)? {
            "\r\n" => Some('\n'),
            cluster => cluster.chars().next(),
        }
    }

    fn slice(&self, start: Position, end: Position) -> String {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        if start >= end {
            return String::new();
        }
        self.text[self.bounds[start]..self.bounds[end]].to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.bounds = self
            .text
            .grapheme_indices(true)
            .map(|(offset, _)| offset)
            .chain(iter::once(self.text.len()))
            .collect();

        let len = self.len();
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
    }

    fn selection_range(&self) -> (Position, Position) {
        self.selection
    }

    fn set_selection_range(&mut self, start: Position, end: Position) {
        self.selection = (start, end);
    }
}
