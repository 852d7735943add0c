use std::collections::VecDeque;

use crate::types::{Position, UndoEntry};

/// A bounded, flat undo stack of whole-text snapshots.
///
/// Once `limit` entries are stored, recording another evicts the oldest.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    limit: usize,
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(128)),
            limit: limit.max(1),
        }
    }

    pub fn record(&mut self, text: String, position: Position) {
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(UndoEntry { position, text });
        tracing::debug!(position, depth = self.entries.len(), "undo snapshot");
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UndoEntry> {
        self.entries.iter()
    }
}
