use std::time::Instant;

use crate::types::FieldId;

/// Work the engine defers until the host has processed the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Finish an insert command by entering insert mode.
    EnterInsert,
    /// Select the character the host just typed over.
    RepairAfterReplace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub due: Instant,
    pub field: FieldId,
    pub task: Task,
}

/// Single-shot timers, fired in due order. There is no cancellation.
#[derive(Debug, Default, Clone)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn schedule(&mut self, due: Instant, field: FieldId, task: Task) {
        self.pending.push(Scheduled { due, field, task });
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Scheduled> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|timer| timer.due <= now);
        self.pending = rest;
        due.sort_by_key(|timer| timer.due);
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
