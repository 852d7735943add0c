//! Movement and editing commands.
//!
//! A [`CommandEngine`] borrows one field's state and buffer for the duration
//! of a single command. Operations never fail: moves that would leave the
//! text or cross a line break simply do nothing.

use crate::history::UndoHistory;
use crate::keymap::Action;
use crate::register::Register;
use crate::scan::{self, LINE_BREAK};
use crate::state::EditorState;
use crate::traits::{InsertMode, TextBuffer};
use crate::types::{Mode, Position};

/// What the caller still has to do once a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    None,
    /// Switch to insert mode, possibly after a delay.
    EnterInsert,
}

type Fingerprint = ((Position, Position), usize, Option<Position>, Option<Position>, usize);

pub struct CommandEngine<'a, B: TextBuffer + ?Sized> {
    state: &'a mut EditorState,
    buf: &'a mut B,
    register: &'a mut Register,
    history: &'a mut UndoHistory,
}

impl<'a, B: TextBuffer + ?Sized> CommandEngine<'a, B> {
    pub fn new(
        state: &'a mut EditorState,
        buf: &'a mut B,
        register: &'a mut Register,
        history: &'a mut UndoHistory,
    ) -> Self {
        Self {
            state,
            buf,
            register,
            history,
        }
    }

    /// Runs `action` with a repeat count.
    pub fn run(&mut self, action: Action, count: u32) -> Followup {
        match action {
            Action::SelectNextChar => self.times(count, Self::select_next_char),
            Action::SelectPrevChar => self.times(count, Self::select_prev_char),
            Action::SelectNextLine => self.times(count, Self::select_next_line),
            Action::SelectPrevLine => self.times(count, Self::select_prev_line),
            Action::NextWord => self.times(count, Self::move_to_next_word),
            Action::LineHead => self.move_to_line_head(),
            Action::LineTail => self.move_to_line_tail(),
            Action::FirstLine => self.move_to_first_line(),
            Action::LastLine => self.move_to_last_line(),
            Action::Append => {
                self.append();
                return Followup::EnterInsert;
            }
            Action::AppendAtLineTail => {
                self.move_to_line_tail();
                self.append();
                return Followup::EnterInsert;
            }
            Action::Insert => {
                self.insert();
                return Followup::EnterInsert;
            }
            Action::InsertAtLineHead => {
                self.move_to_line_head();
                self.insert();
                return Followup::EnterInsert;
            }
            Action::OpenLineBelow => {
                self.open_line_below();
                return Followup::EnterInsert;
            }
            Action::OpenLineAbove => {
                self.open_line_above();
                return Followup::EnterInsert;
            }
            Action::ReplaceChar => self.state.replace_pending = true,
            Action::CopySelection => self.copy_selection(),
            Action::CopyLine => self.copy_lines(count),
            Action::CopyWord => self.copy_words(count),
            Action::DeleteSelection => self.delete_selection(count),
            Action::DeleteLine => self.collect(count, true, Self::delete_current_line),
            Action::DeleteWord => self.collect(count, false, Self::delete_word),
            Action::DeleteCharOrLine => self.delete_char_or_line(),
            Action::PasteAfter => self.paste_after(),
            Action::PasteBefore => self.paste_before(),
            Action::Undo => self.times(count, Self::undo),
            Action::ToggleVisual => self.toggle_visual(),
        }
        Followup::None
    }

    fn in_visual(&self) -> bool {
        self.state.is_mode(Mode::Visual)
    }

    /// The end of the selection that moves: the visual cursor once one
    /// exists, the caret otherwise.
    fn moving_end(&self) -> Position {
        match self.state.visual_cursor {
            Some(cursor) if self.in_visual() => cursor,
            _ => self.buf.cursor(),
        }
    }

    fn anchor_or(&self, fallback: Position) -> Position {
        self.state.visual_anchor.unwrap_or(fallback)
    }

    /// Everything a repeated operation can change.
    fn fingerprint(&self) -> Fingerprint {
        (
            self.buf.selection_range(),
            self.buf.len(),
            self.state.visual_anchor,
            self.state.visual_cursor,
            self.history.len(),
        )
    }

    /// Runs `op` up to `count` times, stopping early once a run changes
    /// nothing.
    fn times(&mut self, count: u32, mut op: impl FnMut(&mut Self)) {
        for _ in 0..count.max(1) {
            let before = self.fingerprint();
            op(self);
            if self.fingerprint() == before {
                break;
            }
        }
    }

    /// Runs `op` `count` times and stores what it produced in the register,
    /// as one yank.
    ///
    /// The trailing line break of the final fragment is dropped. The register
    /// is left alone when `op` produced nothing at all; a yanked blank line
    /// still overwrites it with empty text. Repetition ends at the first run
    /// that produces nothing, and never goes past one run per character.
    fn collect(
        &mut self,
        count: u32,
        line_wise: bool,
        mut op: impl FnMut(&mut Self) -> Option<String>,
    ) {
        let limit = u32::try_from(self.buf.len().saturating_add(1)).unwrap_or(u32::MAX);
        let count = count.clamp(1, limit);
        let mut yanked: Option<String> = None;
        for _ in 0..count {
            let Some(fragment) = op(self) else {
                break;
            };
            yanked.get_or_insert_with(String::new).push_str(&fragment);
        }

        if let Some(mut text) = yanked {
            if text.ends_with(LINE_BREAK) {
                text.pop();
            }
            self.register.set_line_wise(line_wise);
            self.register.set_text(text);
        }
    }

    pub fn select_next_char(&mut self) {
        let pos = self.moving_end();
        let len = self.buf.len();

        if !self.in_visual() {
            match self.buf.char_at(pos + 1) {
                None | Some(LINE_BREAK) => return,
                Some(_) => self.buf.select(pos + 1, pos + 2),
            }
            return;
        }

        if self.buf.char_at(pos) == Some(LINE_BREAK) || pos + 1 > len {
            return;
        }

        let start = self.anchor_or(pos);
        let last_cursor = self.buf.cursor();
        let last_visual = pos + 1;
        self.state.visual_cursor = Some(pos + 1);

        if start == pos {
            self.state.visual_cursor = Some(pos + 2);
            self.buf.select(start, pos + 2);
        } else if last_visual == start && start.checked_sub(last_cursor) == Some(1) {
            // Shrunk back onto the anchor from behind: flip to growing forward
            self.state.visual_anchor = Some(start - 1);
            self.state.visual_cursor = Some(pos + 2);
            self.buf.select(start - 1, pos + 2);
        } else {
            self.buf.select(start, pos + 1);
        }
    }

    pub fn select_prev_char(&mut self) {
        let pos = self.moving_end();
        if scan::char_before(self.buf, pos) == Some(LINE_BREAK) {
            return;
        }

        if !self.in_visual() {
            if pos > 0 {
                self.buf.select(pos - 1, pos);
            }
            return;
        }

        let start = self.anchor_or(pos);
        if pos > start && pos.checked_sub(2).and_then(|i| self.buf.char_at(i)) == Some(LINE_BREAK) {
            return;
        }

        if pos == start {
            let moving = start.saturating_sub(1);
            self.state.visual_anchor = Some(start + 1);
            self.state.visual_cursor = Some(moving);
            self.buf.select(moving, start + 1);
        } else if pos == start + 1 {
            // One character wide: re-anchor behind it instead of collapsing
            let moving = pos.saturating_sub(2);
            self.state.visual_anchor = Some(start + 1);
            self.state.visual_cursor = Some(moving);
            self.buf.select(start + 1, moving);
        } else if pos + 1 == start {
            let moving = start.saturating_sub(2);
            self.state.visual_cursor = Some(moving);
            self.buf.select(start, moving);
        } else if pos > start && pos + 1 == self.buf.selection_end() {
            self.state.visual_cursor = Some(pos);
            self.buf.select(start, pos);
        } else {
            let moving = pos.saturating_sub(1);
            self.state.visual_cursor = Some(moving);
            self.buf.select(start, moving);
        }
    }

    /// Column used when moving vertically; a forward visual selection's
    /// moving end sits one past the last selected character.
    fn vertical_column(&self, pos: Position) -> usize {
        let column = scan::column(self.buf, pos);
        let forward = self.in_visual()
            && self
                .state
                .visual_cursor
                .zip(self.state.visual_anchor)
                .is_some_and(|(cursor, anchor)| anchor < cursor);
        if forward { column - 1 } else { column }
    }

    pub fn select_next_line(&mut self) {
        let pos = self.moving_end();
        let Some(next_start) = scan::next_line_start(self.buf, pos) else {
            return;
        };

        let column = self.vertical_column(pos);
        let next_len = scan::line_length(self.buf, next_start);
        let target = next_start + column.min(next_len);
        if target > self.buf.len() {
            return;
        }
        let next_is_empty = self.buf.char_at(next_start) == Some(LINE_BREAK);

        if !self.in_visual() {
            self.buf.select(target.saturating_sub(1), target);
            if next_is_empty {
                self.buf.insert_at(" ", next_start, InsertMode::Plain);
            }
            return;
        }

        let mut start = self.anchor_or(pos);
        let mut target = target;
        if start > target {
            target -= 1;
        }
        self.state.visual_cursor = Some(target);
        if next_is_empty {
            self.buf.insert_at(" ", next_start, InsertMode::Plain);
            target += 1;
            self.state.visual_cursor = Some(target);
            if start > target {
                start += 1;
                self.state.visual_anchor = Some(start);
            }
        }
        self.buf.select(start, target);
    }

    pub fn select_prev_line(&mut self) {
        let pos = self.moving_end();
        let (Some(prev_start), Some(prev_end)) = (
            scan::prev_line_start(self.buf, pos),
            scan::prev_line_end(self.buf, pos),
        ) else {
            return;
        };

        let column = self.vertical_column(pos);
        let target = prev_start + column.min(prev_end - prev_start);

        if !self.in_visual() {
            self.buf.select(target.saturating_sub(1), target);
            if self.buf.char_at(prev_start) == Some(LINE_BREAK) {
                self.buf.insert_at(" ", prev_start, InsertMode::Plain);
            }
            return;
        }

        let start = self.anchor_or(pos);
        let mut end = target;
        if scan::char_before(self.buf, target) != Some(LINE_BREAK)
            && start + 1 != target
            && end < start
        {
            end = target.saturating_sub(1);
        }
        self.state.visual_cursor = Some(end);
        self.buf.select(start, end);
    }

    pub fn move_to_line_head(&mut self) {
        if !self.in_visual() {
            let head = scan::line_start(self.buf, self.buf.cursor());
            self.buf.select(head, head + 1);
            return;
        }

        let from = self.moving_end();
        let steps = from - scan::line_start(self.buf, from);
        for _ in 0..steps {
            self.select_prev_char();
        }
    }

    pub fn move_to_line_tail(&mut self) {
        if !self.in_visual() {
            let cursor = self.buf.cursor();
            let head = scan::line_start(self.buf, cursor);
            let tail = scan::line_end(self.buf, cursor);
            self.buf.select(tail.saturating_sub(1).max(head), tail);
            return;
        }

        let from = self.moving_end();
        let mut tail = scan::line_end(self.buf, from);
        if from + 1 == tail {
            tail -= 1;
        }
        for _ in from..tail {
            self.select_next_char();
        }
    }

    pub fn move_to_first_line(&mut self) {
        if !self.in_visual() {
            self.buf.select(0, 1);
            return;
        }
        let anchor = self.anchor_or(0);
        self.state.visual_cursor = Some(0);
        self.buf.select(anchor, 0);
    }

    pub fn move_to_last_line(&mut self) {
        let head = scan::line_start(self.buf, self.buf.len().saturating_sub(1));
        if !self.in_visual() {
            self.buf.select(head, head + 1);
            return;
        }
        let anchor = self.anchor_or(head);
        self.state.visual_cursor = Some(head + 1);
        self.buf.select(anchor, head + 1);
    }

    pub fn move_to_next_word(&mut self) {
        let from = self.moving_end();
        let Some(boundary) = scan::next_word(self.buf, from) else {
            return;
        };

        if !self.in_visual() {
            self.buf.select(boundary, boundary + 1);
            return;
        }
        let anchor = self.anchor_or(from);
        self.state.visual_cursor = Some(boundary + 1);
        self.buf.select(anchor, boundary + 1);
    }

    pub fn append(&mut self) {
        let caret = self.buf.cursor() + 1;
        self.buf.select(caret, caret);
    }

    pub fn insert(&mut self) {
        let caret = self.buf.cursor();
        self.buf.select(caret, caret);
    }

    pub fn open_line_below(&mut self) {
        let tail = scan::line_end(self.buf, self.buf.cursor());
        self.buf.insert_at("\n ", tail, InsertMode::Plain);
        self.buf.select(tail + 1, tail + 1);
    }

    pub fn open_line_above(&mut self) {
        let head = scan::line_start(self.buf, self.buf.cursor());
        self.buf.insert_at(" \n", head, InsertMode::Plain);
        self.buf.select(head, head);
    }

    pub fn copy_selection(&mut self) {
        let selected = self.buf.selected_text();
        self.register.set_line_wise(false);
        self.register.set_text(selected);
        self.switch_to_normal();
    }

    fn copy_lines(&mut self, count: u32) {
        let mut next = Some(self.buf.cursor());
        self.collect(count, true, |this| {
            let pos = next?;
            let head = scan::line_start(this.buf, pos);
            let tail = scan::line_end(this.buf, pos);
            next = scan::next_line_start(this.buf, pos);
            Some(this.buf.slice(head, tail + 1))
        });
    }

    fn copy_words(&mut self, count: u32) {
        let cursor = self.buf.cursor();
        let mut end = cursor;
        for _ in 0..count.max(1) {
            match scan::next_word(self.buf, end) {
                Some(boundary) => end = boundary,
                None => {
                    end = self.buf.len();
                    break;
                }
            }
        }

        let word = self.buf.slice(cursor, end);
        if word.is_empty() {
            return;
        }
        self.register.set_line_wise(false);
        self.register.set_text(word);
    }

    fn delete_selection(&mut self, count: u32) {
        self.collect(count, false, |this| {
            let (start, end) = this.buf.selection_range();
            let removed = this.buf.delete_range(start, end);
            this.buf.select(start, start + 1);
            removed
        });
        self.switch_to_normal();
    }

    fn delete_current_line(&mut self) -> Option<String> {
        let cursor = self.buf.cursor();
        let head = scan::line_start(self.buf, cursor);
        let tail = scan::line_end(self.buf, cursor);
        let removed = self.buf.delete_range(head, tail + 1);
        self.buf.select(head, head + 1);
        removed
    }

    fn delete_word(&mut self) -> Option<String> {
        let cursor = self.buf.cursor();
        let boundary = scan::next_word(self.buf, cursor)?;
        let removed = self.buf.delete_range(cursor, boundary);
        self.buf.select(cursor, cursor + 1);
        removed
    }

    fn delete_char_or_line(&mut self) {
        if self.in_visual() {
            self.collect(1, true, Self::delete_current_line);
        } else {
            let cursor = self.buf.cursor();
            if let Some(before) = cursor.checked_sub(1) {
                let removed = self.buf.delete_range(before, cursor);
                self.buf.select(before, cursor);
                if let Some(removed) = removed {
                    self.register.set_line_wise(false);
                    self.register.set_text(removed);
                }
            }
        }
        self.state.switch_mode(Mode::Normal);
    }

    /// Register content worth pasting. An empty line-wise yank still pastes
    /// a blank line; empty inline text has nothing to insert.
    fn pasteable(&mut self) -> Option<String> {
        let line_wise = self.register.line_wise();
        self.register
            .text()
            .filter(|text| line_wise || !text.is_empty())
    }

    pub fn paste_after(&mut self) {
        let Some(text) = self.pasteable() else {
            return;
        };
        let cursor = self.buf.cursor();
        if self.register.line_wise() {
            let tail = scan::line_end(self.buf, cursor);
            let text = format!("{LINE_BREAK}{text}");
            self.buf
                .insert_at(&text, tail, InsertMode::PasteAfter { line_wise: true });
        } else {
            self.buf
                .insert_at(&text, cursor, InsertMode::PasteAfter { line_wise: false });
        }
    }

    pub fn paste_before(&mut self) {
        let Some(text) = self.pasteable() else {
            return;
        };
        let cursor = self.buf.cursor();
        if self.register.line_wise() {
            let head = scan::line_start(self.buf, cursor);
            let text = format!("{text}{LINE_BREAK}");
            self.buf
                .insert_at(&text, head, InsertMode::PasteBefore { line_wise: true });
        } else {
            self.buf
                .insert_at(&text, cursor, InsertMode::PasteBefore { line_wise: false });
        }
    }

    pub fn undo(&mut self) {
        let Some(entry) = self.history.pop() else {
            return;
        };
        tracing::debug!(position = entry.position, remaining = self.history.len(), "undo");
        self.buf.set_text(&entry.text);
        self.buf.select(entry.position, entry.position + 1);
    }

    pub fn toggle_visual(&mut self) {
        if !self.in_visual() {
            let cursor = self.buf.cursor();
            self.state.begin_visual(cursor);
            return;
        }

        let Some(moving) = self.state.visual_cursor else {
            let cursor = self.buf.cursor();
            self.buf.select(cursor, cursor + 1);
            self.state.switch_mode(Mode::Normal);
            return;
        };

        let grew_forward = self.state.visual_anchor.is_some_and(|anchor| anchor < moving);
        if grew_forward && scan::char_before(self.buf, moving) != Some(LINE_BREAK) {
            self.buf.select(moving - 1, moving);
        } else {
            self.buf.select(moving, moving + 1);
        }
        self.state.switch_mode(Mode::Normal);
    }

    /// Returns to normal mode and puts a one-character selection on the
    /// caret, never past the end of the line.
    pub fn switch_to_normal(&mut self) {
        let previous = self.state.mode();
        if previous == Mode::Normal {
            return;
        }
        self.state.switch_mode(Mode::Normal);

        let position = self.buf.cursor();
        let head = scan::line_start(self.buf, position);
        if position != head {
            if previous == Mode::Visual {
                self.select_next_char();
            }
            self.select_prev_char();
            return;
        }

        if scan::line_length(self.buf, position) == 0 {
            self.buf.insert_at(" ", position, InsertMode::Plain);
        }
        self.select_next_char();
        self.select_prev_char();
        if scan::line_length(self.buf, position) == 1 {
            self.buf.select(position, position + 1);
        }
    }

    /// Places the caret where the pointer landed.
    pub fn reposition(&mut self) {
        self.state.switch_mode(Mode::Normal);

        let position = self.buf.cursor();
        let head = scan::line_start(self.buf, position);
        if position == head && scan::line_length(self.buf, position) == 0 {
            self.buf.insert_at(" ", position, InsertMode::Plain);
            self.buf.select(position, position + 1);
            return;
        }
        match self.buf.char_at(position) {
            None | Some(LINE_BREAK) => self.buf.select(position.saturating_sub(1), position),
            Some(_) => self.buf.select(position, position + 1),
        }
    }
}
