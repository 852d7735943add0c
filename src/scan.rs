//! Line and word arithmetic over a [`TextBuffer`].
//!
//! Every function is a pure query. Scans that run off either end of the text
//! stop at `0` or at `len()` instead of failing.

use crate::traits::TextBuffer;
use crate::types::Position;

pub const LINE_BREAK: char = '\n';

/// The three kinds of characters Vim's `word` motion distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters (any script), digits and underscore.
    Identifier,
    /// Any other visible character.
    Symbol,
    Whitespace,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_alphanumeric() || c == '_' {
            CharClass::Identifier
        } else {
            CharClass::Symbol
        }
    }
}

fn is_break(c: char) -> bool {
    c == LINE_BREAK
}

pub fn is_break_at<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> bool {
    buf.char_at(pos) == Some(LINE_BREAK)
}

/// The character just before `pos`.
pub fn char_before<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<char> {
    pos.checked_sub(1).and_then(|p| buf.char_at(p))
}

/// The character just after `pos`.
pub fn char_after<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<char> {
    buf.char_at(pos + 1)
}

/// Index right after the closest line break before `pos`, or 0.
fn break_before<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Position {
    (0..pos.min(buf.len()))
        .rev()
        .find(|&i| buf.char_at(i).is_some_and(is_break))
        .map_or(0, |i| i + 1)
}

/// First index at or after `pos` whose character satisfies `pred`, or `len()`.
pub fn find_after<B, F>(buf: &B, pos: Position, pred: F) -> Position
where
    B: TextBuffer + ?Sized,
    F: Fn(char) -> bool,
{
    let len = buf.len();
    (pos..len)
        .find(|&i| buf.char_at(i).is_some_and(&pred))
        .unwrap_or(len)
}

pub fn line_start<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Position {
    break_before(buf, pos)
}

/// The line break ending the line at `pos`, or `len()` on the last line.
///
/// A position that is itself a line break is its own line end.
pub fn line_end<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Position {
    if is_break_at(buf, pos) {
        return pos;
    }
    find_after(buf, pos, is_break)
}

pub fn line_length<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> usize {
    find_after(buf, pos, is_break).saturating_sub(break_before(buf, pos))
}

/// 1-based column of `pos` within its line.
pub fn column<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> usize {
    pos.saturating_sub(line_start(buf, pos)) + 1
}

/// Start of the line after the one holding `pos`; `None` on the last line.
pub fn next_line_start<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<Position> {
    let brk = find_after(buf, pos, is_break);
    (brk < buf.len()).then_some(brk + 1)
}

pub fn next_line_end<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<Position> {
    next_line_start(buf, pos).map(|start| find_after(buf, start, is_break))
}

/// The line break ending the previous line; `None` on the first line.
pub fn prev_line_end<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<Position> {
    line_start(buf, pos).checked_sub(1)
}

pub fn prev_line_start<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<Position> {
    prev_line_end(buf, pos).map(|end| break_before(buf, end))
}

/// End-exclusive boundary of the token at `pos`, which is also where the next
/// word starts.
///
/// Returns `len()` when the scan runs out of text.
pub fn word_boundary<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Position {
    let class = buf.char_at(pos).map_or(CharClass::Whitespace, CharClass::of);

    let target: fn(char) -> bool = match class {
        CharClass::Identifier => |c| CharClass::of(c) != CharClass::Identifier,
        CharClass::Symbol => |c| CharClass::of(c) == CharClass::Identifier,
        CharClass::Whitespace => return find_after(buf, pos, |c| !c.is_whitespace()),
    };

    let first_space = find_after(buf, pos, char::is_whitespace);
    let first_visible = find_after(buf, first_space, |c| !c.is_whitespace());
    let class_change = find_after(buf, pos, |c| target(c) && !c.is_whitespace());

    if class_change - pos < first_space - pos {
        class_change
    } else {
        first_visible
    }
}

/// Where the next word starts, if there is one.
pub fn next_word<B: TextBuffer + ?Sized>(buf: &B, pos: Position) -> Option<Position> {
    let boundary = word_boundary(buf, pos);
    (boundary < buf.len()).then_some(boundary)
}
