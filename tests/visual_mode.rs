use modal_field::{Mode, TextBuffer};

mod support;
use support::harness::Harness;

#[test]
fn test_v_enters_visual_with_anchor() {
    let mut h = Harness::new("hello world", 4, 5);
    h.keys("v");
    assert_eq!(h.mode(), Mode::Visual);
    let snap = h.engine.snapshot();
    assert_eq!(snap.visual_anchor, Some(4));
    assert_eq!(snap.visual_cursor, None);
    assert_eq!(h.sel(), (4, 5));
}

#[test]
fn test_grow_and_shrink_forward() {
    let mut h = Harness::new("hello world", 0, 1);
    h.keys("vl");
    assert_eq!(h.sel(), (0, 2));
    h.keys("l");
    assert_eq!(h.sel(), (0, 3));
    h.keys("h");
    assert_eq!(h.sel(), (0, 2));
    h.keys("h");
    assert_eq!(h.sel(), (0, 1));
}

#[test]
fn test_grow_backward_then_cross_anchor() {
    let mut h = Harness::new("hello world", 4, 5);
    h.keys("vh");
    assert_eq!(h.sel(), (3, 5));
    h.keys("h");
    assert_eq!(h.sel(), (2, 5));

    h.keys("l");
    assert_eq!(h.sel(), (3, 5));
    h.keys("l");
    assert_eq!(h.sel(), (4, 5));

    // Stepping past the anchor re-anchors and grows forward
    h.keys("l");
    assert_eq!(h.sel(), (4, 6));
    let snap = h.engine.snapshot();
    assert_eq!(snap.visual_anchor, Some(4));
    assert_eq!(snap.visual_cursor, Some(6));
}

#[test]
fn test_shrink_single_char_selection_backward() {
    let mut h = Harness::new("hello world", 4, 5);
    h.keys("vlhh");
    assert_eq!(h.sel(), (3, 5));
}

#[test]
fn test_visual_stops_at_line_break() {
    let mut h = Harness::new("ab\ncd", 0, 1);
    h.keys("vlll");
    assert_eq!(h.sel(), (0, 2));
}

#[test]
fn test_v_again_confirms_moving_end() {
    let mut h = Harness::new("hello world", 4, 5);
    h.keys("vl");
    assert_eq!(h.sel(), (4, 6));
    h.keys("v");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.sel(), (5, 6));
}

#[test]
fn test_v_after_backward_growth() {
    let mut h = Harness::new("hello world", 4, 5);
    h.keys("vhh");
    assert_eq!(h.sel(), (2, 5));
    h.keys("v");
    assert_eq!(h.sel(), (2, 3));
}

#[test]
fn test_escape_collapses_to_one_character() {
    let mut h = Harness::new("hello world", 4, 5);
    h.keys("vl");
    let outcome = h.esc();
    assert!(!outcome.suppress_default);
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.sel(), (4, 5));
    assert_eq!(h.engine.snapshot().visual_anchor, None);

    let mut h = Harness::new("hello", 2, 3);
    h.keys("v");
    h.esc();
    assert_eq!(h.sel(), (2, 3));
}

#[test]
fn test_visual_line_motions() {
    let mut h = Harness::new("abc\ndef", 1, 2);
    h.keys("vj");
    assert_eq!(h.sel(), (1, 6));
    assert_eq!(h.buf.selected_text(), "bc\nde");
}

#[test]
fn test_visual_to_line_tail() {
    let mut h = Harness::new("hello\nx", 1, 2);
    h.keys("v$");
    assert_eq!(h.sel(), (1, 5));
}

#[test]
fn test_visual_first_and_last_line() {
    let mut h = Harness::new("ab\ncd\nef", 3, 4);
    h.keys("vG");
    assert_eq!(h.sel(), (3, 7));
    h.keys("gg");
    assert_eq!(h.sel(), (0, 3));
    assert_eq!(h.engine.snapshot().visual_cursor, Some(0));
}

#[test]
fn test_visual_word_extends() {
    let mut h = Harness::new("foo bar", 0, 1);
    h.keys("vw");
    assert_eq!(h.sel(), (0, 5));
    h.keys("y");
    assert_eq!(h.register().as_deref(), Some("foo b"));
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn test_visual_yank() {
    let mut h = Harness::new("hello", 1, 2);
    h.keys("vlly");
    assert_eq!(h.register().as_deref(), Some("ell"));
    assert!(!h.engine.register().line_wise());
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.text(), "hello");
}

#[test]
fn test_visual_delete() {
    let mut h = Harness::new("hello world", 0, 1);
    h.keys("vlld");
    assert_eq!(h.text(), "lo world");
    assert_eq!(h.register().as_deref(), Some("hel"));
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.sel(), (0, 1));
}

#[test]
fn test_visual_x_deletes_too() {
    let mut h = Harness::new("abcdef", 1, 2);
    h.keys("vlx");
    assert_eq!(h.text(), "adef");
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn test_visual_shift_x_deletes_line() {
    let mut h = Harness::new("one\ntwo\nthree", 5, 6);
    h.keys("vX");
    assert_eq!(h.text(), "one\nthree");
    assert_eq!(h.register().as_deref(), Some("two"));
    assert!(h.engine.register().line_wise());
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn test_d_and_y_alone_do_nothing_in_normal() {
    let mut h = Harness::new("abc", 1, 2);
    h.keys("d");
    h.pause();
    h.keys("y");
    assert_eq!(h.text(), "abc");
    assert_eq!(h.register(), None);
}
