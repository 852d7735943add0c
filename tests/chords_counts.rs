use std::time::Duration;

use modal_field::{
    Action, Binding, Config, Engine, KeyCode, Keymap, KeymapError, Mode, Trigger,
};

mod support;
use support::harness::Harness;

#[test]
fn test_chord_within_window() {
    let mut h = Harness::new("one\ntwo", 0, 1);
    h.keys("dd");
    assert_eq!(h.text(), "two");
}

#[test]
fn test_chord_after_window_is_two_keys() {
    let mut h = Harness::new("one\ntwo", 0, 1);
    h.keys("d");
    h.pause();
    h.keys("d");
    assert_eq!(h.text(), "one\ntwo");
}

#[test]
fn test_custom_chord_window() {
    let config = Config::builder()
        .chord_window(Some(Duration::from_millis(50)))
        .build()
        .unwrap();
    let mut h = Harness::with_config(config, "one\ntwo", 4, 5);

    h.keys("g");
    h.now += Duration::from_millis(60);
    h.keys("g");
    assert_eq!(h.sel(), (4, 5));

    h.keys("gg");
    assert_eq!(h.sel(), (0, 1));
}

#[test]
fn test_unbounded_chord_window() {
    let config = Config::builder().chord_window(None).build().unwrap();
    let mut h = Harness::with_config(config, "one\ntwo", 4, 5);
    h.keys("g");
    h.now += Duration::from_secs(30);
    h.keys("g");
    assert_eq!(h.sel(), (0, 1));
}

#[test]
fn test_count_before_chord() {
    let mut h = Harness::new("a\nb\nc\nd", 0, 1);
    h.keys("3dd");
    assert_eq!(h.text(), "d");
    assert_eq!(h.register().as_deref(), Some("a\nb\nc"));
}

#[test]
fn test_count_is_kept_through_lone_d() {
    let mut h = Harness::new("hello world", 0, 1);
    h.keys("2d");
    assert_eq!(h.engine.snapshot().pending_count, Some(2));

    h.pause();
    h.keys("l");
    assert_eq!(h.sel(), (2, 3));
    assert_eq!(h.engine.snapshot().pending_count, None);
}

#[test]
fn test_count_cleared_by_unbound_key() {
    let mut h = Harness::new("hello world", 0, 1);
    h.keys("4q");
    assert_eq!(h.engine.snapshot().pending_count, None);
    h.keys("l");
    assert_eq!(h.sel(), (1, 2));
}

#[test]
fn test_escape_drops_count() {
    let mut h = Harness::new("hello world", 0, 1);
    h.keys("5");
    h.esc();
    h.keys("l");
    assert_eq!(h.sel(), (1, 2));
}

#[test]
fn test_uppercase_never_chords() {
    let mut h = Harness::new("ab\ncd\nef", 0, 1);
    h.keys("GG");
    assert_eq!(h.sel(), (6, 7));
}

#[test]
fn test_modified_keys_break_chords() {
    let mut h = Harness::new("one\ntwo", 0, 1);
    h.keys("d");
    h.key(modal_field::KeyEvent::new(
        KeyCode::Char('x'),
        modal_field::Modifiers::CTRL,
    ));
    h.keys("d");
    assert_eq!(h.text(), "ne\ntwo");
}

#[test]
fn test_custom_chord_binding() {
    let mut keymap = Keymap::vim();
    keymap
        .bind(
            Trigger::Chord(KeyCode::Char('j'), KeyCode::Char('k')),
            Binding::new("jk").action(Action::ToggleVisual),
        )
        .unwrap();
    let engine = Engine::builder().keymap(keymap).build().unwrap();
    let mut h = Harness::with_engine(engine, "ab\ncd", 0, 1);

    h.keys("jk");
    assert_eq!(h.mode(), Mode::Visual);
    assert_eq!(h.sel(), (3, 4));
}

#[test]
fn test_rebinding_is_rejected() {
    let mut keymap = Keymap::vim();
    let err = keymap
        .bind(
            Trigger::Key(KeyCode::Char('x')),
            Binding::new("x").action(Action::Undo),
        )
        .unwrap_err();
    assert_eq!(err, KeymapError::AlreadyBound(Trigger::Key(KeyCode::Char('x'))));
}

#[test]
fn test_empty_keymap_swallows_everything() {
    let engine = Engine::builder().keymap(Keymap::empty()).build().unwrap();
    let mut h = Harness::with_engine(engine, "abc", 0, 1);
    let outcome = h.key('l');
    assert!(outcome.suppress_default);
    assert_eq!(h.sel(), (0, 1));
}

#[test]
fn test_builder_binding_extends_vim_keymap() {
    let engine = Engine::builder()
        .bind(
            Trigger::Key(KeyCode::Char('q')),
            Binding::new("q").action(Action::LastLine),
        )
        .build()
        .unwrap();
    let mut h = Harness::with_engine(engine, "ab\ncd", 0, 1);
    h.keys("q");
    assert_eq!(h.sel(), (3, 4));
    h.keys("gg");
    assert_eq!(h.sel(), (0, 1));
}

#[test]
fn test_builder_rejects_escape_binding() {
    let err = Engine::builder()
        .bind(
            Trigger::Key(KeyCode::Esc),
            Binding::new("esc").action(Action::Undo),
        )
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        modal_field::Error::Keymap(KeymapError::Reserved(Trigger::Key(KeyCode::Esc)))
    ));
}

#[test]
fn test_huge_count_returns_promptly() {
    let mut h = Harness::new("a\nb\nc", 0, 1);
    h.keys("4294967295j");
    assert_eq!(h.sel(), (4, 5));

    h.keys("4294967295dd");
    assert_eq!(h.text(), "a\nb\n");
}
