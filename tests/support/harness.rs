use std::time::{Duration, Instant};

use modal_field::{Config, Engine, KeyCode, KeyEvent, KeyOutcome, Mode, Position, TextBuffer};

use super::rope_buffer::RopeBuffer;

/// Time between two simulated keystrokes.
pub const KEY_GAP: Duration = Duration::from_millis(10);

/// Drives an [`Engine`] the way a host widget would: keys the engine does not
/// suppress are typed into the buffer.
pub struct Harness {
    pub engine: Engine,
    pub buf: RopeBuffer,
    pub now: Instant,
}

impl Harness {
    pub fn new(text: &str, start: Position, end: Position) -> Self {
        Self::with_engine(Engine::new(), text, start, end)
    }

    pub fn with_config(config: Config, text: &str, start: Position, end: Position) -> Self {
        let engine = Engine::builder().config(config).build().unwrap();
        Self::with_engine(engine, text, start, end)
    }

    pub fn with_engine(engine: Engine, text: &str, start: Position, end: Position) -> Self {
        Self {
            engine,
            buf: RopeBuffer::new(text).with_selection(start, end),
            now: Instant::now(),
        }
    }

    pub fn key(&mut self, event: impl Into<KeyEvent>) -> KeyOutcome {
        let event = event.into();
        self.now += KEY_GAP;
        let outcome = self.engine.key_down(&mut self.buf, event, self.now);
        if !outcome.suppress_default
            && let KeyCode::Char(c) = event.code
        {
            let c = if event.shifted() { c.to_ascii_uppercase() } else { c };
            self.buf.replace_selection(&c.to_string());
        }
        self.engine.poll_timers(&mut self.buf, self.now);
        outcome
    }

    /// Presses each character in turn.
    pub fn keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.key(c);
        }
    }

    pub fn esc(&mut self) -> KeyOutcome {
        self.key(KeyCode::Esc)
    }

    /// Lets every pending timer fire.
    pub fn settle(&mut self) {
        self.now += Duration::from_millis(200);
        self.engine.poll_timers(&mut self.buf, self.now);
    }

    /// Waits longer than the default chord window.
    pub fn pause(&mut self) {
        self.now += Duration::from_millis(700);
        self.engine.poll_timers(&mut self.buf, self.now);
    }

    pub fn text(&self) -> String {
        self.buf.as_string()
    }

    pub fn sel(&self) -> (Position, Position) {
        self.buf.selection_range()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn register(&mut self) -> Option<String> {
        self.engine.register_mut().text()
    }
}
