use std::time::{Duration, Instant};

use crate::config::Config;
use crate::key::{KeyCode, KeyEvent, Trigger};
use crate::keymap::{Action, Keymap};
use crate::state::EditorState;
use crate::types::Mode;

#[derive(Debug, Default, Clone)]
struct Counts {
    current: Option<u32>,
}

impl Counts {
    fn push_digit(&mut self, d: u32) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d);
        self.current = Some(next);
    }

    fn take_or(&mut self, default_: u32) -> u32 {
        let v = self.current.take().unwrap_or(default_);
        v.max(1)
    }
}

/// Remembers the previous unmodified key to detect two-key chords.
#[derive(Debug, Default, Clone)]
struct ChordTracker {
    previous: Option<(KeyCode, Instant)>,
}

impl ChordTracker {
    /// The chord formed by the previous key and `event`, if they were close
    /// enough in time. `window: None` accepts any pause.
    fn union(&mut self, event: KeyEvent, now: Instant, window: Option<Duration>) -> Option<Trigger> {
        let previous = self.previous.take();
        if !event.mods.is_empty() {
            return None;
        }
        self.previous = Some((event.code, now));

        let (code, at) = previous?;
        if window.is_some_and(|window| now.saturating_duration_since(at) > window) {
            return None;
        }
        // A doubled key is consumed, so `ddd` is `dd` then a lone `d`
        if code == event.code {
            self.previous = None;
        }
        Some(Trigger::Chord(code, event.code))
    }
}

/// A bound command ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub name: &'static str,
    pub action: Action,
    pub count: u32,
    pub records_undo: bool,
}

/// What a keystroke turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Whitelisted key, not touched at all.
    Passthrough,
    /// Types over the selection to complete a pending replace-char.
    Replace,
    /// Literal text in insert mode, handled by the host.
    Text,
    /// IME composition while in a command mode.
    Rejected,
    Escape,
    /// Swallowed into the pending count.
    Absorbed,
    /// No binding, or the binding does not apply in this mode.
    Unbound,
    Dispatch(Dispatch),
}

/// Turns key events into commands.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    keymap: Keymap,
    chords: ChordTracker,
    counts: Counts,
    chord_window: Option<Duration>,
    passthrough: Vec<KeyCode>,
    debug: bool,
}

impl KeyRouter {
    pub fn new(keymap: Keymap, config: &Config) -> Self {
        Self {
            keymap,
            chords: ChordTracker::default(),
            counts: Counts::default(),
            chord_window: config.chord_window,
            passthrough: config.passthrough.clone(),
            debug: config.debug,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn pending_count(&self) -> Option<u32> {
        self.counts.current
    }

    /// Forgets any pending count and chord prefix.
    pub fn reset(&mut self) {
        self.counts.current = None;
        self.chords.previous = None;
    }

    pub fn route(&mut self, event: KeyEvent, now: Instant, state: &EditorState) -> Route {
        let event = event.normalized();
        let mode = state.mode();

        let route = self.resolve(event, now, state);
        if self.debug {
            tracing::trace!(?event, ?mode, ?route, pending_count = ?self.counts.current, "route");
        }
        route
    }

    fn resolve(&mut self, event: KeyEvent, now: Instant, state: &EditorState) -> Route {
        if self.passthrough.contains(&event.code) {
            return Route::Passthrough;
        }

        let mode = state.mode();
        if !mode.is_command_mode() {
            if event.code == KeyCode::Esc {
                self.reset();
                return Route::Escape;
            }
            return Route::Text;
        }
        if state.replace_pending() {
            return Route::Replace;
        }
        if event.code == KeyCode::Composition {
            return Route::Rejected;
        }
        if event.code == KeyCode::Esc {
            self.reset();
            return Route::Escape;
        }

        let trigger = match self.chords.union(event, now, self.chord_window) {
            Some(chord) if self.keymap.contains(&chord) => chord,
            _ => Trigger::Key(event.code),
        };

        if let Trigger::Key(code) = trigger
            && !event.shifted()
        {
            // Leading zero is the line-head motion, not a count digit
            if let Some(d) = code.digit()
                && (d != 0 || self.counts.current.is_some())
            {
                self.counts.push_digit(d);
                return Route::Absorbed;
            }

            // `d` and `y` open the dd/dw/yy/yw chords; keep the count for them
            if matches!(code, KeyCode::Char('d' | 'y')) {
                let route = self.lookup(trigger, event, mode, 1);
                if matches!(route, Route::Dispatch(_)) {
                    self.counts.current = None;
                }
                return route;
            }
        }

        let count = self.counts.take_or(1);
        self.lookup(trigger, event, mode, count)
    }

    fn lookup(&self, trigger: Trigger, event: KeyEvent, mode: Mode, count: u32) -> Route {
        let Some(binding) = self.keymap.get(&trigger) else {
            return Route::Unbound;
        };
        if !binding.allows(mode) {
            return Route::Unbound;
        }
        let Some(action) = binding.resolve(event.mods) else {
            return Route::Unbound;
        };

        Route::Dispatch(Dispatch {
            name: binding.name,
            action,
            count,
            records_undo: binding.records_undo,
        })
    }
}
