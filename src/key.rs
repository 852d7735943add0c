/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    /// A character key. Hosts should normalize to lowercase for consistency.
    /// For example, 'A' should be mapped to 'a' unless SHIFT is held.
    Char(char),
    /// The Escape key, used to return to normal mode from anywhere.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key.
    Backspace,
    /// The Tab key. Passed through untouched by default.
    Tab,
    Delete,
    Insert,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
    /// A function key, `F(1)` through `F(12)`.
    F(u8),
    /// A keystroke that belongs to an ongoing IME composition.
    ///
    /// Browsers report these with the sentinel keycode 229. Commands typed
    /// through an input method cannot be interpreted, so the engine rejects
    /// them outside insert mode.
    Composition,
}

impl KeyCode {
    /// The decimal value of a digit key, if this is one.
    pub fn digit(self) -> Option<u32> {
        match self {
            KeyCode::Char(c) => c.to_digit(10),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
///
/// This represents a single key press, including any modifier keys held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// A key press without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Folds an uppercase ASCII letter into its lowercase key plus SHIFT.
    ///
    /// Hosts that report `Char('A')` and hosts that report `Char('a')` with
    /// SHIFT held end up with the same event.
    pub fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                mods: self.mods | Modifiers::SHIFT,
            },
            _ => self,
        }
    }

    pub fn shifted(&self) -> bool {
        self.mods.contains(Modifiers::SHIFT)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::plain(KeyCode::Char(c)).normalized()
    }
}

/// What a keymap entry is bound to: a single key or a two-key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Key(KeyCode),
    /// Two keys pressed one after the other, like `d d`.
    Chord(KeyCode, KeyCode),
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Key(code) => write!(f, "{code:?}"),
            Trigger::Chord(first, second) => write!(f, "{first:?} {second:?}"),
        }
    }
}
