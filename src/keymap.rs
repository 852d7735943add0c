use std::collections::HashMap;

use crate::error::KeymapError;
use crate::key::{KeyCode, Modifiers, Trigger};
use crate::types::Mode;

/// Every command a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectNextChar,
    SelectPrevChar,
    SelectNextLine,
    SelectPrevLine,
    LineHead,
    LineTail,
    FirstLine,
    LastLine,
    NextWord,
    Append,
    AppendAtLineTail,
    Insert,
    InsertAtLineHead,
    OpenLineBelow,
    OpenLineAbove,
    ReplaceChar,
    CopySelection,
    CopyLine,
    CopyWord,
    DeleteSelection,
    DeleteLine,
    DeleteWord,
    /// `X`: the character before the cursor, or the whole line in visual mode.
    DeleteCharOrLine,
    PasteAfter,
    PasteBefore,
    Undo,
    ToggleVisual,
}

/// A keymap entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: &'static str,
    /// Only fire in this mode; `None` fires in any command mode.
    pub mode: Option<Mode>,
    /// Snapshot the text for undo before running.
    pub records_undo: bool,
    actions: HashMap<Modifiers, Action>,
}

impl Binding {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            mode: None,
            records_undo: false,
            actions: HashMap::new(),
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.insert(Modifiers::empty(), action);
        self
    }

    pub fn shifted(mut self, action: Action) -> Self {
        self.actions.insert(Modifiers::SHIFT, action);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn records_undo(mut self) -> Self {
        self.records_undo = true;
        self
    }

    /// The action for the given modifiers. Only SHIFT is told apart.
    pub fn resolve(&self, mods: Modifiers) -> Option<Action> {
        self.actions.get(&(mods & Modifiers::SHIFT)).copied()
    }

    pub fn allows(&self, mode: Mode) -> bool {
        self.mode.is_none_or(|required| required == mode)
    }
}

/// Maps keys and chords to [`Binding`]s.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<Trigger, Binding>,
}

impl Keymap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a binding, rejecting unusable or conflicting ones.
    pub fn bind(&mut self, trigger: Trigger, binding: Binding) -> Result<(), KeymapError> {
        if binding.actions.is_empty() {
            return Err(KeymapError::NoAction(trigger));
        }
        let reserved = match trigger {
            Trigger::Key(code) => code == KeyCode::Esc,
            Trigger::Chord(first, second) => first == KeyCode::Esc || second == KeyCode::Esc,
        };
        if reserved {
            return Err(KeymapError::Reserved(trigger));
        }
        if self.bindings.contains_key(&trigger) {
            return Err(KeymapError::AlreadyBound(trigger));
        }
        self.bindings.insert(trigger, binding);
        Ok(())
    }

    pub fn get(&self, trigger: &Trigger) -> Option<&Binding> {
        self.bindings.get(trigger)
    }

    pub fn contains(&self, trigger: &Trigger) -> bool {
        self.bindings.contains_key(trigger)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Trigger, &Binding)> {
        self.bindings.iter()
    }

    /// The stock Vim bindings.
    pub fn vim() -> Self {
        use Action::*;
        use KeyCode::Char;

        let key = Trigger::Key;
        let chord = |a, b| Trigger::Chord(Char(a), Char(b));

        let table = [
            // Navigation keys
            (key(KeyCode::End), Binding::new("End").action(LineTail)),
            (key(KeyCode::Home), Binding::new("Home").action(LineHead)),
            (key(KeyCode::Left), Binding::new("Left").action(SelectPrevChar)),
            (key(KeyCode::Up), Binding::new("Up").action(SelectPrevLine)),
            (key(KeyCode::Right), Binding::new("Right").action(SelectNextChar)),
            (key(KeyCode::Down), Binding::new("Down").action(SelectNextLine)),
            (key(KeyCode::Insert), Binding::new("Insert").action(Insert)),
            (
                key(KeyCode::Delete),
                Binding::new("Delete").action(DeleteSelection).records_undo(),
            ),
            (key(KeyCode::Enter), Binding::new("enter").action(SelectNextLine)),
            // Vim commands
            (key(Char('0')), Binding::new("0").action(LineHead)),
            (key(Char('4')), Binding::new("$").shifted(LineTail)),
            (key(Char('$')), Binding::new("$").action(LineTail)),
            (
                key(Char('a')),
                Binding::new("a").action(Append).shifted(AppendAtLineTail),
            ),
            (
                key(Char('i')),
                Binding::new("i").action(Insert).shifted(InsertAtLineHead),
            ),
            (
                key(Char('o')),
                Binding::new("o")
                    .action(OpenLineBelow)
                    .shifted(OpenLineAbove)
                    .records_undo(),
            ),
            (key(Char('r')), Binding::new("r").action(ReplaceChar)),
            (key(Char('j')), Binding::new("j").action(SelectNextLine)),
            (key(Char('k')), Binding::new("k").action(SelectPrevLine)),
            (key(Char('h')), Binding::new("h").action(SelectPrevChar)),
            (key(Char('l')), Binding::new("l").action(SelectNextChar)),
            (
                key(Char('p')),
                Binding::new("p")
                    .action(PasteAfter)
                    .shifted(PasteBefore)
                    .records_undo(),
            ),
            (key(Char('u')), Binding::new("u").action(Undo)),
            (
                key(Char('y')),
                Binding::new("y").action(CopySelection).mode(Mode::Visual),
            ),
            (chord('y', 'y'), Binding::new("yy").action(CopyLine)),
            (chord('y', 'w'), Binding::new("yw").action(CopyWord)),
            (
                key(Char('v')),
                Binding::new("v").action(ToggleVisual).shifted(ToggleVisual),
            ),
            (
                key(Char('x')),
                Binding::new("x")
                    .action(DeleteSelection)
                    .shifted(DeleteCharOrLine)
                    .records_undo(),
            ),
            (
                key(Char('d')),
                Binding::new("d")
                    .action(DeleteSelection)
                    .mode(Mode::Visual)
                    .records_undo(),
            ),
            (
                chord('d', 'd'),
                Binding::new("dd").action(DeleteLine).records_undo(),
            ),
            (
                chord('d', 'w'),
                Binding::new("dw").action(DeleteWord).records_undo(),
            ),
            (key(Char('g')), Binding::new("G").shifted(LastLine)),
            (chord('g', 'g'), Binding::new("gg").action(FirstLine)),
            (
                key(Char('w')),
                Binding::new("w").action(NextWord).shifted(NextWord),
            ),
        ];

        Self {
            bindings: table.into_iter().collect(),
        }
    }
}
