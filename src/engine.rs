use std::collections::HashMap;
use std::time::Instant;

use crate::commands::{CommandEngine, Followup};
use crate::config::Config;
use crate::error::Error;
use crate::history::UndoHistory;
use crate::key::{KeyEvent, Trigger};
use crate::keymap::{Binding, Keymap};
use crate::register::Register;
use crate::router::{KeyRouter, Route};
use crate::state::EditorState;
use crate::timer::{Task, TimerQueue};
use crate::traits::TextBuffer;
use crate::types::{FieldId, Mode, Position};

/// Shown to the user when a command key arrives through an input method.
pub const COMPOSITION_MESSAGE: &str =
    "Execution failure! Please use the vim instructions in the English input method.";

/// What the host should do with the key event it just forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Stop the widget from applying the key itself.
    pub suppress_default: bool,
    /// Text for the host to display, if any.
    pub message: Option<&'static str>,
}

impl KeyOutcome {
    fn pass() -> Self {
        Self {
            suppress_default: false,
            message: None,
        }
    }

    fn suppress() -> Self {
        Self {
            suppress_default: true,
            message: None,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldState {
    editor: EditorState,
    history: UndoHistory,
}

impl FieldState {
    fn new(undo_limit: usize) -> Self {
        Self {
            editor: EditorState::new(),
            history: UndoHistory::new(undo_limit),
        }
    }
}

/// The modal editing layer for every field a host attaches.
///
/// The engine owns all per-field state and the shared register. Buffers are
/// only borrowed for the duration of a call.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    router: KeyRouter,
    fields: HashMap<FieldId, FieldState>,
    active: FieldId,
    register: Register,
    timers: TimerQueue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub field: FieldId,
    pub mode: Mode,
    pub pending_count: Option<u32>,
    pub visual_anchor: Option<Position>,
    pub visual_cursor: Option<Position>,
    pub replace_pending: bool,
    pub undo_depth: usize,
    pub pending_timers: usize,
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: Config,
    keymap: Option<Keymap>,
    extra: Vec<(Trigger, Binding)>,
    register: Register,
}

impl EngineBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the stock Vim bindings.
    pub fn keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = Some(keymap);
        self
    }

    /// Adds a binding on top of the keymap. Conflicts are reported by
    /// [`EngineBuilder::build`].
    pub fn bind(mut self, trigger: Trigger, binding: Binding) -> Self {
        self.extra.push((trigger, binding));
        self
    }

    /// Backs the yank register with a different clipboard.
    pub fn register(mut self, register: Register) -> Self {
        self.register = register;
        self
    }

    pub fn build(mut self) -> Result<Engine, Error> {
        self.config.validate()?;
        if !self.extra.is_empty() {
            let mut keymap = self.keymap.take().unwrap_or_else(Keymap::vim);
            for (trigger, binding) in std::mem::take(&mut self.extra) {
                keymap.bind(trigger, binding)?;
            }
            self.keymap = Some(keymap);
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> Engine {
        let keymap = self.keymap.unwrap_or_else(Keymap::vim);
        Engine {
            router: KeyRouter::new(keymap, &self.config),
            config: self.config,
            fields: HashMap::new(),
            active: FieldId::default(),
            register: self.register,
            timers: TimerQueue::default(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().assemble()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn active_field(&self) -> FieldId {
        self.active
    }

    /// Mode of the focused field.
    pub fn mode(&self) -> Mode {
        self.field_mode(self.active)
    }

    pub fn field_mode(&self, field: FieldId) -> Mode {
        self.fields
            .get(&field)
            .map_or(Mode::Normal, |state| state.editor.mode())
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn register_mut(&mut self) -> &mut Register {
        &mut self.register
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let field = self.fields.get(&self.active);
        EngineSnapshot {
            field: self.active,
            mode: self.mode(),
            pending_count: self.router.pending_count(),
            visual_anchor: field.and_then(|f| f.editor.visual_anchor()),
            visual_cursor: field.and_then(|f| f.editor.visual_cursor()),
            replace_pending: field.is_some_and(|f| f.editor.replace_pending()),
            undo_depth: field.map_or(0, |f| f.history.len()),
            pending_timers: self.timers.len(),
        }
    }

    /// Call when a field gains focus. Its mode is kept; visual anchors, a
    /// pending replace and any half-typed count or chord are dropped.
    pub fn focus_changed(&mut self, field: FieldId) {
        tracing::debug!(?field, "focus");
        self.active = field;
        self.router.reset();
        let undo_limit = self.config.undo_limit;
        self.fields
            .entry(field)
            .or_insert_with(|| FieldState::new(undo_limit))
            .editor
            .reset_transient();
    }

    /// Handles a key press on the focused field.
    pub fn key_down<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        event: KeyEvent,
        now: Instant,
    ) -> KeyOutcome {
        let field = self.active;
        let undo_limit = self.config.undo_limit;
        let state = self
            .fields
            .entry(field)
            .or_insert_with(|| FieldState::new(undo_limit));

        match self.router.route(event, now, &state.editor) {
            Route::Passthrough => KeyOutcome::pass(),
            Route::Text => {
                let position = buf.cursor().saturating_sub(1);
                state.history.record(buf.text(), position);
                KeyOutcome::pass()
            }
            Route::Replace => {
                state.editor.replace_pending = false;
                state.history.record(buf.text(), buf.cursor());
                self.timers.schedule(
                    now + self.config.replace_repair_delay,
                    field,
                    Task::RepairAfterReplace,
                );
                KeyOutcome::pass()
            }
            Route::Rejected => {
                tracing::debug!(mode = ?state.editor.mode(), "rejected input method composition");
                KeyOutcome {
                    suppress_default: true,
                    message: Some(COMPOSITION_MESSAGE),
                }
            }
            Route::Escape => {
                CommandEngine::new(
                    &mut state.editor,
                    buf,
                    &mut self.register,
                    &mut state.history,
                )
                .switch_to_normal();
                KeyOutcome::pass()
            }
            Route::Absorbed | Route::Unbound => KeyOutcome::suppress(),
            Route::Dispatch(dispatch) => {
                if dispatch.records_undo {
                    state.history.record(buf.text(), buf.cursor());
                }
                tracing::debug!(
                    command = dispatch.name,
                    action = ?dispatch.action,
                    count = dispatch.count,
                    "dispatch"
                );

                let followup = CommandEngine::new(
                    &mut state.editor,
                    buf,
                    &mut self.register,
                    &mut state.history,
                )
                .run(dispatch.action, dispatch.count);

                if followup == Followup::EnterInsert {
                    let delay = self.config.mode_switch_delay;
                    if delay.is_zero() {
                        state.editor.switch_mode(Mode::Insert);
                    } else {
                        self.timers.schedule(now + delay, field, Task::EnterInsert);
                    }
                }
                KeyOutcome::suppress()
            }
        }
    }

    /// Handles a pointer click that moved the caret of the focused field.
    pub fn click<B: TextBuffer + ?Sized>(&mut self, buf: &mut B) {
        let undo_limit = self.config.undo_limit;
        let state = self
            .fields
            .entry(self.active)
            .or_insert_with(|| FieldState::new(undo_limit));
        if !state.editor.mode().is_command_mode() {
            return;
        }
        CommandEngine::new(
            &mut state.editor,
            buf,
            &mut self.register,
            &mut state.history,
        )
        .reposition();
    }

    /// Runs every deferred task that is due. `buf` must be the focused field.
    ///
    /// Returns how many tasks ran.
    pub fn poll_timers<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        let fired = due.len();
        for timer in due {
            let Some(state) = self.fields.get_mut(&timer.field) else {
                continue;
            };
            match timer.task {
                Task::EnterInsert => state.editor.switch_mode(Mode::Insert),
                Task::RepairAfterReplace => {
                    if timer.field != self.active {
                        tracing::trace!(field = ?timer.field, "skipping repair on unfocused field");
                        continue;
                    }
                    CommandEngine::new(
                        &mut state.editor,
                        buf,
                        &mut self.register,
                        &mut state.history,
                    )
                    .select_prev_char();
                }
            }
        }
        fired
    }

    /// Whether any deferred task is still waiting.
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}
