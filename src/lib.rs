pub mod buffer;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod key;
pub mod keymap;
pub mod register;
pub mod router;
pub mod scan;
pub mod state;
pub mod timer;
pub mod traits;
pub mod types;

pub use crate::buffer::MemoryBuffer;
pub use crate::commands::{CommandEngine, Followup};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::engine::{COMPOSITION_MESSAGE, Engine, EngineBuilder, EngineSnapshot, KeyOutcome};
#[cfg(feature = "clipboard")]
pub use crate::error::ClipboardError;
pub use crate::error::{ConfigError, Error, KeymapError};
pub use crate::history::UndoHistory;
pub use crate::key::{KeyCode, KeyEvent, Modifiers, Trigger};
pub use crate::keymap::{Action, Binding, Keymap};
#[cfg(feature = "clipboard")]
pub use crate::register::SystemClipboard;
pub use crate::register::{MemoryClipboard, Register};
pub use crate::router::{Dispatch, KeyRouter, Route};
pub use crate::state::EditorState;
pub use crate::types::{FieldId, Mode, Position, UndoEntry};
pub use crate::traits::{Clipboard, InsertMode, TextBuffer};
