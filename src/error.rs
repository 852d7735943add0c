use thiserror::Error;

use crate::key::{KeyCode, Trigger};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("undo history limit must be at least 1")]
    ZeroUndoLimit,
    #[error("{0:?} cannot be passed through, it is needed to leave insert mode")]
    ReservedPassthrough(KeyCode),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("binding `{0}` has no action")]
    NoAction(Trigger),
    #[error("`{0}` is reserved and cannot be bound")]
    Reserved(Trigger),
    #[error("`{0}` is already bound")]
    AlreadyBound(Trigger),
}

#[cfg(feature = "clipboard")]
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

/// Any error the crate can produce while being set up.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Keymap(#[from] KeymapError),
    #[cfg(feature = "clipboard")]
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
