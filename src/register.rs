//! The single yank/delete register shared by every field.

use crate::traits::Clipboard;

/// An in-process clipboard slot.
#[derive(Default, Debug, Clone)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set(&mut self, text: String) {
        self.content = Some(text);
    }
}

/// The operating system clipboard.
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, crate::error::ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn get(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(error = %err, "reading system clipboard failed");
                None
            }
        }
    }

    fn set(&mut self, text: String) {
        if let Err(err) = self.inner.set_text(text) {
            tracing::warn!(error = %err, "writing system clipboard failed");
        }
    }
}

/// The yank register plus whether its content should be pasted as a line.
pub struct Register {
    slot: Box<dyn Clipboard>,
    line_wise: bool,
}

impl Default for Register {
    fn default() -> Self {
        Self::new(Box::new(MemoryClipboard::new()))
    }
}

impl std::fmt::Debug for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Register")
            .field("line_wise", &self.line_wise)
            .finish_non_exhaustive()
    }
}

impl Register {
    pub fn new(slot: Box<dyn Clipboard>) -> Self {
        Self {
            slot,
            line_wise: false,
        }
    }

    /// Current content; `None` when nothing was ever yanked.
    pub fn text(&mut self) -> Option<String> {
        self.slot.get()
    }

    pub fn set_text(&mut self, text: String) {
        tracing::debug!(len = text.len(), line_wise = self.line_wise, "register write");
        self.slot.set(text);
    }

    pub fn line_wise(&self) -> bool {
        self.line_wise
    }

    pub fn set_line_wise(&mut self, line_wise: bool) {
        self.line_wise = line_wise;
    }
}
