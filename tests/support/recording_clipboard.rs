use std::cell::RefCell;
use std::rc::Rc;

use modal_field::traits::Clipboard;

/// A clipboard whose writes stay visible to the test after the engine takes
/// ownership of it.
#[derive(Default, Debug, Clone)]
pub struct RecordingClipboard {
    writes: Rc<RefCell<Vec<String>>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn get(&mut self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    fn set(&mut self, text: String) {
        self.writes.borrow_mut().push(text);
    }
}
