//! Application state shared between the dialog service and the app shell.

use std::cell::Cell;
use std::rc::Rc;

/// Dialog slice of the application state.
///
/// The service is the only writer; everything else reads `showing` and
/// passes it down to the overlay host.
#[derive(Debug, Clone, Default)]
pub struct DialogStore {
    showing: Rc<Cell<bool>>,
}

impl DialogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a dialog is currently presented.
    pub fn showing(&self) -> bool {
        self.showing.get()
    }

    pub fn set_showing(&self, showing: bool) {
        self.showing.set(showing);
    }
}
