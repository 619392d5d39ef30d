//! Application-level messages.
//!
//! Messages are queued on the app's channel and handled in order by the main
//! loop, after the terminal event that produced them.

use crate::demo::DemoDialog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    // === Lifecycle ===
    /// Periodic tick
    Tick,
    /// Render the UI
    Render,
    /// Terminal resized
    Resize(u16, u16),
    /// Suspend the application (Ctrl+Z)
    Suspend,
    /// Resume from suspension
    Resume,
    /// Quit the application
    Quit,
    /// Clear and redraw the screen
    ClearScreen,

    // === Dialogs ===
    /// Present one of the demo dialogs
    OpenDialog(DemoDialog),
    /// Content was mounted into the dialog host and can receive focus
    DialogRendered,
    /// Close the active dialog
    CloseDialog,
    /// Show a line in the status bar
    Status(String),
}
