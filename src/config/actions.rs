#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Suspend,
    OpenConfirm,
    OpenBot,
    OpenUpdate,
}

/// Keys the overlay host reacts to while a dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    FocusNext,
    FocusPrevious,
    Activate,
    Dismiss,
}
