//! UI building blocks shared by the dialog host and the app shell.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::Theme;

/// Result of handling an input event.
///
/// - `Ignored` - The handler didn't recognize or handle this input
/// - `Consumed` - The input was handled but produced no event, it will not be propagated further
/// - `Event(E)` - The input was handled and produced an event, it will not be propagated further
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> EventResult<E> {
    /// Returns true if the input was consumed (either with or without an event).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns the event if present.
    pub fn event(self) -> Option<E> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components handle input and emit generic outputs; what an output means is
/// up to the parent.
pub trait Component {
    /// The output type produced by this component.
    type Output;

    /// Handle a key event.
    ///
    /// Returns `Ok(EventResult::...)` where:
    /// - `Ignored` - key was not handled, parent should process it
    /// - `Consumed` - key was handled but produced no output
    /// - `Event(output)` - key was handled and produced an output
    ///
    /// Returns `Err(...)` if an error occurred during handling.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Handle a mouse event. Same contract as [`Component::handle_key`].
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<EventResult<Self::Output>> {
        _ = mouse;
        Ok(EventResult::Ignored)
    }

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_result_helpers() {
        assert!(!EventResult::<()>::Ignored.is_consumed());
        assert!(EventResult::<()>::Consumed.is_consumed());

        let result: EventResult<u8> = 7.into();
        assert!(result.is_consumed());
        assert_eq!(result.event(), Some(7));
        assert_eq!(EventResult::<u8>::Consumed.event(), None);
    }
}
