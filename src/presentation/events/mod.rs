//! Event handling.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// Result of key handling on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing further to do.
    Continue,
    /// Open another screen.
    Navigate(crate::domain::Route),
    /// Exit application.
    Exit,
    /// Start a backend request for the current screen.
    Request(ScreenRequest),
}

/// Backend operation a data screen asks the shell to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRequest {
    /// Reload the screen's lists.
    Fetch,
    /// Submit the form as create or update.
    Save,
    /// Delete one record.
    Delete(crate::domain::EntityId),
}

/// Returns the key of a press event; repeats and releases are ignored.
#[must_use]
pub fn key_press(event: &Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(*key),
        _ => None,
    }
}
