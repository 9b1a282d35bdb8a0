//! Event system - keyboard, pointer, and terminal events

use anyhow::Result;
use std::time::Duration;

/// Keyboard key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
    Enter,
    Tab,
    Esc,
    Null,
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event types, all carrying cell coordinates (col, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Press(MouseButton, u16, u16),
    Drag(u16, u16),
    Release(u16, u16),
    ScrollUp(u16, u16),
    ScrollDown(u16, u16),
}

/// UI events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(Key),
    /// Pointer event
    Mouse(MouseEvent),
    /// Terminal resized (new cols, new rows)
    Resize(u16, u16),
    /// Focus gained
    FocusGained,
    /// Focus lost
    FocusLost,
}

/// Event handler trait for components
pub trait EventHandler {
    /// Handle an event, return true if consumed (stops propagation)
    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }

    /// Called when component gains focus
    fn on_focus(&mut self) {}

    /// Called when component loses focus
    fn on_blur(&mut self) {}
}

/// Event polling and conversion from crossterm events
///
/// Enables raw mode and mouse capture on construction; both are restored
/// when the poller is dropped.
pub struct EventPoller {
    _enabled: bool,
}

impl EventPoller {
    /// Create a new event poller
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        // Mouse capture is required for swipe gestures; focus change is
        // best-effort and some terminals lack both.
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::EnableMouseCapture,
            crossterm::event::EnableFocusChange,
        );

        Ok(EventPoller { _enabled: true })
    }

    /// Block and wait for the next event - preferred for event-driven apps
    pub fn read(&self) -> Result<Event> {
        loop {
            if let Some(event) = convert_crossterm_event(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }

    /// Poll for the next event with a timeout
    pub fn poll(&self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            Ok(convert_crossterm_event(crossterm::event::read()?))
        } else {
            Ok(None)
        }
    }
}

impl Drop for EventPoller {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::event::DisableFocusChange,
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Convert a crossterm event to our Event type
///
/// Returns None for events we do not surface (pastes, pointer motion
/// without a held button).
fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
    use crossterm::event::{Event as CEvent, KeyEvent, MouseEventKind};

    match event {
        CEvent::Key(KeyEvent {
            code, modifiers, ..
        }) => Some(Event::Key(convert_key(code, modifiers))),
        CEvent::Mouse(me) => {
            let (col, row) = (me.column, me.row);
            let mouse_event = match me.kind {
                MouseEventKind::Down(btn) => {
                    let button = match btn {
                        crossterm::event::MouseButton::Left => MouseButton::Left,
                        crossterm::event::MouseButton::Right => MouseButton::Right,
                        crossterm::event::MouseButton::Middle => MouseButton::Middle,
                    };
                    MouseEvent::Press(button, col, row)
                }
                MouseEventKind::Drag(_) => MouseEvent::Drag(col, row),
                MouseEventKind::Up(_) => MouseEvent::Release(col, row),
                MouseEventKind::ScrollUp => MouseEvent::ScrollUp(col, row),
                MouseEventKind::ScrollDown => MouseEvent::ScrollDown(col, row),
                _ => return None,
            };
            Some(Event::Mouse(mouse_event))
        }
        CEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        CEvent::FocusGained => Some(Event::FocusGained),
        CEvent::FocusLost => Some(Event::FocusLost),
        CEvent::Paste(_) => None,
    }
}

/// Convert a crossterm key code to our Key type
fn convert_key(code: crossterm::event::KeyCode, mods: crossterm::event::KeyModifiers) -> Key {
    use crossterm::event::{KeyCode, KeyModifiers};

    if mods.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = code {
            return Key::Ctrl(c);
        }
    }

    if mods.contains(KeyModifiers::ALT) {
        if let KeyCode::Char(c) = code {
            return Key::Alt(c);
        }
    }

    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_variants() {
        assert_eq!(Key::Char('a'), Key::Char('a'));
        assert_ne!(Key::Char('a'), Key::Ctrl('a'));
    }

    #[test]
    fn test_mouse_event_coordinates() {
        let e = Event::Mouse(MouseEvent::Press(MouseButton::Left, 12, 3));
        match e {
            Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row)) => {
                assert_eq!((col, row), (12, 3));
            }
            other => panic!("expected left press, got {:?}", other),
        }
    }
}
