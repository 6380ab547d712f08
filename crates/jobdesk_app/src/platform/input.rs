//! Crossterm events to core messages.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use jobdesk_core::{ClickTarget, Key, KeyInput, Msg};

use super::ui::layout::contains;
use super::ui::HitMap;

/// Normalizes a key press. Ctrl and Super both count as the command modifier.
pub fn key_input(event: &KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    let command = event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    Some(KeyInput { key, command })
}

/// Ctrl+C always quits, whatever owns the keyboard.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.kind != KeyEventKind::Release
        && event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Resolves a mouse event against the regions drawn in the last frame.
pub fn mouse_msg(event: &MouseEvent, hits: &HitMap) -> Option<Msg> {
    let (column, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::ScrollUp => return Some(Msg::Key(KeyInput::plain(Key::Up))),
        MouseEventKind::ScrollDown => return Some(Msg::Key(KeyInput::plain(Key::Down))),
        MouseEventKind::Down(MouseButton::Left) => {}
        _ => return None,
    }

    if let Some((_, command)) = hits
        .toolbar
        .iter()
        .find(|(rect, _)| contains(*rect, column, row))
    {
        return Some(Msg::Command(*command));
    }
    if let Some(surface) = hits.viewer {
        let target = if contains(surface, column, row) {
            ClickTarget::Surface
        } else {
            ClickTarget::Backdrop
        };
        return Some(Msg::ViewerClicked(target));
    }
    if let Some((_, job_id)) = hits.jobs.iter().find(|(rect, _)| contains(*rect, column, row)) {
        return Some(Msg::JobClicked(*job_id));
    }
    hits.files
        .iter()
        .find(|(rect, _)| contains(*rect, column, row))
        .map(|(_, file_id)| Msg::FileClicked(*file_id))
}
