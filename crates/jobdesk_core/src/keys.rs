/// Front-end independent key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    BackTab,
    Backspace,
    Char(char),
}

/// A key press after the front-end has normalized modifiers.
///
/// `command` is set when Ctrl (or Cmd/Super on macOS terminals) was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub command: bool,
}

impl KeyInput {
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            command: false,
        }
    }

    pub const fn chord(key: Key) -> Self {
        Self { key, command: true }
    }

    /// The character to insert into a text field, if this press is typing.
    pub fn text(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.command && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::plain(key)
    }
}
