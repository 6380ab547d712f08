//! Stateless command bars. Each view exposes a list of buttons; hotkeys only
//! resolve through enabled buttons of the active bar.

use crate::{ContentMode, Key, KeyInput};

/// A user intent forwarded to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddJob,
    ViewFiles,
    DeleteJob,
    Refresh,
    Quit,
    SaveForm,
    CancelForm,
    ViewContent(ContentMode),
    RequeueFile,
    CloseFiles,
    ExportContent,
    CloseViewer,
}

const ADD_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('a'))];
const VIEW_FILES_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Enter), KeyInput::plain(Key::Char('v'))];
const DELETE_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('d'))];
const REFRESH_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('r'))];
const QUIT_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('q'))];
const SAVE_KEYS: &[KeyInput] = &[KeyInput::chord(Key::Char('s'))];
const ESCAPE_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Escape)];
const VIEW_INPUT_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Enter), KeyInput::plain(Key::Char('v'))];
const VIEW_OUTPUT_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('o'))];
const VIEW_ERROR_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('e'))];
const REQUEUE_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('i'))];
const EXPORT_KEYS: &[KeyInput] = &[KeyInput::plain(Key::Char('s'))];

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Command::AddJob => "Add",
            Command::ViewFiles => "Files",
            Command::DeleteJob => "Delete",
            Command::Refresh => "Refresh",
            Command::Quit => "Quit",
            Command::SaveForm => "Save",
            Command::CancelForm => "Cancel",
            Command::ViewContent(ContentMode::Input) => "Input",
            Command::ViewContent(ContentMode::Output) => "Output",
            Command::ViewContent(ContentMode::Error) => "Error",
            Command::RequeueFile => "Requeue",
            Command::CloseFiles => "Close",
            Command::ExportContent => "Save copy",
            Command::CloseViewer => "Close",
        }
    }

    /// Key hint shown next to the label.
    pub fn hint(self) -> &'static str {
        match self {
            Command::AddJob => "a",
            Command::ViewFiles | Command::ViewContent(ContentMode::Input) => "Enter",
            Command::DeleteJob => "d",
            Command::Refresh => "r",
            Command::Quit => "q",
            Command::SaveForm => "Ctrl+S",
            Command::CancelForm | Command::CloseFiles | Command::CloseViewer => "Esc",
            Command::ViewContent(ContentMode::Output) => "o",
            Command::ViewContent(ContentMode::Error) => "e",
            Command::RequeueFile => "i",
            Command::ExportContent => "s",
        }
    }

    fn bindings(self) -> &'static [KeyInput] {
        match self {
            Command::AddJob => ADD_KEYS,
            Command::ViewFiles => VIEW_FILES_KEYS,
            Command::DeleteJob => DELETE_KEYS,
            Command::Refresh => REFRESH_KEYS,
            Command::Quit => QUIT_KEYS,
            Command::SaveForm => SAVE_KEYS,
            Command::CancelForm | Command::CloseFiles | Command::CloseViewer => ESCAPE_KEYS,
            Command::ViewContent(ContentMode::Input) => VIEW_INPUT_KEYS,
            Command::ViewContent(ContentMode::Output) => VIEW_OUTPUT_KEYS,
            Command::ViewContent(ContentMode::Error) => VIEW_ERROR_KEYS,
            Command::RequeueFile => REQUEUE_KEYS,
            Command::ExportContent => EXPORT_KEYS,
        }
    }

    fn accepts(self, key: &KeyInput) -> bool {
        self.bindings().iter().any(|binding| {
            binding.command == key.command
                && match (binding.key, key.key) {
                    (Key::Char(expected), Key::Char(actual)) => {
                        expected.eq_ignore_ascii_case(&actual)
                    }
                    (expected, actual) => expected == actual,
                }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub command: Command,
    pub enabled: bool,
}

impl ToolbarButton {
    pub fn new(command: Command, enabled: bool) -> Self {
        Self { command, enabled }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Toolbar {
    pub buttons: Vec<ToolbarButton>,
}

impl Toolbar {
    pub fn list(has_selected_job: bool) -> Self {
        Self {
            buttons: vec![
                ToolbarButton::new(Command::AddJob, true),
                ToolbarButton::new(Command::ViewFiles, has_selected_job),
                ToolbarButton::new(Command::DeleteJob, has_selected_job),
                ToolbarButton::new(Command::Refresh, true),
                ToolbarButton::new(Command::Quit, true),
            ],
        }
    }

    pub fn form(submitting: bool) -> Self {
        Self {
            buttons: vec![
                ToolbarButton::new(Command::SaveForm, !submitting),
                ToolbarButton::new(Command::CancelForm, true),
            ],
        }
    }

    pub fn files(has_selected_file: bool) -> Self {
        Self {
            buttons: vec![
                ToolbarButton::new(Command::ViewContent(ContentMode::Input), has_selected_file),
                ToolbarButton::new(Command::ViewContent(ContentMode::Output), has_selected_file),
                ToolbarButton::new(Command::ViewContent(ContentMode::Error), has_selected_file),
                ToolbarButton::new(Command::RequeueFile, has_selected_file),
                ToolbarButton::new(Command::Refresh, true),
                ToolbarButton::new(Command::CloseFiles, true),
            ],
        }
    }

    pub fn viewer(content_ready: bool) -> Self {
        Self {
            buttons: vec![
                ToolbarButton::new(Command::ExportContent, content_ready),
                ToolbarButton::new(Command::CloseViewer, true),
            ],
        }
    }

    /// The enabled command bound to `key`, if any.
    pub fn command_for(&self, key: &KeyInput) -> Option<Command> {
        self.buttons
            .iter()
            .find(|button| button.enabled && button.command.accepts(key))
            .map(|button| button.command)
    }
}
