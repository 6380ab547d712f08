//! Content viewer overlay: which text to show for a file and how to display it.

use crate::{FileId, JobFile};

pub const NO_OUTPUT_PLACEHOLDER: &str = "No output content available";
pub const NO_ERROR_PLACEHOLDER: &str = "No error message";
pub const LOAD_FAILED_PLACEHOLDER: &str = "Error loading file content";

/// Which side of a file the viewer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    Input,
    Output,
    Error,
}

impl ContentMode {
    pub fn label(self) -> &'static str {
        match self {
            ContentMode::Input => "Input",
            ContentMode::Output => "Output",
            ContentMode::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLanguage {
    Json,
    Xml,
    Html,
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    C,
    CSharp,
    Css,
    Scss,
    Yaml,
    Markdown,
    Sql,
    Shell,
    PlainText,
}

impl DisplayLanguage {
    pub fn name(self) -> &'static str {
        match self {
            DisplayLanguage::Json => "json",
            DisplayLanguage::Xml => "xml",
            DisplayLanguage::Html => "html",
            DisplayLanguage::JavaScript => "javascript",
            DisplayLanguage::TypeScript => "typescript",
            DisplayLanguage::Python => "python",
            DisplayLanguage::Java => "java",
            DisplayLanguage::Cpp => "cpp",
            DisplayLanguage::C => "c",
            DisplayLanguage::CSharp => "csharp",
            DisplayLanguage::Css => "css",
            DisplayLanguage::Scss => "scss",
            DisplayLanguage::Yaml => "yaml",
            DisplayLanguage::Markdown => "markdown",
            DisplayLanguage::Sql => "sql",
            DisplayLanguage::Shell => "shell",
            DisplayLanguage::PlainText => "plaintext",
        }
    }
}

/// Maps a filename extension to a display language.
pub fn language_from_filename(filename: &str) -> Option<DisplayLanguage> {
    let (_, ext) = filename.rsplit_once('.')?;
    let language = match ext.to_ascii_lowercase().as_str() {
        "json" => DisplayLanguage::Json,
        "xml" => DisplayLanguage::Xml,
        "html" => DisplayLanguage::Html,
        "js" | "jsx" => DisplayLanguage::JavaScript,
        "ts" | "tsx" => DisplayLanguage::TypeScript,
        "py" => DisplayLanguage::Python,
        "java" => DisplayLanguage::Java,
        "cpp" => DisplayLanguage::Cpp,
        "c" => DisplayLanguage::C,
        "cs" => DisplayLanguage::CSharp,
        "css" => DisplayLanguage::Css,
        "scss" => DisplayLanguage::Scss,
        "yaml" | "yml" => DisplayLanguage::Yaml,
        "md" => DisplayLanguage::Markdown,
        "sql" => DisplayLanguage::Sql,
        "sh" => DisplayLanguage::Shell,
        "txt" => DisplayLanguage::PlainText,
        _ => return None,
    };
    Some(language)
}

/// Best-effort guess from the shape of the text itself.
pub fn sniff_language(content: &str) -> DisplayLanguage {
    let trimmed = content.trim();
    let bracketed = |open: char, close: char| trimmed.starts_with(open) && trimmed.ends_with(close);
    if bracketed('{', '}') || bracketed('[', ']') {
        DisplayLanguage::Json
    } else if bracketed('<', '>') {
        DisplayLanguage::Xml
    } else {
        DisplayLanguage::PlainText
    }
}

/// Language for fetched input content: extension first, then content shape.
pub fn input_language(filename: &str, content: &str) -> DisplayLanguage {
    language_from_filename(filename).unwrap_or_else(|| sniff_language(content))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContent {
    pub text: String,
    pub language: DisplayLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Content is already on the file snapshot.
    Ready(ViewerContent),
    /// Raw input must be fetched by file id.
    Fetch(FileId),
}

/// Decides what to show for `file` in `mode`. Only `Input` needs the network.
pub fn resolve(file: &JobFile, mode: ContentMode) -> Resolution {
    match mode {
        ContentMode::Output => Resolution::Ready(ViewerContent {
            text: present_or(file.content_out.as_deref(), NO_OUTPUT_PLACEHOLDER),
            language: DisplayLanguage::Xml,
        }),
        ContentMode::Error => Resolution::Ready(ViewerContent {
            text: present_or(file.error.as_deref(), NO_ERROR_PLACEHOLDER),
            language: DisplayLanguage::PlainText,
        }),
        ContentMode::Input => Resolution::Fetch(file.id),
    }
}

fn present_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => placeholder.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerBody {
    Loading,
    Ready(ViewerContent),
}

/// An open viewer overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub file_id: FileId,
    pub filename: String,
    pub mode: ContentMode,
    pub body: ViewerBody,
    pub scroll: u16,
}

impl ViewerState {
    pub fn title(&self) -> String {
        format!("{} - {}", self.filename, self.mode.label())
    }

    pub fn content(&self) -> Option<&ViewerContent> {
        match &self.body {
            ViewerBody::Ready(content) => Some(content),
            ViewerBody::Loading => None,
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let max = self
            .content()
            .map(|content| content.text.lines().count().saturating_sub(1))
            .unwrap_or(0);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        let next = i32::from(self.scroll).saturating_add(delta);
        self.scroll = next.clamp(0, i32::from(max)) as u16;
    }
}

/// What a pointer click inside the viewer hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the modal surface.
    Backdrop,
    /// The modal surface or anything drawn on it.
    Surface,
}
