use std::path::PathBuf;

use crate::Job;

pub const FOLDERS_REQUIRED: &str = "Folder paths are required";
pub const ZIP_REQUIRED: &str = "Please select a ZIP file";

/// How a new job gets its input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// Server-side folders referenced by path.
    Folders,
    /// A local ZIP archive uploaded with the request.
    Archive,
}

impl UploadMode {
    pub fn label(self) -> &'static str {
        match self {
            UploadMode::Folders => "Folders",
            UploadMode::Archive => "ZIP upload",
        }
    }

    fn toggled(self) -> Self {
        match self {
            UploadMode::Folders => UploadMode::Archive,
            UploadMode::Archive => UploadMode::Folders,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Mode,
    FolderIn,
    FolderOut,
    ArchivePath,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Mode => "Source",
            FormField::FolderIn => "Folder in",
            FormField::FolderOut => "Folder out",
            FormField::ArchivePath => "ZIP file",
        }
    }
}

/// Validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewJob {
    Folders {
        folder_in: String,
        folder_out: String,
    },
    Upload {
        paths: Vec<PathBuf>,
    },
}

/// Create-job form contents. Lives only while the add view is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobForm {
    pub mode: UploadMode,
    pub folder_in: String,
    pub folder_out: String,
    pub archive_path: String,
    pub focus: FormField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl JobForm {
    /// New form, pre-filled with the folders of the most recent job.
    pub fn prefilled(last_job: Option<&Job>) -> Self {
        let (folder_in, folder_out) = last_job
            .map(|job| (job.folder_in.clone(), job.folder_out.clone()))
            .unwrap_or_default();
        Self {
            mode: UploadMode::Folders,
            folder_in,
            folder_out,
            archive_path: String::new(),
            focus: FormField::FolderIn,
            error: None,
            submitting: false,
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.mode {
            UploadMode::Folders => &[FormField::Mode, FormField::FolderIn, FormField::FolderOut],
            UploadMode::Archive => &[FormField::Mode, FormField::ArchivePath],
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Mode => self.mode.label(),
            FormField::FolderIn => &self.folder_in,
            FormField::FolderOut => &self.folder_out,
            FormField::ArchivePath => &self.archive_path,
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub(crate) fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.cycle_focus(len - 1);
    }

    fn cycle_focus(&mut self, step: usize) {
        let fields = self.fields();
        let current = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = fields[(current + step) % fields.len()];
    }

    pub(crate) fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.focus = FormField::Mode;
        self.error = None;
    }

    pub(crate) fn insert_char(&mut self, c: char) {
        if let Some(value) = self.focused_text_mut() {
            value.push(c);
            self.error = None;
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.focused_text_mut() {
            value.pop();
            self.error = None;
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Mode => None,
            FormField::FolderIn => Some(&mut self.folder_in),
            FormField::FolderOut => Some(&mut self.folder_out),
            FormField::ArchivePath => Some(&mut self.archive_path),
        }
    }

    /// Checks the visible fields and builds the create request.
    pub fn validate(&self) -> Result<NewJob, &'static str> {
        match self.mode {
            UploadMode::Folders => {
                let folder_in = self.folder_in.trim();
                let folder_out = self.folder_out.trim();
                if folder_in.is_empty() || folder_out.is_empty() {
                    return Err(FOLDERS_REQUIRED);
                }
                Ok(NewJob::Folders {
                    folder_in: folder_in.to_string(),
                    folder_out: folder_out.to_string(),
                })
            }
            UploadMode::Archive => {
                let path = self.archive_path.trim();
                if path.is_empty() || !path.to_ascii_lowercase().ends_with(".zip") {
                    return Err(ZIP_REQUIRED);
                }
                Ok(NewJob::Upload {
                    paths: vec![PathBuf::from(path)],
                })
            }
        }
    }
}
