use chrono::NaiveDateTime;

use crate::state::ViewMode;
use crate::status::Rgb;
use crate::toolbar::Command;
use crate::viewer::ViewerBody;
use crate::{AppState, FileId, Job, JobFile, JobId, UploadMode};

pub const NO_FILES_PLACEHOLDER: &str = "No files for this job";
pub const LOADING_FILES_PLACEHOLDER: &str = "Loading files...";
pub const NO_JOBS_PLACEHOLDER: &str = "No jobs yet";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: ViewMode,
    /// First job load still pending; nothing else is drawn.
    pub loading: bool,
    pub toolbar: Vec<ToolbarButtonView>,
    pub jobs: Vec<JobRowView>,
    pub files: Option<FilesView>,
    pub form: Option<FormView>,
    pub viewer: Option<ViewerView>,
    pub alert: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButtonView {
    pub command: Command,
    pub label: &'static str,
    pub hint: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub status: StatusView,
    pub created_at: String,
    pub user: String,
    pub folder_in: String,
    pub folder_out: String,
    /// "done/total" over the job's files, empty when the job has none.
    pub progress: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub file_id: FileId,
    pub filename: String,
    pub filepath: String,
    pub status: StatusView,
    pub created_at: String,
    pub processed_at: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesView {
    pub title: String,
    pub header: Option<JobRowView>,
    pub rows: Vec<FileRowView>,
    /// Shown instead of rows when there is nothing to list.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub upload_mode: UploadMode,
    pub fields: Vec<FormFieldView>,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    pub title: String,
    pub language: &'static str,
    pub text: String,
    pub loading: bool,
    pub scroll: u16,
}

/// Formats a server timestamp the way the job tables show it.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let toolbar = state
        .toolbar()
        .buttons
        .into_iter()
        .map(|button| ToolbarButtonView {
            command: button.command,
            label: button.command.label(),
            hint: button.command.hint(),
            enabled: button.enabled,
        })
        .collect();

    let selected = state.selected_job_id();
    let jobs = state
        .jobs()
        .iter()
        .map(|job| job_row(job, selected == Some(job.id)))
        .collect();

    AppViewModel {
        mode: state.mode(),
        loading: state.is_loading_jobs() && !state.jobs_loaded,
        toolbar,
        jobs,
        files: files_view(state),
        form: form_view(state),
        viewer: viewer_view(state),
        alert: state.alert().map(str::to_string),
        notice: state.notice().map(str::to_string),
    }
}

fn job_row(job: &Job, selected: bool) -> JobRowView {
    let badge = job.status.badge();
    let counts = job.file_counts();
    let progress = if counts.total == 0 {
        String::new()
    } else {
        format!("{}/{}", counts.finished(), counts.total)
    };
    JobRowView {
        job_id: job.id,
        status: StatusView {
            label: badge.label.to_string(),
            color: badge.color,
        },
        created_at: format_timestamp(&job.created_at),
        user: job.user.clone(),
        folder_in: job.folder_in.clone(),
        folder_out: job.folder_out.clone(),
        progress,
        selected,
    }
}

fn file_row(file: &JobFile, selected: bool) -> FileRowView {
    let badge = file.status.badge();
    FileRowView {
        file_id: file.id,
        filename: file.filename.clone(),
        filepath: file.filepath.clone(),
        status: StatusView {
            label: badge.label.to_string(),
            color: badge.color,
        },
        created_at: format_timestamp(&file.created_at),
        processed_at: file
            .processed_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
        selected,
    }
}

fn files_view(state: &AppState) -> Option<FilesView> {
    if state.mode() != ViewMode::Files {
        return None;
    }
    let pane = state.files_pane()?;
    let rows: Vec<FileRowView> = pane
        .files
        .iter()
        .map(|file| file_row(file, pane.selected_file == Some(file.id)))
        .collect();
    let placeholder = if !rows.is_empty() {
        None
    } else if let Some(error) = &pane.load_error {
        Some(error.clone())
    } else if !pane.loaded {
        Some(LOADING_FILES_PLACEHOLDER.to_string())
    } else {
        Some(NO_FILES_PLACEHOLDER.to_string())
    };
    Some(FilesView {
        title: format!("Files for Job #{}", pane.job_id),
        header: pane.job.as_ref().map(|job| job_row(job, false)),
        rows,
        placeholder,
    })
}

fn form_view(state: &AppState) -> Option<FormView> {
    if state.mode() != ViewMode::Add {
        return None;
    }
    let form = state.form()?;
    let fields = form
        .fields()
        .iter()
        .map(|field| FormFieldView {
            label: field.label(),
            value: form.value(*field).to_string(),
            focused: form.focus == *field,
            editable: *field != crate::FormField::Mode,
        })
        .collect();
    Some(FormView {
        title: "Create New Job",
        upload_mode: form.mode,
        fields,
        error: form.error.clone(),
        submitting: form.submitting,
    })
}

fn viewer_view(state: &AppState) -> Option<ViewerView> {
    let viewer = state.viewer()?;
    let (text, language, loading) = match &viewer.body {
        ViewerBody::Loading => ("Loading...".to_string(), "", true),
        ViewerBody::Ready(content) => (content.text.clone(), content.language.name(), false),
    };
    Some(ViewerView {
        title: viewer.title(),
        language,
        text,
        loading,
        scroll: viewer.scroll,
    })
}
