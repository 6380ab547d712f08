use crate::toolbar::Toolbar;
use crate::view_model::{self, AppViewModel};
use crate::viewer::ViewerState;
use crate::{FileId, Job, JobFile, JobForm, JobId};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Add,
    Files,
}

/// The file browser for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesPane {
    pub job_id: JobId,
    /// Latest snapshot of the open job, for the header.
    pub job: Option<Job>,
    pub files: Vec<JobFile>,
    pub selected_file: Option<FileId>,
    pub load_error: Option<String>,
    pub loading: bool,
    pub loaded: bool,
}

impl FilesPane {
    pub(crate) fn new(job_id: JobId, job: Option<Job>) -> Self {
        Self {
            job_id,
            job,
            files: Vec::new(),
            selected_file: None,
            load_error: None,
            loading: true,
            loaded: false,
        }
    }

    pub fn selected(&self) -> Option<&JobFile> {
        let id = self.selected_file?;
        self.files.iter().find(|file| file.id == id)
    }
}

/// Whole view state. Owned and mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) jobs: Vec<Job>,
    pub(crate) mode: ViewMode,
    pub(crate) selected_job: Option<JobId>,
    /// Job to select on the next list load (set after a create).
    pub(crate) preferred_job: Option<JobId>,
    pub(crate) loading_jobs: bool,
    pub(crate) jobs_loaded: bool,
    pub(crate) form: Option<JobForm>,
    pub(crate) files: Option<FilesPane>,
    pub(crate) viewer: Option<ViewerState>,
    pub(crate) alert: Option<String>,
    pub(crate) notice: Option<String>,
    pub(crate) quit: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn selected_job(&self) -> Option<&Job> {
        let id = self.selected_job?;
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn selected_job_id(&self) -> Option<JobId> {
        self.selected_job
    }

    pub fn files_pane(&self) -> Option<&FilesPane> {
        self.files.as_ref()
    }

    pub fn selected_file_id(&self) -> Option<FileId> {
        self.files.as_ref().and_then(|pane| pane.selected_file)
    }

    pub fn form(&self) -> Option<&JobForm> {
        self.form.as_ref()
    }

    pub fn viewer(&self) -> Option<&ViewerState> {
        self.viewer.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading_jobs(&self) -> bool {
        self.loading_jobs
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Command bar for whatever currently owns the keyboard.
    pub fn toolbar(&self) -> Toolbar {
        if let Some(viewer) = &self.viewer {
            return Toolbar::viewer(viewer.content().is_some());
        }
        match self.mode {
            ViewMode::List => Toolbar::list(self.selected_job().is_some()),
            ViewMode::Add => Toolbar::form(self.form.as_ref().is_some_and(|form| form.submitting)),
            ViewMode::Files => Toolbar::files(
                self.files
                    .as_ref()
                    .and_then(FilesPane::selected)
                    .is_some(),
            ),
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn contains_job(&self, job_id: JobId) -> bool {
        self.jobs.iter().any(|job| job.id == job_id)
    }

    pub(crate) fn selected_job_index(&self) -> Option<usize> {
        let id = self.selected_job?;
        self.jobs.iter().position(|job| job.id == id)
    }
}
