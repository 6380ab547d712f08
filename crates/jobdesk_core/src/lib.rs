//! Jobdesk core: pure view-state machine and view-model helpers.
mod effect;
mod form;
mod keys;
mod model;
mod msg;
mod state;
pub mod status;
mod toolbar;
mod update;
mod view_model;
pub mod viewer;

pub use effect::Effect;
pub use form::{FormField, JobForm, NewJob, UploadMode, FOLDERS_REQUIRED, ZIP_REQUIRED};
pub use keys::{Key, KeyInput};
pub use model::{FileCounts, FileId, FileStatus, Job, JobFile, JobId, JobStatus};
pub use msg::Msg;
pub use state::{AppState, FilesPane, ViewMode};
pub use toolbar::{Command, Toolbar, ToolbarButton};
pub use update::{
    update, CREATE_JOB_FAILED, DELETE_JOB_FAILED, LOAD_FILES_FAILED, LOAD_JOBS_FAILED,
    UPDATE_STATUS_FAILED,
};
pub use view_model::{
    format_timestamp, AppViewModel, FileRowView, FilesView, FormFieldView, FormView, JobRowView,
    StatusView, ToolbarButtonView, ViewerView, NO_FILES_PLACEHOLDER, NO_JOBS_PLACEHOLDER,
};
pub use viewer::{ClickTarget, ContentMode, DisplayLanguage, ViewerState};
