use std::path::PathBuf;

use crate::{ClickTarget, Command, FileId, Job, JobFile, JobId, KeyInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The UI has been mounted; load the initial job list.
    Mounted,
    /// Poll timer fired.
    PollElapsed,
    /// A key press, already normalized by the front-end.
    Key(KeyInput),
    /// A toolbar button was activated directly.
    Command(Command),
    /// User clicked a row in the job table.
    JobClicked(JobId),
    /// User clicked a row in the file table.
    FileClicked(FileId),
    /// A pointer click landed while the viewer was open.
    ViewerClicked(ClickTarget),
    JobsLoaded(Result<Vec<Job>, String>),
    JobLoaded {
        job_id: JobId,
        result: Result<Job, String>,
    },
    JobCreated(Result<Job, String>),
    JobDeleted {
        job_id: JobId,
        result: Result<(), String>,
    },
    FilesLoaded {
        job_id: JobId,
        result: Result<Vec<JobFile>, String>,
    },
    FileContentLoaded {
        file_id: FileId,
        result: Result<String, String>,
    },
    FileStatusUpdated {
        file_id: FileId,
        result: Result<JobFile, String>,
    },
    ContentExported(Result<PathBuf, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}
