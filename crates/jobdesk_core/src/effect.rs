use crate::{ContentMode, FileId, FileStatus, JobId, NewJob};

/// IO requested by `update`; executed by the front-end's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadJobs,
    LoadJob(JobId),
    CreateJob(NewJob),
    DeleteJob(JobId),
    LoadFiles(JobId),
    LoadFileContent(FileId),
    UpdateFileStatus {
        file_id: FileId,
        status: FileStatus,
    },
    ExportContent {
        file_id: FileId,
        filename: String,
        mode: ContentMode,
        text: String,
    },
}
