use chrono::NaiveDateTime;

use crate::status::{badge, Badge};

pub type JobId = u64;
pub type FileId = u64;

/// Lifecycle of a job as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Error,
    /// A value this client does not know; shown verbatim.
    Unknown(String),
}

impl JobStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "pending" => JobStatus::Pending,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "error" => JobStatus::Error,
            other => JobStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
            JobStatus::Unknown(raw) => raw,
        }
    }

    pub fn badge(&self) -> Badge<'_> {
        badge(self.as_wire())
    }
}

/// Lifecycle of a single file inside a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Init,
    Active,
    Success,
    Error,
    Unknown(String),
}

impl FileStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "init" => FileStatus::Init,
            "active" => FileStatus::Active,
            "success" => FileStatus::Success,
            "error" => FileStatus::Error,
            other => FileStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            FileStatus::Init => "init",
            FileStatus::Active => "active",
            FileStatus::Success => "success",
            FileStatus::Error => "error",
            FileStatus::Unknown(raw) => raw,
        }
    }

    pub fn badge(&self) -> Badge<'_> {
        badge(self.as_wire())
    }
}

/// Client-side snapshot of a job. The server is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub created_at: NaiveDateTime,
    pub user: String,
    pub folder_in: String,
    pub folder_out: String,
    pub files: Vec<JobFile>,
}

impl Job {
    pub fn file_counts(&self) -> FileCounts {
        let mut counts = FileCounts {
            total: self.files.len(),
            ..FileCounts::default()
        };
        for file in &self.files {
            match file.status {
                FileStatus::Success => counts.succeeded += 1,
                FileStatus::Error => counts.failed += 1,
                FileStatus::Init | FileStatus::Active | FileStatus::Unknown(_) => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFile {
    pub id: FileId,
    pub job_id: JobId,
    pub filename: String,
    pub filepath: String,
    pub status: FileStatus,
    pub content_out: Option<String>,
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileCounts {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl FileCounts {
    pub fn finished(&self) -> usize {
        self.succeeded + self.failed
    }
}
