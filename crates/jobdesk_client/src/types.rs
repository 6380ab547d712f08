use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub type JobId = u64;
pub type FileId = u64;

/// A job as the service returns it. Status stays a raw string here; the core
/// owns its interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobDto {
    pub id: JobId,
    #[serde(alias = "state")]
    pub status: String,
    #[serde(deserialize_with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub user: String,
    pub folder_in: String,
    pub folder_out: String,
    #[serde(default)]
    pub files: Vec<FileDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileDto {
    pub id: FileId,
    pub job_id: JobId,
    pub filename: String,
    pub filepath: String,
    #[serde(alias = "state")]
    pub status: String,
    #[serde(default)]
    pub content_out: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(deserialize_with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub processed_at: Option<NaiveDateTime>,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewJobRequest {
    /// JSON `{folder_in, folder_out}`.
    Folders { folder_in: String, folder_out: String },
    /// Multipart upload, one `files` part per local path.
    Upload { paths: Vec<PathBuf> },
}

/// Parses the service's zone-less ISO-8601 timestamps. RFC 3339 with an
/// offset is accepted too and normalized to UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|value| value.naive_utc())
        })
}

fn timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}")))
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}"))),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    Decode,
    Io,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidUrl => write!(f, "invalid url"),
            ApiErrorKind::Network => write!(f, "network error"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::Decode => write!(f, "decode error"),
            ApiErrorKind::Io => write!(f, "io error"),
        }
    }
}

/// Requests accepted by [`crate::ApiHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    ListJobs,
    GetJob(JobId),
    CreateJob(NewJobRequest),
    DeleteJob(JobId),
    ListFiles(JobId),
    GetFileContent(FileId),
    UpdateFileStatus { file_id: FileId, status: String },
}

/// Completions posted back by [`crate::ApiHandle`], one per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    JobsListed(Result<Vec<JobDto>, ApiError>),
    JobFetched {
        job_id: JobId,
        result: Result<JobDto, ApiError>,
    },
    JobCreated(Result<JobDto, ApiError>),
    JobDeleted {
        job_id: JobId,
        result: Result<String, ApiError>,
    },
    FilesListed {
        job_id: JobId,
        result: Result<Vec<FileDto>, ApiError>,
    },
    FileContentFetched {
        file_id: FileId,
        result: Result<String, ApiError>,
    },
    FileStatusUpdated {
        file_id: FileId,
        result: Result<FileDto, ApiError>,
    },
}
