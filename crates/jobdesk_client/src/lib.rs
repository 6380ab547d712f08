//! Jobdesk client: REST calls against the job service, content decoding and
//! export of viewer text.
mod api;
mod decode;
mod filename;
mod handle;
mod persist;
mod types;

pub use api::{ClientSettings, JobsApi, ReqwestJobsApi, DEFAULT_API_URL};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use filename::export_filename;
pub use handle::{execute, ApiHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiCommand, ApiError, ApiErrorKind, ApiEvent, FileDto, FileId, JobDto, JobId, NewJobRequest,
};
