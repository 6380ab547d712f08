use std::path::PathBuf;
use std::sync::mpsc;

use jobdesk_client::{
    export_filename, ApiCommand, ApiError, ApiEvent, ApiHandle, AtomicFileWriter, ClientSettings,
    FileDto, JobDto, NewJobRequest,
};
use jobdesk_core::viewer::language_from_filename;
use jobdesk_core::{ContentMode, Effect, FileId, FileStatus, Job, JobFile, JobStatus, Msg, NewJob};
use jobdesk_logging::{desk_debug, desk_info, desk_warn};

/// Executes effects from `update`: API calls go to the background handle,
/// exports are written in place.
pub struct EffectRunner {
    api: ApiHandle,
    exporter: AtomicFileWriter,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, export_dir: PathBuf) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiHandle::new(settings)?,
            exporter: AtomicFileWriter::new(export_dir),
        })
    }

    pub fn run(&self, effects: Vec<Effect>, msg_tx: &mpsc::Sender<Msg>) {
        for effect in effects {
            desk_debug!("Effect {:?}", effect);
            match effect {
                Effect::ExportContent {
                    file_id,
                    filename,
                    mode,
                    text,
                } => {
                    let result = self.export(file_id, &filename, mode, &text);
                    let _ = msg_tx.send(Msg::ContentExported(result));
                }
                other => {
                    if let Some(command) = to_command(other) {
                        self.api.send(command);
                    }
                }
            }
        }
    }

    /// Completed API calls, translated for `update`.
    pub fn completed(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.api.try_recv())
            .map(to_msg)
            .collect()
    }

    fn export(
        &self,
        file_id: FileId,
        filename: &str,
        mode: ContentMode,
        text: &str,
    ) -> Result<PathBuf, String> {
        let extension = export_extension(filename, mode);
        let name = export_filename(file_id, filename, mode.label(), extension);
        match self.exporter.write(&name, text) {
            Ok(path) => {
                desk_info!("Exported {} of file {} to {:?}", mode.label(), file_id, path);
                Ok(path)
            }
            Err(err) => {
                desk_warn!("Export of file {} failed: {}", file_id, err);
                Err(err.to_string())
            }
        }
    }
}

fn export_extension(filename: &str, mode: ContentMode) -> &str {
    match mode {
        ContentMode::Output => "xml",
        ContentMode::Error => "txt",
        ContentMode::Input => match language_from_filename(filename) {
            Some(_) => filename.rsplit_once('.').map_or("txt", |(_, ext)| ext),
            None => "txt",
        },
    }
}

fn to_command(effect: Effect) -> Option<ApiCommand> {
    let command = match effect {
        Effect::LoadJobs => ApiCommand::ListJobs,
        Effect::LoadJob(job_id) => ApiCommand::GetJob(job_id),
        Effect::CreateJob(new_job) => ApiCommand::CreateJob(match new_job {
            NewJob::Folders {
                folder_in,
                folder_out,
            } => NewJobRequest::Folders {
                folder_in,
                folder_out,
            },
            NewJob::Upload { paths } => NewJobRequest::Upload { paths },
        }),
        Effect::DeleteJob(job_id) => ApiCommand::DeleteJob(job_id),
        Effect::LoadFiles(job_id) => ApiCommand::ListFiles(job_id),
        Effect::LoadFileContent(file_id) => ApiCommand::GetFileContent(file_id),
        Effect::UpdateFileStatus { file_id, status } => ApiCommand::UpdateFileStatus {
            file_id,
            status: status.as_wire().to_string(),
        },
        Effect::ExportContent { .. } => return None,
    };
    Some(command)
}

fn to_msg(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::JobsListed(result) => Msg::JobsLoaded(
            logged("Loading jobs", result).map(|jobs| jobs.into_iter().map(to_job).collect()),
        ),
        ApiEvent::JobFetched { job_id, result } => Msg::JobLoaded {
            job_id,
            result: logged(&format!("Loading job {job_id}"), result).map(to_job),
        },
        ApiEvent::JobCreated(result) => {
            Msg::JobCreated(logged("Creating job", result).map(to_job))
        }
        ApiEvent::JobDeleted { job_id, result } => Msg::JobDeleted {
            job_id,
            result: logged(&format!("Deleting job {job_id}"), result).map(|message| {
                desk_info!("Job {job_id} deleted: {message}");
            }),
        },
        ApiEvent::FilesListed { job_id, result } => Msg::FilesLoaded {
            job_id,
            result: logged(&format!("Loading files of job {job_id}"), result)
                .map(|files| files.into_iter().map(to_file).collect()),
        },
        ApiEvent::FileContentFetched { file_id, result } => Msg::FileContentLoaded {
            file_id,
            result: logged(&format!("Loading content of file {file_id}"), result),
        },
        ApiEvent::FileStatusUpdated { file_id, result } => Msg::FileStatusUpdated {
            file_id,
            result: logged(&format!("Updating status of file {file_id}"), result).map(to_file),
        },
    }
}

/// Failures are logged here once; the core only sees the message.
fn logged<T>(action: &str, result: Result<T, ApiError>) -> Result<T, String> {
    result.map_err(|err| {
        desk_warn!("{action} failed: {err}");
        err.to_string()
    })
}

fn to_job(dto: JobDto) -> Job {
    Job {
        id: dto.id,
        status: JobStatus::from_wire(&dto.status),
        created_at: dto.created_at,
        user: dto.user,
        folder_in: dto.folder_in,
        folder_out: dto.folder_out,
        files: dto.files.into_iter().map(to_file).collect(),
    }
}

fn to_file(dto: FileDto) -> JobFile {
    JobFile {
        id: dto.id,
        job_id: dto.job_id,
        filename: dto.filename,
        filepath: dto.filepath,
        status: FileStatus::from_wire(&dto.status),
        content_out: dto.content_out,
        error: dto.error,
        created_at: dto.created_at,
        processed_at: dto.processed_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use jobdesk_client::{ApiCommand, ApiError, ApiErrorKind, ApiEvent, FileDto, NewJobRequest};
    use jobdesk_core::{ContentMode, Effect, FileStatus, JobStatus, Msg, NewJob};

    use super::{export_extension, to_command, to_msg};

    fn file_dto(status: &str) -> FileDto {
        FileDto {
            id: 4,
            job_id: 2,
            filename: "a.json".into(),
            filepath: "/in/a.json".into(),
            status: status.into(),
            content_out: Some("<x/>".into()),
            error: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap(),
            processed_at: None,
        }
    }

    #[test]
    fn requeue_sends_wire_status() {
        let command = to_command(Effect::UpdateFileStatus {
            file_id: 4,
            status: FileStatus::Init,
        });
        assert_eq!(
            command,
            Some(ApiCommand::UpdateFileStatus {
                file_id: 4,
                status: "init".into(),
            })
        );
    }

    #[test]
    fn create_maps_both_upload_modes() {
        let folders = to_command(Effect::CreateJob(NewJob::Folders {
            folder_in: "/a".into(),
            folder_out: "/b".into(),
        }));
        assert_eq!(
            folders,
            Some(ApiCommand::CreateJob(NewJobRequest::Folders {
                folder_in: "/a".into(),
                folder_out: "/b".into(),
            }))
        );

        let upload = to_command(Effect::CreateJob(NewJob::Upload {
            paths: vec!["batch.zip".into()],
        }));
        assert_eq!(
            upload,
            Some(ApiCommand::CreateJob(NewJobRequest::Upload {
                paths: vec!["batch.zip".into()],
            }))
        );
    }

    #[test]
    fn export_never_reaches_the_api() {
        let command = to_command(Effect::ExportContent {
            file_id: 1,
            filename: "a".into(),
            mode: ContentMode::Output,
            text: String::new(),
        });
        assert_eq!(command, None);
    }

    #[test]
    fn wire_statuses_map_into_core_statuses() {
        let msg = to_msg(ApiEvent::FileStatusUpdated {
            file_id: 4,
            result: Ok(file_dto("success")),
        });
        let Msg::FileStatusUpdated { result: Ok(file), .. } = msg else {
            panic!("unexpected {msg:?}");
        };
        assert_eq!(file.status, FileStatus::Success);
        assert_eq!(file.content_out.as_deref(), Some("<x/>"));

        assert_eq!(JobStatus::from_wire("paused"), JobStatus::Unknown("paused".into()));
    }

    #[test]
    fn failures_become_messages() {
        let msg = to_msg(ApiEvent::JobsListed(Err(ApiError {
            kind: ApiErrorKind::Network,
            message: "connection refused".into(),
        })));
        assert_eq!(msg, Msg::JobsLoaded(Err("network error: connection refused".into())));
    }

    #[test]
    fn export_extension_follows_mode() {
        assert_eq!(export_extension("a.json", ContentMode::Input), "json");
        assert_eq!(export_extension("notes", ContentMode::Input), "txt");
        assert_eq!(export_extension("a.json", ContentMode::Output), "xml");
        assert_eq!(export_extension("a.json", ContentMode::Error), "txt");
    }
}
