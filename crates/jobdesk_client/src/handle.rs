use std::sync::{mpsc, Arc};
use std::thread;

use jobdesk_logging::{desk_error, desk_info};

use crate::api::{ClientSettings, JobsApi, ReqwestJobsApi};
use crate::{ApiCommand, ApiError, ApiEvent};

/// Runs API calls on a background tokio runtime. Commands go in over a
/// channel, completions come back in whatever order they finish.
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
    event_rx: mpsc::Receiver<ApiEvent>,
}

impl ApiHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        desk_info!("API client targeting {}", settings.base_url);
        let api = ReqwestJobsApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn JobsApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    desk_error!("Cannot start API runtime: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = execute(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn send(&self, command: ApiCommand) {
        if self.cmd_tx.send(command).is_err() {
            desk_error!("API worker is gone; request dropped");
        }
    }

    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Performs one command and wraps its outcome in the matching event.
pub async fn execute(api: &dyn JobsApi, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::ListJobs => ApiEvent::JobsListed(api.list_jobs().await),
        ApiCommand::GetJob(job_id) => ApiEvent::JobFetched {
            job_id,
            result: api.get_job(job_id).await,
        },
        ApiCommand::CreateJob(request) => ApiEvent::JobCreated(api.create_job(&request).await),
        ApiCommand::DeleteJob(job_id) => ApiEvent::JobDeleted {
            job_id,
            result: api.delete_job(job_id).await,
        },
        ApiCommand::ListFiles(job_id) => ApiEvent::FilesListed {
            job_id,
            result: api.list_files(job_id).await,
        },
        ApiCommand::GetFileContent(file_id) => ApiEvent::FileContentFetched {
            file_id,
            result: api.get_file_content(file_id).await,
        },
        ApiCommand::UpdateFileStatus { file_id, status } => ApiEvent::FileStatusUpdated {
            file_id,
            result: api.update_file_status(file_id, &status).await,
        },
    }
}
