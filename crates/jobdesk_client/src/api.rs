use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use jobdesk_logging::{desk_debug, desk_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::decode::decode_text;
use crate::{ApiError, ApiErrorKind, FileDto, FileId, JobDto, JobId, NewJobRequest};

pub const DEFAULT_API_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Service root; `/api/...` paths are resolved against it.
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    /// Unset by default: a slow request only stalls the view waiting on it.
    pub request_timeout: Option<Duration>,
    pub max_content_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Some(Duration::from_secs(10)),
            request_timeout: None,
            max_content_bytes: 16 * 1024 * 1024,
        }
    }
}

/// One method per service endpoint. No retries, no caching.
#[async_trait::async_trait]
pub trait JobsApi: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobDto>, ApiError>;
    async fn get_job(&self, job_id: JobId) -> Result<JobDto, ApiError>;
    async fn create_job(&self, request: &NewJobRequest) -> Result<JobDto, ApiError>;
    async fn list_files(&self, job_id: JobId) -> Result<Vec<FileDto>, ApiError>;
    async fn get_file_content(&self, file_id: FileId) -> Result<String, ApiError>;
    async fn update_file_status(&self, file_id: FileId, status: &str)
        -> Result<FileDto, ApiError>;
    /// Returns the service's confirmation message.
    async fn delete_job(&self, job_id: JobId) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobsApi {
    client: reqwest::Client,
    base: Url,
    max_content_bytes: u64,
}

#[derive(Serialize)]
struct FoldersBody<'a> {
    folder_in: &'a str,
    folder_out: &'a str,
}

impl ReqwestJobsApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let mut base = Url::parse(settings.base_url.trim())
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                ApiErrorKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base,
            max_content_bytes: settings.max_content_bytes,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            desk_warn!("{} answered {}", response.url(), status);
            return Err(ApiError::new(
                ApiErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        desk_debug!("GET {url}");
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn upload_form(paths: &[PathBuf]) -> Result<Form, ApiError> {
        if paths.is_empty() {
            return Err(ApiError::new(ApiErrorKind::Io, "no files selected"));
        }
        let mut form = Form::new();
        for path in paths {
            let bytes = tokio::fs::read(path).await.map_err(|err| {
                ApiError::new(ApiErrorKind::Io, format!("{}: {err}", path.display()))
            })?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            form = form.part("files", Part::bytes(bytes).file_name(name));
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl JobsApi for ReqwestJobsApi {
    async fn list_jobs(&self) -> Result<Vec<JobDto>, ApiError> {
        self.get_json("api/jobs").await
    }

    async fn get_job(&self, job_id: JobId) -> Result<JobDto, ApiError> {
        self.get_json(&format!("api/jobs/{job_id}")).await
    }

    async fn create_job(&self, request: &NewJobRequest) -> Result<JobDto, ApiError> {
        let url = self.endpoint("api/jobs")?;
        let builder = match request {
            NewJobRequest::Folders {
                folder_in,
                folder_out,
            } => {
                let body = serde_json::to_vec(&FoldersBody {
                    folder_in,
                    folder_out,
                })
                .map_err(|err| ApiError::new(ApiErrorKind::Decode, err.to_string()))?;
                desk_debug!("POST {url} folders");
                self.client
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body)
            }
            NewJobRequest::Upload { paths } => {
                desk_debug!("POST {url} upload of {} file(s)", paths.len());
                let form = Self::upload_form(paths).await?;
                self.client.post(url).multipart(form)
            }
        };
        let response = self.send(builder).await?;
        read_json(response).await
    }

    async fn list_files(&self, job_id: JobId) -> Result<Vec<FileDto>, ApiError> {
        self.get_json(&format!("api/jobs/{job_id}/files")).await
    }

    async fn get_file_content(&self, file_id: FileId) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("api/files/{file_id}/content"))?;
        desk_debug!("GET {url}");
        let response = self.send(self.client.get(url)).await?;

        if let Some(len) = response.content_length() {
            if len > self.max_content_bytes {
                return Err(too_large(self.max_content_bytes, len));
            }
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_content_bytes {
                return Err(too_large(self.max_content_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        decode_text(&bytes, content_type.as_deref())
            .map(|decoded| decoded.text)
            .map_err(|err| ApiError::new(ApiErrorKind::Decode, err.to_string()))
    }

    async fn update_file_status(
        &self,
        file_id: FileId,
        status: &str,
    ) -> Result<FileDto, ApiError> {
        let mut url = self.endpoint(&format!("api/files/{file_id}/status"))?;
        url.query_pairs_mut().append_pair("status", status);
        desk_debug!("PATCH {url}");
        let response = self.send(self.client.patch(url)).await?;
        read_json(response).await
    }

    async fn delete_job(&self, job_id: JobId) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("api/jobs/{job_id}"))?;
        desk_debug!("DELETE {url}");
        let response = self.send(self.client.delete(url)).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let message = serde_json::from_slice::<serde_json::Value>(&bytes)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
        Ok(message)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(ApiErrorKind::Decode, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::new(
        ApiErrorKind::Io,
        format!("content too large (max {max_bytes}, actual {actual})"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiErrorKind::Decode, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
