use std::fs;
use std::time::Duration;

use jobdesk_client::{
    ApiErrorKind, ClientSettings, JobsApi, NewJobRequest, ReqwestJobsApi,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestJobsApi {
    ReqwestJobsApi::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .unwrap()
}

fn job_json(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": status,
        "created_at": "2024-05-01T12:00:00",
        "user": "user@example.com",
        "folder_in": "/data/in",
        "folder_out": "/data/out",
        "files": []
    })
}

fn file_json(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "job_id": 1,
        "filename": format!("f{id}.json"),
        "filepath": format!("/data/in/f{id}.json"),
        "status": status,
        "content_out": null,
        "error": null,
        "created_at": "2024-05-01T12:00:00.250000",
        "processed_at": null
    })
}

#[tokio::test]
async fn lists_jobs_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([job_json(9, "completed"), job_json(4, "pending")])),
        )
        .mount(&server)
        .await;

    let jobs = api_for(&server).list_jobs().await.unwrap();
    let ids: Vec<_> = jobs.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![9, 4]);
    assert_eq!(jobs[0].status, "completed");
    assert_eq!(jobs[1].created_at.to_string(), "2024-05-01 12:00:00");
}

#[tokio::test]
async fn accepts_state_field_and_extra_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "state": "processing",
            "created_at": "2024-05-01T12:00:00",
            "user": "user@example.com",
            "folder_in": "/in",
            "folder_out": "/out",
            "files": [{
                "id": 5,
                "job_id": 2,
                "filename": "a.txt",
                "filepath": "/in/a.txt",
                "state": "active",
                "content": "raw input",
                "created_at": "2024-05-01T12:00:01",
                "processed_at": "2024-05-01T12:00:02"
            }]
        })))
        .mount(&server)
        .await;

    let job = api_for(&server).get_job(2).await.unwrap();
    assert_eq!(job.status, "processing");
    assert_eq!(job.files[0].status, "active");
    assert_eq!(job.files[0].content_out, None);
    assert!(job.files[0].processed_at.is_some());
}

#[tokio::test]
async fn creates_job_from_folders_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .and(body_json(json!({"folder_in": "/a", "folder_out": "/b"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_json(11, "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let job = api_for(&server)
        .create_job(&NewJobRequest::Folders {
            folder_in: "/a".to_string(),
            folder_out: "/b".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(job.id, 11);
}

#[tokio::test]
async fn creates_job_from_archive_as_multipart() {
    let temp = tempfile::TempDir::new().unwrap();
    let archive = temp.path().join("batch.zip");
    fs::write(&archive, "PK-not-really-zipped").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"files\"; filename=\"batch.zip\""))
        .and(body_string_contains("PK-not-really-zipped"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_json(12, "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let job = api_for(&server)
        .create_job(&NewJobRequest::Upload {
            paths: vec![archive],
        })
        .await
        .unwrap();
    assert_eq!(job.id, 12);
}

#[tokio::test]
async fn missing_upload_file_is_an_io_error() {
    let server = MockServer::start().await;
    let err = api_for(&server)
        .create_job(&NewJobRequest::Upload {
            paths: vec!["/definitely/not/here.zip".into()],
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Io);
}

#[tokio::test]
async fn fetches_each_files_content_by_id() {
    let server = MockServer::start().await;
    for (id, body) in [(1, "input one"), (2, "input two")] {
        Mock::given(method("GET"))
            .and(path(format!("/api/files/{id}/content")))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body, "text/plain; charset=utf-8"),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = api_for(&server);
    assert_eq!(api.get_file_content(1).await.unwrap(), "input one");
    assert_eq!(api.get_file_content(2).await.unwrap(), "input two");
}

#[tokio::test]
async fn decodes_content_using_declared_charset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/3/content"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(vec![b'c', b'a', b'f', 0xE9], "text/plain; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    assert_eq!(api_for(&server).get_file_content(3).await.unwrap(), "café");
}

#[tokio::test]
async fn oversized_content_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/4/content"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789abcdef"))
        .mount(&server)
        .await;

    let api = ReqwestJobsApi::new(ClientSettings {
        base_url: server.uri(),
        max_content_bytes: 8,
        ..ClientSettings::default()
    })
    .unwrap();
    let err = api.get_file_content(4).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Io);
}

#[tokio::test]
async fn requeue_sends_status_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/files/3/status"))
        .and(query_param("status", "init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json(3, "init")))
        .expect(1)
        .mount(&server)
        .await;

    let file = api_for(&server).update_file_status(3, "init").await.unwrap();
    assert_eq!(file.id, 3);
    assert_eq!(file.status, "init");
}

#[tokio::test]
async fn delete_returns_confirmation_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/jobs/8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Job deleted successfully"})),
        )
        .mount(&server)
        .await;

    let message = api_for(&server).delete_job(8).await.unwrap();
    assert_eq!(message, "Job deleted successfully");
}

#[tokio::test]
async fn error_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/404/files"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Job not found"})))
        .mount(&server)
        .await;

    let err = api_for(&server).list_files(404).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus(404));
}

#[tokio::test]
async fn empty_list_is_not_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let files = api_for(&server).list_files(1).await.unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_jobs().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let api = ReqwestJobsApi::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    })
    .unwrap();
    let err = api.list_jobs().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Timeout);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/svc/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReqwestJobsApi::new(ClientSettings {
        base_url: format!("{}/svc", server.uri()),
        ..ClientSettings::default()
    })
    .unwrap();
    assert!(api.list_jobs().await.unwrap().is_empty());
}

#[test]
fn rejects_unparseable_base_url() {
    let err = ReqwestJobsApi::new(ClientSettings {
        base_url: "not a url".to_string(),
        ..ClientSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::InvalidUrl);
}
