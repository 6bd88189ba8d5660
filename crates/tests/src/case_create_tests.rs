use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, Attachment, CreateCaseRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{body_text, create_hook, form_field, guest_client};
use client::StateCell;

async fn mount_created(server: &MockServer, trial_id: i64, files: u32) {
    Mock::given(method("POST"))
        .and(path("/trials/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trial_id": trial_id,
            "status": "created",
            "files_uploaded": files,
            "threads_generated": 2
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_without_files_sends_fields_only() {
    let server = MockServer::start().await;
    mount_created(&server, 12, 0).await;

    let request = CreateCaseRequest::new("State v. Doe", "Burglary at 5th street")
        .argument("Alibi witness available");
    let result = guest_client(&server).create_case(&request).await.unwrap();
    assert_eq!(result.trial_id, 12);
    assert_eq!(result.files_uploaded, 0);

    let received = server.received_requests().await.unwrap();
    let body = body_text(&received[0]);
    assert_eq!(form_field(&body, "title").as_deref(), Some("State v. Doe"));
    assert_eq!(
        form_field(&body, "case_background").as_deref(),
        Some("Burglary at 5th street")
    );
    assert_eq!(
        form_field(&body, "initial_arguments").as_deref(),
        Some(r#"["Alibi witness available"]"#)
    );
    assert!(!body.contains(r#"name="files""#));
}

#[tokio::test]
async fn create_sends_one_part_per_file() {
    let server = MockServer::start().await;
    mount_created(&server, 3, 2).await;

    let request = CreateCaseRequest::new("Doe", "")
        .file(Attachment::new("statement.pdf", b"%PDF-1.4".to_vec()))
        .file(Attachment::new("notes.txt", b"notes".to_vec()));
    let result = guest_client(&server).create_case(&request).await.unwrap();
    assert_eq!(result.files_uploaded, 2);

    let received = server.received_requests().await.unwrap();
    let body = body_text(&received[0]);
    assert_eq!(body.matches(r#"name="files""#).count(), 2);
    assert!(body.contains(r#"filename="statement.pdf""#));
    assert!(body.contains("Content-Type: application/pdf"));
    assert_eq!(form_field(&body, "initial_arguments").as_deref(), Some("[]"));
}

#[tokio::test]
async fn rejected_create_is_returned_and_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trials/"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let hook = create_hook(guest_client(&server));
    let err = hook
        .create_case(&CreateCaseRequest::new("Doe", ""))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::RequestFailed);

    let state = hook.state().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to create case: Bad Request"));
    assert!(!state.loading);
}
