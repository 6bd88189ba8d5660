use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{Attachment, CreateCaseRequest};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    case_json, create_hook, delete_hook, guest_client, list_hook, mount_cases, CaseStore,
};
use client::StateCell;

#[tokio::test]
async fn loading_is_set_while_the_request_is_pending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trials/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([case_json(1, "Slow", "")]))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let hook = list_hook(guest_client(&server));
    let observed = tokio::join!(hook.refetch(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        hook.state().snapshot()
    })
    .1;

    assert!(observed.loading);
    assert!(observed.data.is_empty());
    let settled = hook.state().snapshot();
    assert!(!settled.loading);
    assert_eq!(settled.data.len(), 1);
}

#[tokio::test]
async fn refetch_is_idempotent() {
    let server = MockServer::start().await;
    mount_cases(&server, json!([case_json(1, "A", "x"), case_json(2, "B", "y")])).await;

    let hook = list_hook(guest_client(&server));
    hook.refetch().await;
    let first = hook.state().snapshot();
    hook.refetch().await;
    let second = hook.state().snapshot();

    assert_eq!(first, second);
}

#[tokio::test]
async fn retry_after_failure_clears_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trials/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_cases(&server, json!([case_json(4, "Recovered", "")])).await;

    let hook = list_hook(guest_client(&server));
    hook.refetch().await;
    assert_eq!(
        hook.state().snapshot().error.as_deref(),
        Some("Failed to fetch cases: Service Unavailable")
    );

    hook.refetch().await;
    let state = hook.state().snapshot();
    assert_eq!(state.error, None);
    assert_eq!(state.data[0].title, "Recovered");
}

#[tokio::test]
async fn created_case_shows_up_in_the_list() {
    let server = MockServer::start().await;
    let store = CaseStore::default();
    store.mount(&server).await;

    let client = guest_client(&server);
    let creator = create_hook(client.clone());
    let list = list_hook(client);

    let request = CreateCaseRequest::new("People v. Roe", "Contract dispute")
        .argument("Statute of limitations")
        .file(Attachment::new("exhibit-a.txt", b"exhibit".to_vec()));
    let result = creator.create_case(&request).await.unwrap();
    assert_eq!(result.files_uploaded, 1);

    list.refetch().await;
    let state = list.state().snapshot();
    let created = state
        .data
        .iter()
        .find(|c| c.id == result.trial_id)
        .expect("created case listed");
    assert_eq!(created.title, "People v. Roe");
    assert_eq!(created.case_background, "Contract dispute");
}

#[tokio::test]
async fn delete_then_refetch_removes_case() {
    let server = MockServer::start().await;
    let store = CaseStore::default();
    store.mount(&server).await;

    let client = guest_client(&server);
    let creator = create_hook(client.clone());
    let deleter = delete_hook(client.clone());
    let list = list_hook(client);

    let first = creator
        .create_case(&CreateCaseRequest::new("First", ""))
        .await
        .unwrap();
    creator
        .create_case(&CreateCaseRequest::new("Second", ""))
        .await
        .unwrap();

    assert!(deleter.delete_case_by_id(first.trial_id).await);
    list.refetch().await;

    let titles: Vec<String> = list
        .state()
        .snapshot()
        .data
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["Second".to_string()]);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn cancelled_hooks_reject_new_work() {
    let server = MockServer::start().await;
    let store = CaseStore::default();
    store.mount(&server).await;

    let client = guest_client(&server);
    let creator = create_hook(client.clone());
    let deleter = delete_hook(client);
    creator.guard().cancel();
    deleter.guard().cancel();

    let err = creator
        .create_case(&CreateCaseRequest::new("Never sent", ""))
        .await
        .unwrap_err();
    assert_eq!(err.kind, shared_types::AppErrorKind::Cancelled);
    assert!(!deleter.delete_case_by_id(1).await);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn refetch_during_pending_load_commits_fresh_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trials/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([case_json(1, "Deleted soon", "")]))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_cases(&server, json!([])).await;
    Mock::given(method("DELETE"))
        .and(path("/trials/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "deleted" })))
        .mount(&server)
        .await;

    let client = guest_client(&server);
    let list = list_hook(client.clone());
    let deleter = delete_hook(client);

    tokio::join!(list.refetch(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(deleter.delete_case_by_id(1).await);
        list.refetch().await;
    });

    let state = list.state().snapshot();
    assert!(!state.loading);
    assert!(state.data.is_empty());
    let gets = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(gets, 2);
}
