use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    case_json, delete_hook, guest_client, list_hook, mount_cases, unreachable_client,
};
use client::StateCell;

#[tokio::test]
async fn delete_success_returns_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/trials/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let hook = delete_hook(guest_client(&server));
    assert!(hook.delete_case_by_id(5).await);

    let state = hook.state().snapshot();
    assert_eq!(state.error, None);
    assert!(!state.loading);
}

#[tokio::test]
async fn delete_not_found_returns_false_and_keeps_list() {
    let server = MockServer::start().await;
    mount_cases(&server, json!([case_json(1, "Kept", "still here")])).await;
    Mock::given(method("DELETE"))
        .and(path("/trials/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = guest_client(&server);
    let list = list_hook(client.clone());
    let deleter = delete_hook(client);
    list.refetch().await;

    assert!(!deleter.delete_case_by_id(999).await);
    assert_eq!(
        deleter.state().snapshot().error.as_deref(),
        Some("Failed to delete case: Not Found")
    );

    let state = list.state().snapshot();
    assert_eq!(state.data.len(), 1);
    assert_eq!(state.data[0].title, "Kept");
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn unreachable_backend_returns_false() {
    let client = unreachable_client();
    let hook = delete_hook(client);
    assert!(!hook.delete_case_by_id(1).await);
    let error = hook.state().snapshot().error.unwrap();
    assert!(error.starts_with("Failed to delete case"));
}
