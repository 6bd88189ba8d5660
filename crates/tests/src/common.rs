use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use client::{
    CaseApi, CaseClient, CaseListHook, CreateCaseHook, DeleteCaseHook, FetchState, IdentityContext,
};
use serde_json::{json, Value};
use shared_types::{AuthMode, Case, CreateCaseResult};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const GUEST_ID: &str = "guest-user-000";

pub type Shared<T> = Rc<RefCell<FetchState<T>>>;

/// Client in guest mode against `server`.
pub fn guest_client(server: &MockServer) -> CaseClient {
    let http = reqwest::Client::new();
    let identity = IdentityContext::from_mode(
        &AuthMode::Disabled {
            guest_user_id: GUEST_ID.to_string(),
        },
        http.clone(),
    );
    CaseClient::new(CaseApi::new(http, server.uri()), identity)
}

/// Guest client pointed at a port nothing listens on.
pub fn unreachable_client() -> CaseClient {
    let http = reqwest::Client::new();
    let identity = IdentityContext::from_mode(
        &AuthMode::Disabled {
            guest_user_id: GUEST_ID.to_string(),
        },
        http.clone(),
    );
    CaseClient::new(CaseApi::new(http, "http://127.0.0.1:1"), identity)
}

/// Client in hosted mode: cases on `api`, sessions on `identity`. The
/// session is loaded before returning.
pub async fn hosted_client(api: &MockServer, identity: &MockServer) -> CaseClient {
    let http = reqwest::Client::new();
    let ctx = IdentityContext::from_mode(
        &AuthMode::Enabled {
            frontend_api: identity.uri(),
        },
        http.clone(),
    );
    ctx.start().await;
    CaseClient::new(CaseApi::new(http, api.uri()), ctx)
}

/// Identity backend with one active session for `user_id`.
pub async fn mount_session(server: &MockServer, user_id: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "sessions": [
                    { "id": "sess_test", "status": "active", "user": { "id": user_id } }
                ],
                "last_active_session_id": "sess_test"
            }
        })))
        .mount(server)
        .await;
}

pub async fn mount_token(server: &MockServer, status: u16, jwt: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/client/sessions/sess_test/tokens"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "jwt": jwt })))
        .mount(server)
        .await;
}

pub fn case_json(id: i64, title: &str, background: &str) -> Value {
    json!({ "id": id, "title": title, "case_background": background })
}

pub async fn mount_cases(server: &MockServer, cases: Value) {
    Mock::given(method("GET"))
        .and(path("/trials/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cases))
        .mount(server)
        .await;
}

pub fn list_hook(client: CaseClient) -> CaseListHook<Shared<Vec<Case>>> {
    CaseListHook::new(client, Rc::new(RefCell::new(FetchState::pending(Vec::new()))))
}

pub fn create_hook(client: CaseClient) -> CreateCaseHook<Shared<Option<CreateCaseResult>>> {
    CreateCaseHook::new(client, Rc::new(RefCell::new(FetchState::default())))
}

pub fn delete_hook(client: CaseClient) -> DeleteCaseHook<Shared<()>> {
    DeleteCaseHook::new(client, Rc::new(RefCell::new(FetchState::default())))
}

/// Body of a multipart request as text.
pub fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

/// Value of the text part `name` in a multipart body.
pub fn form_field(body: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{name}\"\r\n\r\n");
    let start = body.find(&marker)? + marker.len();
    let end = body[start..].find("\r\n--")?;
    Some(body[start..start + end].to_string())
}

/// In-memory backend for `/trials/` that remembers created cases.
#[derive(Clone, Default)]
pub struct CaseStore {
    cases: Arc<Mutex<Vec<Value>>>,
}

struct CreateResponder(CaseStore);
struct ListResponder(CaseStore);
struct DeleteResponder(CaseStore);

impl Respond for CreateResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = body_text(request);
        let title = form_field(&body, "title").unwrap_or_default();
        let background = form_field(&body, "case_background").unwrap_or_default();
        let files = body.matches("name=\"files\"").count();

        let mut cases = self.0.cases.lock().unwrap();
        let id = cases.len() as i64 + 1;
        cases.push(case_json(id, &title, &background));
        ResponseTemplate::new(200).set_body_json(json!({
            "trial_id": id,
            "status": "created",
            "files_uploaded": files,
            "threads_generated": 1
        }))
    }
}

impl Respond for ListResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let cases = self.0.cases.lock().unwrap().clone();
        ResponseTemplate::new(200).set_body_json(Value::Array(cases))
    }
}

impl Respond for DeleteResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id: Option<i64> = request
            .url
            .path()
            .rsplit('/')
            .next()
            .and_then(|s| s.parse().ok());
        let mut cases = self.0.cases.lock().unwrap();
        let before = cases.len();
        cases.retain(|c| c["id"].as_i64() != id);
        if cases.len() == before {
            ResponseTemplate::new(404)
        } else {
            ResponseTemplate::new(200).set_body_json(json!({ "status": "deleted" }))
        }
    }
}

impl CaseStore {
    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/trials/"))
            .respond_with(CreateResponder(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/trials/"))
            .respond_with(ListResponder(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/trials/\d+$"))
            .respond_with(DeleteResponder(self.clone()))
            .mount(server)
            .await;
    }

    pub fn len(&self) -> usize {
        self.cases.lock().unwrap().len()
    }
}
