//! REST calls against the case-management backend.
//!
//! Each function performs exactly one round trip. Non-2xx statuses become
//! [`AppErrorKind::RequestFailed`](shared_types::AppErrorKind), bodies that
//! do not match the declared shape become `Parse` errors.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use shared_types::{
    ApiOperation, AppConfig, AppError, Case, CaseId, ConfigError, CreateCaseRequest,
    CreateCaseResult, DeleteCaseResponse,
};

use crate::auth::IdentityContext;
use crate::request::{identity_headers, BodyKind};

/// Thin wrapper over the `/trials/` endpoints.
#[derive(Debug, Clone)]
pub struct CaseApi {
    http: reqwest::Client,
    base_url: String,
}

impl CaseApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn trials_url(&self) -> String {
        format!("{}/trials/", self.base_url)
    }

    fn trial_url(&self, id: CaseId) -> String {
        format!("{}/trials/{}", self.base_url, id)
    }

    /// `GET /trials/`. Cases come back in the order the backend sent them.
    #[tracing::instrument(skip(self, headers))]
    pub async fn list_cases(&self, headers: HeaderMap) -> Result<Vec<Case>, AppError> {
        let op = ApiOperation::ListCases;
        let response = self
            .http
            .get(self.trials_url())
            .headers(with_json_content_type(headers))
            .send()
            .await
            .map_err(|e| network_error(op, e))?;

        let cases: Vec<Case> = read_json(op, response).await?;
        tracing::debug!(count = cases.len(), "Cases fetched");
        Ok(cases)
    }

    /// `POST /trials/` as multipart: `title`, `case_background`,
    /// `initial_arguments` (a JSON array string) and one `files` part per
    /// attachment.
    #[tracing::instrument(
        skip(self, request, headers),
        fields(title = %request.title, files = request.files.len())
    )]
    pub async fn create_case(
        &self,
        request: &CreateCaseRequest,
        headers: HeaderMap,
    ) -> Result<CreateCaseResult, AppError> {
        let op = ApiOperation::CreateCase;
        let form = build_form(request)?;
        let response = self
            .http
            .post(self.trials_url())
            .headers(without_content_type(headers))
            .multipart(form)
            .send()
            .await
            .map_err(|e| network_error(op, e))?;

        let result: CreateCaseResult = read_json(op, response).await?;
        tracing::info!(
            trial_id = result.trial_id,
            files_uploaded = result.files_uploaded,
            threads_generated = result.threads_generated,
            "Case created"
        );
        Ok(result)
    }

    /// `DELETE /trials/{id}`.
    #[tracing::instrument(skip(self, headers))]
    pub async fn delete_case(
        &self,
        case_id: CaseId,
        headers: HeaderMap,
    ) -> Result<DeleteCaseResponse, AppError> {
        let op = ApiOperation::DeleteCase;
        let response = self
            .http
            .delete(self.trial_url(case_id))
            .headers(with_json_content_type(headers))
            .send()
            .await
            .map_err(|e| network_error(op, e))?;

        let deleted: DeleteCaseResponse = read_json(op, response).await?;
        tracing::info!(case_id, status = %deleted.status, "Case deleted");
        Ok(deleted)
    }
}

/// Caller headers win, except the content type which this layer owns.
fn with_json_content_type(mut headers: HeaderMap) -> HeaderMap {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// A hand-set multipart content type would lose the boundary parameter.
fn without_content_type(mut headers: HeaderMap) -> HeaderMap {
    headers.remove(CONTENT_TYPE);
    headers
}

/// Assemble the create-case multipart body.
pub fn build_form(request: &CreateCaseRequest) -> Result<Form, AppError> {
    let op = ApiOperation::CreateCase;
    let arguments = request
        .initial_arguments_json()
        .map_err(|e| AppError::encoding(op, e))?;

    let mut form = Form::new()
        .text("title", request.title.clone())
        .text("case_background", request.case_background.clone())
        .text("initial_arguments", arguments);

    for file in &request.files {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AppError::encoding(op, e))?;
        form = form.part("files", part);
    }

    Ok(form)
}

fn network_error(op: ApiOperation, err: reqwest::Error) -> AppError {
    tracing::warn!(operation = %op, error = %err, "Request did not complete");
    AppError::network(op, err)
}

async fn read_json<T: DeserializeOwned>(
    op: ApiOperation,
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let err = AppError::request_failed(
            op,
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
        );
        tracing::warn!(operation = %op, status = status.as_u16(), "{}", err);
        return Err(err);
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| network_error(op, e))?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(
            operation = %op,
            error = %e,
            "Response body did not match the expected shape"
        );
        AppError::parse(op, status.as_u16(), e)
    })
}

/// API calls bound to the process identity: every call computes fresh
/// identity headers and then performs the request.
#[derive(Debug, Clone)]
pub struct CaseClient {
    api: CaseApi,
    identity: IdentityContext,
}

impl CaseClient {
    pub fn new(api: CaseApi, identity: IdentityContext) -> Self {
        Self { api, identity }
    }

    /// Build the identity and the API client from configuration. Both share
    /// one HTTP client. Fails when authentication is enabled but cannot be
    /// set up; callers must not fall back to guest mode.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::new();
        let identity = IdentityContext::from_config(&config.auth, http.clone())?;
        let api = CaseApi::new(http, config.api.base_url.clone());
        Ok(Self::new(api, identity))
    }

    pub fn api(&self) -> &CaseApi {
        &self.api
    }

    pub fn identity(&self) -> &IdentityContext {
        &self.identity
    }

    pub async fn list_cases(&self) -> Result<Vec<Case>, AppError> {
        let headers = identity_headers(&self.identity, BodyKind::Json).await;
        self.api.list_cases(headers).await
    }

    pub async fn create_case(
        &self,
        request: &CreateCaseRequest,
    ) -> Result<CreateCaseResult, AppError> {
        let headers = identity_headers(&self.identity, BodyKind::Multipart).await;
        self.api.create_case(request, headers).await
    }

    pub async fn delete_case(&self, case_id: CaseId) -> Result<DeleteCaseResponse, AppError> {
        let headers = identity_headers(&self.identity, BodyKind::Json).await;
        self.api.delete_case(case_id, headers).await
    }
}
