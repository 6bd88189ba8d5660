use serde::{Deserialize, Serialize};

/// Server-assigned key of a case. The backend calls it `trial_id` on
/// creation and `id` everywhere else; both name the same value.
pub type CaseId = i64;

// ── API response types ──────────────────────────────────────────────

/// A case as returned by `GET /trials/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub title: String,
    pub case_background: String,
}

/// Response of `POST /trials/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCaseResult {
    pub trial_id: CaseId,
    pub status: String,
    pub files_uploaded: u32,
    pub threads_generated: u32,
}

/// Response of `DELETE /trials/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCaseResponse {
    pub status: String,
}

// ── Request types ───────────────────────────────────────────────────

/// A file picked in the create form, sent as one `files` multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_from_filename(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Payload of one create-case submission. Built per submit and dropped
/// once the request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateCaseRequest {
    pub title: String,
    pub case_background: String,
    pub initial_arguments: Vec<String>,
    /// An empty list means no `files` parts are sent.
    pub files: Vec<Attachment>,
}

impl CreateCaseRequest {
    pub fn new(title: impl Into<String>, case_background: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            case_background: case_background.into(),
            ..Self::default()
        }
    }

    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.initial_arguments.push(argument.into());
        self
    }

    pub fn file(mut self, attachment: Attachment) -> Self {
        self.files.push(attachment);
        self
    }

    /// `initial_arguments` as the JSON array string the backend expects in
    /// its multipart field.
    pub fn initial_arguments_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.initial_arguments)
    }
}

/// Split the create form's argument textarea into one argument per
/// non-blank line.
pub fn parse_arguments(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Best-effort content type for a picked file when the browser gives none.
pub fn mime_from_filename(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".doc") || lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
