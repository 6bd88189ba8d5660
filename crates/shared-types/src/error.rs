use serde::{Deserialize, Serialize};
use std::fmt;

/// The REST calls the client can make. Each has a fixed failure context
/// that prefixes its error messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    ListCases,
    CreateCase,
    DeleteCase,
}

impl ApiOperation {
    pub fn failure_context(self) -> &'static str {
        match self {
            ApiOperation::ListCases => "Failed to fetch cases",
            ApiOperation::CreateCase => "Failed to create case",
            ApiOperation::DeleteCase => "Failed to delete case",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiOperation::ListCases => write!(f, "listCases"),
            ApiOperation::CreateCase => write!(f, "createCase"),
            ApiOperation::DeleteCase => write!(f, "deleteCase"),
        }
    }
}

/// Categorization of client errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    /// The backend answered with a non-2xx status.
    RequestFailed,
    /// No response was received.
    Network,
    /// A 2xx response whose body does not match the declared shape.
    Parse,
    /// The request body could not be assembled.
    Encoding,
    /// Rejected because the same action is already pending.
    InFlight,
    /// The consumer went away before the response was committed.
    Cancelled,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::RequestFailed => write!(f, "RequestFailed"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::Parse => write!(f, "Parse"),
            AppErrorKind::Encoding => write!(f, "Encoding"),
            AppErrorKind::InFlight => write!(f, "InFlight"),
            AppErrorKind::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Structured error returned by every API client function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub operation: ApiOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl AppError {
    /// Non-2xx response. The message is `"<failure context>: <status text>"`.
    pub fn request_failed(operation: ApiOperation, status: u16, status_text: &str) -> Self {
        let status_text = if status_text.is_empty() {
            status.to_string()
        } else {
            status_text.to_string()
        };
        Self {
            kind: AppErrorKind::RequestFailed,
            operation,
            status: Some(status),
            message: format!("{}: {}", operation.failure_context(), status_text),
        }
    }

    pub fn network(operation: ApiOperation, detail: impl fmt::Display) -> Self {
        Self {
            kind: AppErrorKind::Network,
            operation,
            status: None,
            message: format!("{}: {}", operation.failure_context(), detail),
        }
    }

    pub fn parse(operation: ApiOperation, status: u16, detail: impl fmt::Display) -> Self {
        Self {
            kind: AppErrorKind::Parse,
            operation,
            status: Some(status),
            message: format!(
                "{}: malformed response body ({})",
                operation.failure_context(),
                detail
            ),
        }
    }

    pub fn encoding(operation: ApiOperation, detail: impl fmt::Display) -> Self {
        Self {
            kind: AppErrorKind::Encoding,
            operation,
            status: None,
            message: format!("{}: {}", operation.failure_context(), detail),
        }
    }

    pub fn in_flight(operation: ApiOperation) -> Self {
        Self {
            kind: AppErrorKind::InFlight,
            operation,
            status: None,
            message: format!(
                "{}: a previous request is still in progress",
                operation.failure_context()
            ),
        }
    }

    pub fn cancelled(operation: ApiOperation) -> Self {
        Self {
            kind: AppErrorKind::Cancelled,
            operation,
            status: None,
            message: format!("{}: cancelled", operation.failure_context()),
        }
    }

    /// Message shown to the user and stored in a hook's `error` slot.
    pub fn friendly_message(&self) -> String {
        self.message.clone()
    }

    pub fn is_request_failure(&self) -> bool {
        self.kind == AppErrorKind::RequestFailed
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}
