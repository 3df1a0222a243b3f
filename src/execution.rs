//! Contract with the remote code-execution service.
//!
//! The session core never performs the request itself. These types describe
//! what the caller sends and receives, and [`interpret_response`] maps an HTTP
//! status plus body to a typed outcome the caller can then hand to
//! [`TabManager::set_code_response`](crate::tab::TabManager::set_code_response).

use crate::tab::Tab;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One source file in an execution request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// Request body: language plus the files to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRequest {
    pub language: String,
    pub files: Vec<SourceFile>,
}

impl CodeRequest {
    /// Build a single-file request from a tab's language and current content
    pub fn from_tab(tab: &Tab) -> Self {
        Self {
            language: tab.metadata.language_name.clone(),
            files: vec![SourceFile {
                name: tab.filename.clone(),
                content: tab.content.clone(),
            }],
        }
    }

    /// Wrap with the runtime image that should execute it
    pub fn with_image(self) -> ImageCodeRequest {
        ImageCodeRequest {
            image: image_name(&self.language).to_string(),
            payload: self,
        }
    }
}

/// Request variant addressed to a named runtime image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCodeRequest {
    pub image: String,
    pub payload: CodeRequest,
}

/// Runtime image for a language. Languages without a special case use their own name.
pub fn image_name(language: &str) -> &str {
    match language {
        "go" => "golang",
        "d" => "dlang",
        "c" | "cpp" => "clang",
        other => other,
    }
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeResponse {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// Compile or runtime error reported by the service
    #[serde(default)]
    pub error: String,
}

impl CodeResponse {
    /// Whether the run reported an error or wrote to stderr
    pub fn is_failure(&self) -> bool {
        !self.error.is_empty() || !self.stderr.is_empty()
    }
}

/// Error-shaped response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Typed failure of an execution call, derived from the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("URI not found")]
    NotFound,

    /// The service answered 400, 401 or 500 with a message
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Received {status} with body {body}")]
    Unexpected { status: u16, body: String },

    #[error("Malformed response body (status {status}): {reason}")]
    MalformedBody { status: u16, reason: String },
}

/// Map a raw HTTP status and body to an execution outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<CodeResponse, ExecutionError> {
    match status {
        200 => serde_json::from_str(body).map_err(|e| ExecutionError::MalformedBody {
            status,
            reason: e.to_string(),
        }),
        404 => Err(ExecutionError::NotFound),
        400 | 401 | 500 => {
            let parsed: ErrorResponse =
                serde_json::from_str(body).map_err(|e| ExecutionError::MalformedBody {
                    status,
                    reason: e.to_string(),
                })?;
            Err(ExecutionError::Rejected {
                status,
                message: parsed.message,
            })
        }
        _ => {
            log::warn!("Execution service returned unexpected status {status}");
            Err(ExecutionError::Unexpected {
                status,
                body: body.to_string(),
            })
        }
    }
}
