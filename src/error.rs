//! Error Types
//!
//! Local validation errors, backend errors, and the composite errors the
//! contest editor reports.

use thiserror::Error;

/// Failure talking to the REST backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (network down, CORS, DNS)
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server rejected the request (status {status})")]
    Rejected { status: u16, detail: Option<String> },

    /// `If-Match` precondition failed: someone else changed the resource
    #[error("resource changed on the server")]
    Conflict,

    #[error("not authenticated")]
    Unauthorized,

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            412 => ApiError::Conflict,
            _ => ApiError::Rejected {
                status,
                detail: extract_detail(body),
            },
        }
    }

    /// Text for the inline banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach server".to_string(),
            ApiError::Rejected { detail: Some(detail), .. } => detail.clone(),
            ApiError::Rejected { status, detail: None } => {
                format!("Server rejected the request (status {})", status)
            }
            ApiError::Conflict => {
                "Contest problems were changed by someone else; reload and retry".to_string()
            }
            ApiError::Unauthorized => "Please log in again".to_string(),
            ApiError::Decode(_) => "Server sent an unexpected response".to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"detail": "..."}` and `{"message": "..."}`; anything else yields `None`.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Rejected numeric edit in the roster table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("value must be at least {min}")]
    OutOfRange { value: i64, min: i64 },

    #[error("problem is not in the contest")]
    UnknownItem,
}

/// Submit-time checks on the contest form, in the order they run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Description is required")]
    MissingDescription,

    #[error("Start time and end time are required")]
    MissingTimes,

    #[error("{0} time is not a valid date and time")]
    InvalidTime(&'static str),

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Add at least one problem to the contest")]
    EmptyRoster,

    #[error("Two problems share order {0}; give each problem its own order")]
    DuplicateOrder(u32),

    #[error("Time limit must be a positive number of milliseconds")]
    InvalidTimeLimit,

    #[error("Memory limit must be a positive number of kilobytes")]
    InvalidMemoryLimit,
}

/// Reconciliation stopped before the remote side matched the roster
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("could not load current contest problems: {0}")]
    Snapshot(#[source] ApiError),

    #[error("{applied} of {total} changes applied before failure: {source}")]
    Interrupted {
        #[source]
        source: ApiError,
        applied: usize,
        total: usize,
    },
}

impl SyncError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            SyncError::Snapshot(e) => e,
            SyncError::Interrupted { source, .. } => source,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            SyncError::Snapshot(e) => e.user_message(),
            SyncError::Interrupted { source, applied: 0, .. } => source.user_message(),
            SyncError::Interrupted { source, applied, total } => format!(
                "{} ({} of {} problem changes were saved; save again to finish)",
                source.user_message(),
                applied,
                total
            ),
        }
    }
}

/// Everything that can go wrong pressing "Save" on the contest editor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl SubmitError {
    /// Backend error behind this failure, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SubmitError::Invalid(_) => None,
            SubmitError::Api(e) => Some(e),
            SubmitError::Sync(e) => Some(e.api_error()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(e) => e.to_string(),
            SubmitError::Api(e) => e.user_message(),
            SubmitError::Sync(e) => e.user_message(),
        }
    }
}
