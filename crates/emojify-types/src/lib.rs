//! Shared types, errors and notices for the Emojify workspace.
//!
//! This crate provides the foundational types used across all other Emojify crates:
//! - `EmojifyError`: unified error taxonomy
//! - `EmojiRequest` / `EmojiResponse`: the `/api/getEmojis` wire format
//! - `Notice`: a user-visible notification raised by the screen

use serde::{Deserialize, Serialize};

/// Message shown when a required field is left blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

/// Message shown when the count field does not hold a whole number.
pub const INVALID_COUNT_MESSAGE: &str = "Number of emojis must be a whole number.";

/// Message shown for any transport-level failure.
pub const NETWORK_FAILURE_MESSAGE: &str = "Failed to fetch emojis";

/// Message shown when the service rejects a request without explaining why.
pub const GENERIC_SERVICE_MESSAGE: &str = "Something went wrong";

/// Unified error type for all Emojify subsystems.
#[derive(Debug, thiserror::Error)]
pub enum EmojifyError {
    // === Workflow Errors ===
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A request is already in flight")]
    Busy,

    // === Remote Service Errors ===
    #[error("Network error: {0}")]
    Network(String),

    #[error("Service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    // === Generic ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl EmojifyError {
    /// The text to show the user in a notice.
    ///
    /// Network failures collapse to a generic message; the underlying cause
    /// is only interesting to logs.
    pub fn user_message(&self) -> String {
        match self {
            EmojifyError::Validation(message) => message.clone(),
            EmojifyError::Busy => "Still generating, please wait.".to_string(),
            EmojifyError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            EmojifyError::Service { message, .. } => message.clone(),
            EmojifyError::Io(e) => e.to_string(),
            EmojifyError::Other(message) => message.clone(),
        }
    }

    /// The HTTP status reported by the service, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            EmojifyError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A convenience alias for `Result<T, EmojifyError>`.
pub type Result<T> = std::result::Result<T, EmojifyError>;

// ---------------------------------------------------------------------------
// Wire types: POST /api/getEmojis
// ---------------------------------------------------------------------------

/// Body of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRequest {
    pub prompt: String,
    #[serde(rename = "numOfEmojis")]
    pub num_of_emojis: u32,
}

impl EmojiRequest {
    pub fn new(prompt: impl Into<String>, num_of_emojis: u32) -> Self {
        Self {
            prompt: prompt.into(),
            num_of_emojis,
        }
    }
}

/// Body of both success and failure responses.
///
/// On success `emojis` holds the generated block; on failure it holds a
/// human-readable error, or may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmojiResponse {
    #[serde(default)]
    pub emojis: Option<String>,
}

// ---------------------------------------------------------------------------
// Notice: a user-visible notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl From<&EmojifyError> for Notice {
    fn from(err: &EmojifyError) -> Self {
        Notice::error(err.user_message())
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
