//! Error types for Leo.

use thiserror::Error;

/// Coarse classification of a [`LeoError`].
///
/// Internal callers branch on the kind; the language model only ever sees
/// the flattened message from [`LeoError::to_tool_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential in the conversation state. Never retryable.
    MissingCredential,
    /// Arguments rejected before any network call.
    Validation,
    /// The content API or the transport to it failed.
    Upstream,
    /// Local failures: config, IO, serialization, protocol plumbing.
    Internal,
}

/// Library-level error type for Leo operations.
#[derive(Error, Debug)]
pub enum LeoError {
    #[error("api_token is required but not provided in state.")]
    MissingCredential,

    #[error("No fields provided to update.")]
    NoFieldsProvided,

    #[error("Page {requested} does not exist in this chapter. Chapter has {count} pages.")]
    PageOutOfRange { requested: u32, count: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Agent error: {0}")]
    Agent(String),
}

impl LeoError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeoError::MissingCredential => ErrorKind::MissingCredential,
            LeoError::NoFieldsProvided
            | LeoError::PageOutOfRange { .. }
            | LeoError::InvalidInput(_) => ErrorKind::Validation,
            LeoError::Upstream { .. } | LeoError::UnexpectedResponse(_) | LeoError::Http(_) => {
                ErrorKind::Upstream
            }
            LeoError::Config(_)
            | LeoError::Io(_)
            | LeoError::Json(_)
            | LeoError::TomlParse(_)
            | LeoError::Agent(_) => ErrorKind::Internal,
        }
    }

    /// True when the upstream API answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LeoError::Upstream { status: 404, .. })
    }

    /// Flatten into the natural-language string handed back to the model.
    pub fn to_tool_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Result type alias for Leo operations.
pub type Result<T> = std::result::Result<T, LeoError>;
