//! Content API transport.
//!
//! The LlamaPress content API is a small REST surface over books, chapters
//! and pages. Tools never talk to it directly; they go through the
//! [`ContentApi`] trait so the HTTP implementation and the in-memory one are
//! interchangeable.

mod endpoint;
mod http;
mod memory;
mod payload;

pub use endpoint::Endpoint;
pub use http::HttpContentApi;
pub use memory::{MemoryContentApi, RecordedCall};
pub use payload::{BookAttributes, ChapterAttributes, PageAttributes, ResourcePayload};

use crate::config::Settings;
use crate::error::{LeoError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// HTTP verbs the content API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// True for verbs that change server state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Opaque API token sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token. Empty or whitespace-only tokens count as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The raw token.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Transport for the content API.
///
/// Implementations return the parsed JSON body on 2xx (`Value::Null` for an
/// empty body) and [`LeoError::Upstream`] for any other status.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Perform one request.
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        payload: Option<&Value>,
        credential: &Credential,
    ) -> Result<Value>;
}

/// Build the configured content API backend.
pub fn create_api(settings: &Settings) -> Result<Arc<dyn ContentApi>> {
    match settings.api.provider.as_str() {
        "http" => Ok(Arc::new(HttpContentApi::from_settings(&settings.api)?)),
        "memory" => Ok(Arc::new(MemoryContentApi::new())),
        other => Err(LeoError::Config(format!("Unknown API provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_is_absent() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert_eq!(Credential::new("tok").unwrap().token(), "tok");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("secret-token").unwrap();
        assert!(!format!("{:?}", cred).contains("secret"));
    }

    #[test]
    fn test_create_api_rejects_unknown_provider() {
        let mut settings = Settings::default();
        settings.api.provider = "carrier-pigeon".to_string();
        assert!(matches!(create_api(&settings), Err(LeoError::Config(_))));

        settings.api.provider = "memory".to_string();
        assert!(create_api(&settings).is_ok());
    }
}
