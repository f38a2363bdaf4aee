//! Pre-flight checks before talking to the content API.
//!
//! Validates the credential and base URL up front so a tool call fails with a
//! configuration message instead of a transport error.

use crate::config::{Settings, API_TOKEN_ENV};
use crate::error::{LeoError, Result};
use url::Url;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// A one-off tool call needs a credential and a reachable base URL.
    Call,
    /// The MCP server needs a base URL; a missing credential surfaces per call.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// The in-memory backend has no requirements.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    if settings.api.provider == "memory" {
        return Ok(());
    }
    match operation {
        Operation::Call => {
            check_credential(settings)?;
            check_base_url(settings)?;
        }
        Operation::Serve => {
            check_base_url(settings)?;
        }
    }
    Ok(())
}

/// Check that an API token is configured.
fn check_credential(settings: &Settings) -> Result<()> {
    match settings.api.credential() {
        Some(_) => Ok(()),
        None => Err(LeoError::Config(format!(
            "No API token configured. Set it with: export {}='...' (or api.api_token in the config file)",
            API_TOKEN_ENV
        ))),
    }
}

/// Check that the base URL parses as an http(s) URL.
fn check_base_url(settings: &Settings) -> Result<()> {
    let url = Url::parse(&settings.api.base_url).map_err(|e| {
        LeoError::Config(format!("Invalid api.base_url '{}': {}", settings.api.base_url, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(LeoError::Config(format!(
            "api.base_url must use http or https, got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_has_no_requirements() {
        let mut settings = Settings::default();
        settings.api.provider = "memory".to_string();
        settings.api.base_url = "not a url".to_string();
        assert!(check(Operation::Call, &settings).is_ok());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut settings = Settings::default();
        settings.api.base_url = "ftp://example.com".to_string();
        assert!(check(Operation::Serve, &settings).is_err());

        settings.api.base_url = "::::".to_string();
        assert!(check(Operation::Serve, &settings).is_err());
    }

    #[test]
    fn test_serve_does_not_need_credential() {
        let settings = Settings::default();
        assert!(check(Operation::Serve, &settings).is_ok());
    }
}
