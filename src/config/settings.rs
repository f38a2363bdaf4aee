//! Configuration settings for Leo.

use crate::agent::AgentKind;
use crate::api::Credential;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `api.api_token`.
pub const API_TOKEN_ENV: &str = "LLAMAPRESS_API_TOKEN";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub agent: AgentSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level when no -v flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Content API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Backend (http, memory).
    pub provider: String,
    /// Base URL of the content API.
    pub base_url: String,
    /// Scheme placed before the token in the Authorization header.
    pub auth_scheme: String,
    /// API token. `LLAMAPRESS_API_TOKEN` takes precedence.
    pub api_token: Option<String>,
    /// Request timeout in seconds. Unset leaves the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            provider: "http".to_string(),
            base_url: "http://localhost:3000".to_string(),
            auth_scheme: "Bearer".to_string(),
            api_token: None,
            timeout_secs: None,
        }
    }
}

impl ApiSettings {
    /// Resolve the credential from the environment, then the config file.
    pub fn credential(&self) -> Option<Credential> {
        std::env::var(API_TOKEN_ENV)
            .ok()
            .and_then(Credential::new)
            .or_else(|| self.api_token.clone().and_then(Credential::new))
    }
}

/// Agent defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Agent used when none is given on the command line.
    pub default_agent: AgentKind,
    /// Model the host framework should bind the tools to.
    pub model: String,
    /// Developer instructions appended to every system prompt.
    pub developer_prompt: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            default_agent: AgentKind::Leo,
            model: "gpt-4.1".to_string(),
            developer_prompt: String::new(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LeoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("leo")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.provider, "http");
        assert_eq!(settings.api.auth_scheme, "Bearer");
        assert!(settings.api.timeout_secs.is_none());
        assert_eq!(settings.agent.default_agent, AgentKind::Leo);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [api]
            base_url = "https://books.example.com"

            [agent]
            default_agent = "student"
            "#,
        )
        .unwrap();
        assert_eq!(settings.api.base_url, "https://books.example.com");
        assert_eq!(settings.api.auth_scheme, "Bearer");
        assert_eq!(settings.agent.default_agent, AgentKind::Student);
        assert_eq!(settings.agent.model, "gpt-4.1");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.api.timeout_secs = Some(30);
        settings.agent.developer_prompt = "Keep answers short.".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.api.timeout_secs, Some(30));
        assert_eq!(loaded.agent.developer_prompt, "Keep answers short.");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:3000");
    }
}
