//! Configuration module for Leo.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompt, Prompts};
pub use settings::{
    AgentSettings, ApiSettings, GeneralSettings, PromptSettings, Settings, API_TOKEN_ENV,
};
