//! CLI command implementations.

mod call;
mod config;
mod doctor;
mod mcp;
mod prompt;
mod tools;

pub use call::run_call;
pub use config::run_config;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use prompt::run_prompt;
pub use tools::run_tools;

use crate::config::{Prompts, Settings};
use crate::tools::ConversationState;

/// Conversation state for commands run outside a host conversation.
fn conversation_state(settings: &Settings) -> ConversationState {
    let developer_prompt = settings.agent.developer_prompt.trim();
    ConversationState {
        api_token: settings
            .api
            .credential()
            .map(|cred| cred.token().to_string()),
        agent_prompt: (!developer_prompt.is_empty()).then(|| developer_prompt.to_string()),
        ..ConversationState::default()
    }
}

fn load_prompts(settings: &Settings) -> crate::Result<Prompts> {
    Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )
}
