//! Prompt command - print an agent's composed system message.

use super::{conversation_state, load_prompts};
use crate::agent::{compose_system_message, AgentKind};
use crate::config::Settings;
use anyhow::Result;

/// Print the system message `agent` would run with.
pub fn run_prompt(
    agent: AgentKind,
    book_id: Option<String>,
    chapter_id: Option<String>,
    settings: &Settings,
) -> Result<()> {
    let prompts = load_prompts(settings)?;

    let mut state = conversation_state(settings);
    state.book_id = book_id;
    state.chapter_id = chapter_id;

    println!("{}", compose_system_message(agent, &prompts, &state));
    Ok(())
}
