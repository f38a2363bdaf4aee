//! Tools command - list an agent's tools.

use crate::agent::AgentKind;
use crate::cli::Output;
use crate::tools::{tool_definitions, tool_spec};
use anyhow::Result;

/// Print the tools available to `agent` and the model they are bound to.
pub fn run_tools(agent: AgentKind, model: &str, json: bool) -> Result<()> {
    let profile = agent.profile();

    if json {
        let definitions = tool_definitions(profile.tools);
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    Output::header(&format!("Tools for the {} agent", agent));
    println!();
    for name in profile.tools {
        let spec = tool_spec(*name);
        Output::tool(spec.name.as_str(), spec.description);
    }
    println!();
    Output::info(&format!("{} tools, bound to model {}", profile.tools.len(), model));

    Ok(())
}
