//! MCP tool listing for an agent.

use super::protocol::Tool;
use crate::agent::AgentKind;
use crate::tools::tool_spec;

/// The agent's tools in MCP form.
pub fn get_tools(agent: AgentKind) -> Vec<Tool> {
    agent
        .profile()
        .tools
        .iter()
        .map(|name| {
            let spec = tool_spec(*name);
            Tool {
                name: spec.name.as_str().to_string(),
                description: spec.description.to_string(),
                input_schema: spec.parameters,
            }
        })
        .collect()
}
