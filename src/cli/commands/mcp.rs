//! MCP command implementation.

use super::conversation_state;
use crate::agent::{AgentKind, ToolDispatcher};
use crate::api::create_api;
use crate::cli::preflight::{self, Operation};
use crate::config::Settings;
use crate::mcp::McpServer;
use crate::tools::ContentTools;
use anyhow::Result;
use tracing::warn;

/// Run the MCP server for `agent`.
pub async fn run_mcp(agent: AgentKind, settings: Settings) -> Result<()> {
    preflight::check(Operation::Serve, &settings)?;

    let state = conversation_state(&settings);
    if state.api_token.is_none() {
        warn!("No API token configured; every tool call will report a missing credential");
    }

    let api = create_api(&settings)?;
    let dispatcher = ToolDispatcher::new(ContentTools::new(api), agent);
    let server = McpServer::new(dispatcher, state);
    server.run().await
}
