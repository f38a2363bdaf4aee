//! The uniform success shape of every tool.

use super::ToolName;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{tool_name, tool_args, tool_output}`.
///
/// `tool_args` carries only the identifying parameters of the call, never a
/// full request body, so a UI can show "which tool ran with what" without
/// knowing each tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEnvelope {
    pub tool_name: String,
    pub tool_args: Map<String, Value>,
    pub tool_output: Value,
}

impl ToolEnvelope {
    pub fn new(tool: ToolName, tool_output: Value) -> Self {
        Self {
            tool_name: tool.as_str().to_string(),
            tool_args: Map::new(),
            tool_output,
        }
    }

    /// Record an identifying argument.
    pub fn arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.tool_args.insert(key.to_string(), value.into());
        self
    }

    /// Record an argument only if it was supplied with content.
    pub fn arg_if_supplied(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.arg(key, v),
            None => self,
        }
    }
}

/// Flatten a tool result into the text handed back to the model.
pub fn render_outcome(outcome: &Result<ToolEnvelope>) -> String {
    match outcome {
        Ok(envelope) => serde_json::to_string(envelope)
            .unwrap_or_else(|e| format!("Error: failed to encode tool output: {}", e)),
        Err(e) => e.to_tool_message(),
    }
}
