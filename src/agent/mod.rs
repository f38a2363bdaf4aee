//! Agents: the Leo authoring assistants and the student reading companion.
//!
//! An agent here is configuration (prompt, tool subset, state schema) plus
//! the dispatcher that runs the tool calls its model asks for. The
//! reasoning loop itself belongs to the host framework.

mod dispatch;
mod profile;
mod prompt;

pub use dispatch::{ToolCallRecord, ToolDispatcher};
pub use profile::{AgentKind, AgentProfile, StateField};
pub use prompt::compose_system_message;
