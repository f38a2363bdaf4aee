//! Content tools exposed to the agents.
//!
//! Each tool turns one CRUD intent into content API requests and answers
//! with either a [`ToolEnvelope`] or a [`LeoError`](crate::error::LeoError).
//! Errors are only flattened to text by [`render_outcome`], at the edge
//! facing the model.

mod adapter;
mod call;
mod context;
mod definitions;
mod envelope;
mod resolver;

pub use adapter::ContentTools;
pub use call::{parse_tool_call, parse_tool_value, ToolCall, ToolName};
pub use context::{ConversationState, PageContext, TodoItem, TodoStatus};
pub use definitions::{tool_definitions, tool_spec, ToolSpec, READING_LEVELS};
pub use envelope::{render_outcome, ToolEnvelope};
pub use resolver::{resolve_page_position, ResolvedPage};
