//! Leo - Content API tools for book-authoring agents
//!
//! Tools that let conversational agents create, read, update and delete books,
//! chapters and pages on a LlamaPress-style REST content API.
//!
//! # Overview
//!
//! Leo allows you to:
//! - Run the authoring and reading tool catalogue against a content API
//! - Bind an agent's tool subset to an LLM as function definitions
//! - Compose the system message for each agent from its conversation state
//! - Serve an agent's tools to MCP clients
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings and prompt templates
//! - `api` - Content API transport (HTTP and in-memory)
//! - `tools` - The tool adapter, envelopes and tool-call parsing
//! - `agent` - Agent profiles, system messages and tool-call dispatch
//! - `mcp` - MCP stdio server
//!
//! # Example
//!
//! ```rust,no_run
//! use leo::api::create_api;
//! use leo::config::Settings;
//! use leo::tools::{render_outcome, ContentTools, ConversationState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let tools = ContentTools::new(create_api(&settings)?);
//!     let state = ConversationState::with_token("my-token");
//!
//!     let outcome = tools.list_books(&state.credential()?).await;
//!     println!("{}", render_outcome(&outcome));
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;

pub use error::{LeoError, Result};
