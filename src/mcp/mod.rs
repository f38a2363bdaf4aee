//! MCP (Model Context Protocol) server for Leo.
//!
//! Lets MCP clients call one agent's content tools.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
