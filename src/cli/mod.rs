//! CLI module for Leo.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::agent::AgentKind;
use clap::{Parser, Subcommand};

/// Leo - Content API tools for book-authoring agents
///
/// Inspect, run and serve the tools the Leo and student agents use to work on
/// books, chapters and pages.
#[derive(Parser, Debug)]
#[command(name = "leo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tools an agent can call
    Tools {
        /// Agent (leo, leo-student, student)
        #[arg(short, long)]
        agent: Option<AgentKind>,

        /// Print the function definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a single tool against the configured content API
    Call {
        /// Tool name (e.g. list_books)
        tool: String,

        /// Tool arguments as a JSON object
        args: Option<String>,

        /// Agent whose tool set the call must belong to
        #[arg(short, long)]
        agent: Option<AgentKind>,
    },

    /// Print the system message an agent would run with
    Prompt {
        /// Agent (leo, leo-student, student)
        #[arg(short, long)]
        agent: Option<AgentKind>,

        /// Book the student is reading
        #[arg(long)]
        book_id: Option<String>,

        /// Chapter the student is reading
        #[arg(long)]
        chapter_id: Option<String>,
    },

    /// Start MCP server exposing an agent's tools (Claude, etc.)
    Mcp {
        /// Agent (leo, leo-student, student)
        #[arg(short, long)]
        agent: Option<AgentKind>,
    },

    /// Check credential and content API configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
