//! Leo CLI entry point.

use anyhow::Result;
use clap::Parser;
use leo::cli::{commands, Cli, Commands};
use leo::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout belongs to command output and the MCP transport
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("leo={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Tools { agent, json } => {
            let agent = agent.unwrap_or(settings.agent.default_agent);
            commands::run_tools(agent, &settings.agent.model, *json)?;
        }

        Commands::Call { tool, args, agent } => {
            let agent = agent.unwrap_or(settings.agent.default_agent);
            commands::run_call(tool, args.as_deref(), agent, settings).await?;
        }

        Commands::Prompt {
            agent,
            book_id,
            chapter_id,
        } => {
            let agent = agent.unwrap_or(settings.agent.default_agent);
            commands::run_prompt(agent, book_id.clone(), chapter_id.clone(), &settings)?;
        }

        Commands::Mcp { agent } => {
            let agent = agent.unwrap_or(settings.agent.default_agent);
            commands::run_mcp(agent, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
