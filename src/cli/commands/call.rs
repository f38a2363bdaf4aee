//! Call command - run one tool against the content API.

use super::conversation_state;
use crate::agent::{AgentKind, ToolDispatcher};
use crate::api::create_api;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::{render_outcome, ContentTools};
use anyhow::Result;

/// Run the call command.
///
/// Prints the same string the model would receive. Exits non-zero when the
/// tool reported an error.
pub async fn run_call(
    tool: &str,
    args: Option<&str>,
    agent: AgentKind,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Call, &settings)?;

    let api = create_api(&settings)?;
    let dispatcher = ToolDispatcher::new(ContentTools::new(api), agent);
    let state = conversation_state(&settings);

    let spinner = Output::spinner(&format!("Calling {}...", tool));
    let outcome = dispatcher.call(tool, args.unwrap_or_default(), &state).await;
    spinner.finish_and_clear();

    let rendered = render_outcome(&outcome);
    match outcome {
        Ok(envelope) => match serde_json::to_string_pretty(&envelope) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", rendered),
        },
        Err(_) => {
            println!("{}", rendered);
            std::process::exit(1);
        }
    }

    Ok(())
}
