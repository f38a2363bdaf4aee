//! Doctor command - verify credential and content API configuration.

use crate::cli::Output;
use crate::config::{Settings, API_TOKEN_ENV};
use console::style;
use url::Url;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Leo Doctor");
    println!();
    println!("Checking content API configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Content API").bold());
    let api_checks = vec![
        check_provider(settings),
        check_base_url(&settings.api.base_url),
        check_credential(settings),
    ];
    for check in &api_checks {
        check.print();
    }
    checks.extend(api_checks);

    println!();

    println!("{}", style("Agent").bold());
    let agent_checks = vec![
        CheckResult::ok("Default agent", settings.agent.default_agent.as_str()),
        check_model(&settings.agent.model),
    ];
    for check in &agent_checks {
        check.print();
    }
    checks.extend(agent_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![check_config_file(), check_prompt_dir(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Leo.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Leo is ready to use.");
    }

    Ok(())
}

fn check_provider(settings: &Settings) -> CheckResult {
    match settings.api.provider.as_str() {
        "http" => CheckResult::ok("Provider", "http"),
        "memory" => CheckResult::warning(
            "Provider",
            "memory (nothing is persisted)",
            "Set api.provider = \"http\" to use a real content API",
        ),
        other => CheckResult::error(
            "Provider",
            &format!("unknown provider '{}'", other),
            "Use \"http\" or \"memory\"",
        ),
    }
}

/// Check that the base URL is an http(s) URL.
fn check_base_url(base_url: &str) -> CheckResult {
    match Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            CheckResult::ok("Base URL", base_url)
        }
        Ok(url) => CheckResult::error(
            "Base URL",
            &format!("unsupported scheme '{}'", url.scheme()),
            "Use an http:// or https:// URL for api.base_url",
        ),
        Err(e) => CheckResult::error(
            "Base URL",
            &format!("invalid ({})", e),
            "Set api.base_url, e.g. http://localhost:3000",
        ),
    }
}

/// Check that an API token is available, without printing it.
fn check_credential(settings: &Settings) -> CheckResult {
    let from_env = std::env::var(API_TOKEN_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);

    match settings.api.credential() {
        Some(cred) => {
            let source = if from_env { API_TOKEN_ENV } else { "config file" };
            CheckResult::ok(
                "API token",
                &format!("configured via {} ({})", source, mask(cred.token())),
            )
        }
        None => CheckResult::error(
            "API token",
            "not set",
            &format!("Set with: export {}='...'", API_TOKEN_ENV),
        ),
    }
}

/// Check that a model is configured for the host to bind the tools to.
fn check_model(model: &str) -> CheckResult {
    if model.trim().is_empty() {
        CheckResult::warning("Model", "not set", "Set agent.model, e.g. gpt-4.1")
    } else {
        CheckResult::ok("Model", model)
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: leo config edit",
        )
    }
}

fn check_prompt_dir(settings: &Settings) -> CheckResult {
    match &settings.prompts.custom_dir {
        None => CheckResult::ok("Prompts", "built-in"),
        Some(dir) => {
            let path = Settings::expand_path(dir);
            if path.is_dir() {
                CheckResult::ok("Prompts", &format!("custom ({})", path.display()))
            } else {
                CheckResult::warning(
                    "Prompts",
                    &format!("{} not found, using built-in", path.display()),
                    "Create the directory or unset prompts.custom_dir",
                )
            }
        }
    }
}

/// Show only the ends of a token.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
