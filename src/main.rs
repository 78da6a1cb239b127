use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use mre::agent::Agent;
use mre::config::{Overrides, Settings};
use mre::providers::openai::OpenAiProvider;
use mre::tools::ToolRegistry;

mod prompt;
mod session;

use prompt::cliclack::CliclackPrompt;
use session::Session;

const DEFAULT_SECRETS: [&str; 2] = [".streamlit/secrets.toml", "secrets.toml"];

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML secrets file with [provider] and [agent] tables
    #[arg(short, long)]
    secrets: Option<PathBuf>,

    /// API key (can also be set via GEMINI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum model calls per turn
    #[arg(long)]
    max_steps: Option<usize>,

    /// Only show the final recommendation
    #[arg(long)]
    hide_steps: bool,

    /// Run a single query and exit
    #[arg(short, long)]
    query: Option<String>,
}

fn secrets_path(cli: &Cli) -> Option<PathBuf> {
    cli.secrets.clone().or_else(|| {
        DEFAULT_SECRETS
            .iter()
            .map(|candidate| Path::new(*candidate))
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
        max_steps: cli.max_steps,
    };
    // Fail on a missing credential before any UI or network activity
    let settings = Settings::load(secrets_path(&cli).as_deref(), &overrides)
        .context("Failed to load configuration")?;

    let provider = OpenAiProvider::new(settings.provider.clone())?;
    tracing::info!(model = provider.model(), "provider ready");
    let agent = Agent::new(
        Box::new(provider),
        ToolRegistry::with_defaults()?,
        settings.agent.clone(),
    )?;

    let prompt = Box::new(CliclackPrompt::new(!cli.hide_steps));
    let mut session = Session::new(agent, prompt);

    match cli.query {
        Some(query) => session.headless_start(&query),
        None => session.start(),
    }
}
