use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::assistant::{providers, AssistantProvider};
use crate::config::{
    AssistantConfig, Config, DEFAULT_API_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MODEL,
    DEFAULT_PROVIDER, DEFAULT_TIMEOUT_SECONDS,
};
use crate::application::DEFAULT_CURRENCY;
use crate::logger;

mod session;

pub use session::{LoopControl, Session, SessionCommand};

/// MoneyMate - personal finance coach
///
/// Starts an in-memory session and reads one command per line from stdin.
/// Type `help` inside the session for the command list. Nothing is saved
/// when the session ends; use `export` to keep a copy.
#[derive(Parser, Debug)]
#[command(name = "moneymate")]
#[command(version)]
pub struct Cli {
    /// Currency label shown in summaries
    #[arg(long, env = "MONEYMATE_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Assistant provider: gemini, echo, disabled
    #[arg(long, env = "MONEYMATE_PROVIDER", default_value = DEFAULT_PROVIDER)]
    pub provider: String,

    /// Gemini API key (the assistant is disabled without one)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "MONEYMATE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Gemini API
    #[arg(long, env = "MONEYMATE_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Assistant request timeout in seconds
    #[arg(long, env = "MONEYMATE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, env = "MONEYMATE_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Resolve flags and environment into the session configuration.
    pub fn config(&self) -> Config {
        Config {
            currency: self.currency.clone(),
            log_level: self.log_level.clone(),
            assistant: AssistantConfig {
                provider: self.provider.clone(),
                model: self.model.clone(),
                api_base_url: self.api_base_url.clone(),
                timeout_seconds: self.timeout,
                api_key: self.api_key.clone(),
            },
        }
    }

    /// Run the session loop. `dotenv_error` is a `.env` problem found before
    /// logging was set up.
    pub async fn run(self, dotenv_error: Option<dotenvy::Error>) -> Result<()> {
        let config = self.config();
        logger::init(&config.log_level)?;
        if let Some(e) = dotenv_error {
            warn!(error = %e, "could not load .env file");
        }

        let provider = providers::build(&config.assistant)
            .context("Failed to set up the assistant provider")?;
        info!(
            provider = provider.name(),
            currency = %config.currency,
            "session started"
        );

        let mut session = Session::new(&config.currency, provider);
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        write_welcome(&mut stdout, session.chat().provider(), &config.assistant)?;

        for line in stdin.lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            match session.handle_line(&line, &mut stdout).await? {
                LoopControl::Continue => {}
                LoopControl::Exit => break,
            }
            stdout.flush()?;
        }

        info!(
            transactions = session.store().len(),
            goals = session.store().goals().len(),
            "session ended"
        );
        Ok(())
    }
}

const DISCLAIMER: &str =
    "MoneyMate is an educational chatbot, not a professional financial adviser.";

fn write_welcome<W: Write>(
    out: &mut W,
    provider: &AssistantProvider,
    assistant: &AssistantConfig,
) -> io::Result<()> {
    writeln!(out, "Welcome to MoneyMate. Record your first transaction, or type `help`.")?;
    writeln!(out, "{DISCLAIMER}")?;
    if matches!(provider, AssistantProvider::Disabled) && assistant.provider == "gemini" {
        writeln!(
            out,
            "Assistant unavailable: set GEMINI_API_KEY (or pass --api-key) to enable `ask`."
        )?;
    }
    Ok(())
}
