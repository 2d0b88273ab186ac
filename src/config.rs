//! Resolved runtime configuration.
//!
//! Values come from command-line flags, each falling back to an environment
//! variable (a `.env` file is loaded first), then to the defaults below.

use crate::application::DEFAULT_CURRENCY;

pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Assistant provider configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Which provider is active: `gemini`, `echo` or `disabled`.
    pub provider: String,
    pub model: String,
    pub api_base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// From `GEMINI_API_KEY`. `None` disables the Gemini provider.
    pub api_key: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            api_key: None,
        }
    }
}

/// Fully-resolved session configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Currency label used in summaries.
    pub currency: String,
    pub log_level: String,
    pub assistant: AssistantConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            assistant: AssistantConfig::default(),
        }
    }
}

/// Load `.env` from the working directory if present. A missing file is not
/// an error; a malformed one is returned so it can be logged once logging is up.
pub fn load_dotenv() -> Result<(), dotenvy::Error> {
    ignore_missing(dotenvy::dotenv().map(|_| ()))
}

fn ignore_missing(result: Result<(), dotenvy::Error>) -> Result<(), dotenvy::Error> {
    match result {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}
