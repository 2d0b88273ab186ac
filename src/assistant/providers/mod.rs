//! Assistant provider implementations.
//!
//! `build(config)` is the factory called at startup.

pub mod echo;
pub mod gemini;

use crate::assistant::{AssistantError, AssistantProvider};
use crate::config::AssistantConfig;

/// Construct the provider named in config. A Gemini provider without an API
/// key degrades to `Disabled` instead of failing startup.
pub fn build(config: &AssistantConfig) -> Result<AssistantProvider, AssistantError> {
    match config.provider.as_str() {
        "echo" => Ok(AssistantProvider::Echo(echo::EchoProvider)),
        "gemini" => match &config.api_key {
            Some(key) if !key.trim().is_empty() => {
                let p = gemini::GeminiProvider::new(
                    config.api_base_url.clone(),
                    config.model.clone(),
                    config.timeout_seconds,
                    key.clone(),
                )?;
                Ok(AssistantProvider::Gemini(p))
            }
            _ => Ok(AssistantProvider::Disabled),
        },
        "disabled" | "none" => Ok(AssistantProvider::Disabled),
        other => Err(AssistantError::Request(format!("unknown provider: {other}"))),
    }
}
