//! Conversational finance coach.
//!
//! `AssistantProvider` is an enum over concrete text-generation backends with
//! a single capability, `generate_reply`. The ledger never depends on it:
//! [`ChatSession::ask`] borrows the store only to render the summary, and any
//! provider failure is turned into a user-facing apology.

pub mod providers;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::LedgerStore;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant is not configured (no API key)")]
    NotConfigured,
    #[error("assistant request failed: {0}")]
    Request(String),
    #[error("assistant returned an empty reply")]
    EmptyReply,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// Available text-generation backends.
#[derive(Debug, Clone)]
pub enum AssistantProvider {
    Gemini(providers::gemini::GeminiProvider),
    Echo(providers::echo::EchoProvider),
    /// No credentials were supplied; every request fails.
    Disabled,
}

impl AssistantProvider {
    /// Send `prompt` to the provider and return its text reply.
    pub async fn generate_reply(&self, prompt: &str) -> Result<String, AssistantError> {
        match self {
            AssistantProvider::Gemini(p) => p.generate_reply(prompt).await,
            AssistantProvider::Echo(p) => p.generate_reply(prompt).await,
            AssistantProvider::Disabled => Err(AssistantError::NotConfigured),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssistantProvider::Gemini(_) => "gemini",
            AssistantProvider::Echo(_) => "echo",
            AssistantProvider::Disabled => "disabled",
        }
    }
}

// ── Transcript ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

/// Ordered chat history, oldest turn first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<(Speaker, String)>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push((speaker, text.into()));
    }

    pub fn turns(&self) -> &[(Speaker, String)] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// History as prompt text, one `speaker: text` line per turn.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|(speaker, text)| format!("{}: {}", speaker.as_str(), text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ── Prompt ────────────────────────────────────────────────────────────────────

const PERSONA: &str = "You are MoneyMate, a friendly and modern AI financial coach.";
const GUIDANCE: &str = "Give advice based on the 50/30/20 rule.";

/// Build the full prompt sent to the provider.
pub fn build_prompt(summary: &str, transcript: &Transcript, question: &str) -> String {
    let history = if transcript.is_empty() {
        "(none)".to_string()
    } else {
        transcript.render()
    };
    format!("{PERSONA} {summary} {GUIDANCE}\n\nHistory:\n{history}\n\nUser: {question}\nMoneyMate:")
}

/// Text shown in place of a reply when the provider fails.
pub fn fallback_message(error: &AssistantError) -> String {
    match error {
        AssistantError::NotConfigured => {
            "Sorry, the assistant is not available right now.".to_string()
        }
        other => format!("Sorry, something went wrong while contacting the assistant: {other}"),
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// A provider plus the conversation held with it.
#[derive(Debug, Clone)]
pub struct ChatSession {
    provider: AssistantProvider,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(provider: AssistantProvider) -> Self {
        Self {
            provider,
            transcript: Transcript::new(),
        }
    }

    pub fn provider(&self) -> &AssistantProvider {
        &self.provider
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Ask a question about the current ledger. Always returns displayable
    /// text: provider failures become a fallback message.
    pub async fn ask(&mut self, store: &LedgerStore, question: &str) -> String {
        self.transcript.push(Speaker::User, question);
        let prompt = build_prompt(&store.financial_summary_text(), &self.transcript, question);

        let reply = match self.provider.generate_reply(&prompt).await {
            Ok(text) => {
                info!(provider = self.provider.name(), reply_len = text.len(), "assistant replied");
                text
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "assistant unavailable");
                fallback_message(&e)
            }
        };

        self.transcript.push(Speaker::Assistant, reply.clone());
        reply
    }
}
