//! Google Gemini `generateContent` provider.
//!
//! All wire types are private to this module. The provider is stateless and
//! cheap to clone since `reqwest::Client` is an `Arc` internally.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::assistant::AssistantError;

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(
        api_base_url: String,
        model: String,
        timeout_seconds: u64,
        api_key: String,
    ) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AssistantError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base_url,
            model,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// One round-trip: the whole prompt goes out as a single user turn.
    pub async fn generate_reply(&self, prompt: &str) -> Result<String, AssistantError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending Gemini request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, "Gemini request failed (transport)");
                AssistantError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AssistantError::Request(format!("failed to parse response body: {e}")))?;

        debug!(candidates = parsed.candidates.len(), "received Gemini response");

        extract_text(parsed)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, AssistantError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(AssistantError::EmptyReply);
    }
    Ok(text)
}

/// Return the response if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AssistantError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => format!("HTTP {status}: {}", env.error.message),
        Err(_) => format!("HTTP {status}: {body}"),
    };

    error!(%status, %message, "Gemini request returned HTTP error");
    Err(AssistantError::Request(message))
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
