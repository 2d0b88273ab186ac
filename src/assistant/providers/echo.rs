//! Offline provider: replies with the last line of the prompt's question.
//! Lets the chat flow run without network access or an API key.

use crate::assistant::AssistantError;

#[derive(Debug, Clone)]
pub struct EchoProvider;

impl EchoProvider {
    pub async fn generate_reply(&self, prompt: &str) -> Result<String, AssistantError> {
        let question = prompt
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("User: "))
            .unwrap_or(prompt);
        Ok(format!("[echo] {question}"))
    }
}
