//! Anthropic Claude Provider

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::{CapabilityError, CapabilityResult};
use crate::infrastructure::llm::{LLMMessage, LLMResponse, LLMUsage, LLM};

/// Claude API endpoint
const API_BASE: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
/// The messages API requires max_tokens
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Claude provider
pub struct ClaudeProvider {
    api_key: String,
    client: Client,
    model: String,
}

impl ClaudeProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            model: model.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", API_BASE)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<LLMMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    model: Option<String>,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Claude takes the system prompt as a top-level field, not a message.
fn split_system(messages: Vec<LLMMessage>) -> (Option<String>, Vec<LLMMessage>) {
    let (system, rest): (Vec<_>, Vec<_>) = messages.into_iter().partition(LLMMessage::is_system);
    let system = if system.is_empty() {
        None
    } else {
        Some(system.into_iter().map(|m| m.content).collect::<Vec<_>>().join("\n\n"))
    };
    (system, rest)
}

#[async_trait]
impl LLM for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> CapabilityResult<LLMResponse> {
        let (system, messages) = split_system(messages);

        let request = ChatRequest {
            model: &self.model,
            system,
            messages,
            temperature,
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let response = self.client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::http_status(
                status.as_u16(),
                format!("claude returned {}: {}", status, body),
            ));
        }

        let chat_response: ChatResponse = response.json().await?;

        let content = chat_response.content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        let usage = chat_response.usage.map(|u| LLMUsage {
            prompt_tokens: Some(u.input_tokens),
            completion_tokens: Some(u.output_tokens),
            total_tokens: Some(u.input_tokens + u.output_tokens),
        });

        Ok(LLMResponse {
            content,
            model: chat_response.model.unwrap_or_else(|| self.model.clone()),
            usage,
            finish_reason: chat_response.stop_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_messages_are_lifted() {
        let (system, rest) = split_system(vec![
            LLMMessage::system("Be brief."),
            LLMMessage::user("hi"),
        ]);
        assert_eq!(system.as_deref(), Some("Be brief."));
        assert_eq!(rest, vec![LLMMessage::user("hi")]);
    }

    #[test]
    fn test_unknown_content_blocks_are_skipped() {
        let body = serde_json::json!({
            "content": [{"type": "tool_use", "id": "x"}, {"type": "text", "text": "hello"}],
            "stop_reason": "end_turn"
        });
        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.content.len(), 2);
        assert!(matches!(parsed.content[1], ContentBlock::Text { .. }));
    }
}
