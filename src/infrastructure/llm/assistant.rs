//! AI capability on top of an LLM provider

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{CapabilityError, CapabilityResult};
use crate::domain::traits::{AiCapability, Generation};
use super::config::LLMConfig;
use super::traits::{LLMMessage, LLM};

/// Answers prompts with a single chat-completion call
pub struct LlmAssistant {
    llm: Arc<dyn LLM>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LlmAssistant {
    pub fn new(llm: Arc<dyn LLM>, config: &LLMConfig) -> Self {
        Self {
            llm,
            temperature: Some(config.temperature),
            max_tokens: config.max_tokens,
        }
    }
}

fn schema_instruction(schema: &serde_json::Value) -> String {
    format!(
        "Respond with a single JSON value that conforms to this JSON schema. \
         Output only the JSON, without prose or code fences.\n{}",
        schema
    )
}

/// Parse a model reply as JSON, tolerating a surrounding code fence.
fn parse_structured(content: &str) -> CapabilityResult<serde_json::Value> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(body)
        .map_err(|e| CapabilityError::new("ParseError", format!("structured reply is not JSON: {}", e)))
}

#[async_trait]
impl AiCapability for LlmAssistant {
    async fn generate(
        &self,
        user_input: &str,
        system_prompt: &str,
        response_schema: Option<&serde_json::Value>,
    ) -> CapabilityResult<Generation> {
        let system = match response_schema {
            Some(schema) => format!("{}\n\n{}", system_prompt, schema_instruction(schema)),
            None => system_prompt.to_string(),
        };

        let messages = vec![LLMMessage::system(system), LLMMessage::user(user_input)];
        let response = self.llm.chat(messages, self.temperature, self.max_tokens).await?;

        tracing::debug!(
            provider = self.llm.name(),
            model = %response.model,
            total_tokens = ?response.usage.as_ref().and_then(|u| u.total_tokens),
            "LLM reply received"
        );

        match response_schema {
            Some(_) => parse_structured(&response.content).map(Generation::Structured),
            None => Ok(Generation::Text(response.content)),
        }
    }
}
