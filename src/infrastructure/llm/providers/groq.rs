//! Groq Provider - OpenAI-compatible chat completions

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::{CapabilityError, CapabilityResult};
use crate::infrastructure::llm::{LLMMessage, LLMResponse, LLMUsage, LLM};

/// Groq API endpoint
const API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq provider
pub struct GroqProvider {
    api_key: String,
    client: Client,
    model: String,
}

impl GroqProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<LLMMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl LLM for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> CapabilityResult<LLMResponse> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
            stream: false,
        };

        let response = self.client
            .post(format!("{}/chat/completions", API_BASE))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::http_status(
                status.as_u16(),
                format!("groq returned {}: {}", status, body),
            ));
        }

        let chat_response: ChatResponse = response.json().await?;

        let choice = chat_response.choices
            .into_iter()
            .next()
            .ok_or_else(|| CapabilityError::new("EmptyResponse", "no choices in groq response"))?;

        let usage = chat_response.usage.map(|u| LLMUsage {
            prompt_tokens: Some(u.prompt_tokens),
            completion_tokens: Some(u.completion_tokens),
            total_tokens: Some(u.total_tokens),
        });

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            model: chat_response.model.unwrap_or_else(|| self.model.clone()),
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}
