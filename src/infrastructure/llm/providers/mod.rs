//! LLM Providers

pub mod claude;
pub mod groq;

pub use claude::ClaudeProvider;
pub use groq::GroqProvider;

use std::sync::Arc;

use crate::application::errors::ConfigError;
use crate::infrastructure::http_client;
use super::config::{LLMConfig, LLMProvider};
use super::traits::LLM;

/// Build the provider selected in the config
pub fn build_provider(config: &LLMConfig) -> Result<Arc<dyn LLM>, ConfigError> {
    let provider = config.provider;
    let api_key = config
        .api_key(provider)
        .ok_or_else(|| ConfigError::MissingField(format!("llm.{}-api-key", provider.as_str())))?;
    let client = http_client(config.timeout_secs)
        .map_err(|e| ConfigError::InvalidValue(format!("http client: {}", e)))?;
    let model = config.model(provider);

    let llm: Arc<dyn LLM> = match provider {
        LLMProvider::Groq => Arc::new(GroqProvider::new(api_key, model, client)),
        LLMProvider::Claude => Arc::new(ClaudeProvider::new(api_key, model, client)),
    };
    Ok(llm)
}
