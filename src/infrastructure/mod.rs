//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Chat platform integrations (Slack, console)
//! - LLM: AI capability over chat-completion providers
//! - Tickets: Issue tracker client
//! - HTTP: Webhook server

pub mod adapters;
pub mod config;
pub mod http;
pub mod llm;
pub mod tickets;

use std::time::Duration;

use crate::application::errors::CapabilityResult;

/// HTTP client with a request timeout; timeouts surface as `ReadTimeout`/`ConnectTimeout`.
pub fn http_client(timeout_secs: u64) -> CapabilityResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .build()?;
    Ok(client)
}
