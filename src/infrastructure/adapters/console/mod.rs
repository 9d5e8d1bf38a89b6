//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::CapabilityResult;
use crate::domain::traits::ChatCapability;

/// Chat capability that prints replies to stdout
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        let read = std::io::stdin().read_line(&mut input).ok()?;
        if read == 0 {
            return None;
        }
        Some(input.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatCapability for ConsoleAdapter {
    async fn send(&self, channel_id: &str, text: &str) -> CapabilityResult<bool> {
        println!("[BOT #{}] {}", channel_id, text);
        Ok(true)
    }

    async fn get_channel_members(&self, _channel_id: &str) -> CapabilityResult<Vec<String>> {
        // No channel roster on the console
        Ok(Vec::new())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> CapabilityResult<bool> {
        tracing::info!(channel = channel_id, message_id, "Console delete");
        Ok(true)
    }

    fn name(&self) -> &str {
        "console"
    }
}
