//! Command router - Dispatches parsed commands to capabilities

use std::sync::Arc;

use crate::application::errors::CapabilityError;
use crate::domain::entities::Command;
use crate::domain::traits::{AiCapability, ChatCapability, TicketCapability};
use super::classifier::classify;
use super::parser::parse;

/// System prompt used for `ai` commands
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant answering inside a Slack channel. \
Keep answers concise and use Slack-friendly formatting.";

pub const AI_CONTEXT: &str = "AI service";
pub const CHAT_CONTEXT: &str = "Slack";
pub const TICKET_CONTEXT: &str = "Ticket service";

pub const AI_USAGE: &str = "AI Assistant\nPlease provide a prompt after 'ai'.";
pub const DELETE_USAGE: &str = "Usage: delete message <timestamp>";
pub const TICKET_USAGE: &str = "Usage: ticket create <title> | <description>\n       ticket show <KEY>\n       ticket search <query>";
pub const NO_MEMBERS: &str = "No members found.";
pub const LIST_CHANNELS_PLACEHOLDER: &str = "Listing channels is not implemented yet.";
pub const MESSAGE_DELETED: &str = "Message deleted.";
pub const UNKNOWN_COMMAND: &str = "Unknown command.";
pub const TICKETS_NOT_CONFIGURED: &str = "Ticketing is not configured.";
pub const NO_TICKETS: &str = "No tickets found.";

const SEARCH_LIMIT: usize = 5;

/// Routes commands to the chat, AI and ticket capabilities.
///
/// Holds no mutable state, so one instance can serve concurrent events.
/// Capability failures are classified and sent back to the same channel;
/// `route` never returns an error.
#[derive(Clone)]
pub struct CommandRouter {
    chat: Arc<dyn ChatCapability>,
    ai: Arc<dyn AiCapability>,
    tickets: Option<Arc<dyn TicketCapability>>,
    system_prompt: String,
}

impl CommandRouter {
    pub fn new(chat: Arc<dyn ChatCapability>, ai: Arc<dyn AiCapability>) -> Self {
        Self {
            chat,
            ai,
            tickets: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_tickets(mut self, tickets: Arc<dyn TicketCapability>) -> Self {
        self.tickets = Some(tickets);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Parse raw text and route the resulting command
    pub async fn route_text(&self, raw_text: &str, channel_id: &str) {
        self.route(parse(raw_text), channel_id).await;
    }

    /// Execute a command and reply in `channel_id`
    pub async fn route(&self, command: Command, channel_id: &str) {
        if command.is_noop() {
            return;
        }

        tracing::debug!(command = command.name(), channel = channel_id, "Routing command");

        match command {
            Command::AiPrompt { text } => self.handle_ai(channel_id, &text).await,
            Command::AiUsage => self.reply(channel_id, AI_USAGE).await,
            Command::ListMembers => self.handle_list_members(channel_id).await,
            Command::ListChannels => self.reply(channel_id, LIST_CHANNELS_PLACEHOLDER).await,
            Command::DeleteMessage { message_id } => {
                self.handle_delete(channel_id, &message_id).await
            }
            Command::DeleteUsage => self.reply(channel_id, DELETE_USAGE).await,
            Command::CreateTicket { title, description } => {
                self.handle_create_ticket(channel_id, &title, &description).await
            }
            Command::ShowTicket { key } => self.handle_show_ticket(channel_id, &key).await,
            Command::SearchTickets { query } => self.handle_search_tickets(channel_id, &query).await,
            Command::TicketUsage => self.reply(channel_id, TICKET_USAGE).await,
            Command::Unknown { raw } => {
                tracing::debug!(channel = channel_id, raw = %raw, "Unknown command");
                self.reply(channel_id, UNKNOWN_COMMAND).await
            }
            Command::Noop => {}
        }
    }

    async fn handle_ai(&self, channel_id: &str, prompt: &str) {
        match self.ai.generate(prompt, &self.system_prompt, None).await {
            Ok(generation) => {
                self.reply(channel_id, &format!("AI Response:\n{}", generation)).await
            }
            Err(e) => self.fail(channel_id, AI_CONTEXT, &e).await,
        }
    }

    async fn handle_list_members(&self, channel_id: &str) {
        match self.chat.get_channel_members(channel_id).await {
            Ok(members) if members.is_empty() => self.reply(channel_id, NO_MEMBERS).await,
            Ok(members) => self.reply(channel_id, &members.join("\n")).await,
            Err(e) => self.fail(channel_id, CHAT_CONTEXT, &e).await,
        }
    }

    async fn handle_delete(&self, channel_id: &str, message_id: &str) {
        // The confirmation does not depend on the returned flag
        match self.chat.delete_message(channel_id, message_id).await {
            Ok(deleted) => {
                if !deleted {
                    tracing::warn!(channel = channel_id, message_id, "Delete reported no success");
                }
                self.reply(channel_id, MESSAGE_DELETED).await
            }
            Err(e) => self.fail(channel_id, CHAT_CONTEXT, &e).await,
        }
    }

    async fn handle_create_ticket(&self, channel_id: &str, title: &str, description: &str) {
        let Some(tickets) = &self.tickets else {
            return self.reply(channel_id, TICKETS_NOT_CONFIGURED).await;
        };

        match tickets.create(title, description).await {
            Ok(ticket) => {
                tracing::info!(channel = channel_id, key = %ticket.key, "Ticket created");
                self.reply(channel_id, &format!("Ticket created: {}\n{}", ticket.key, ticket.url))
                    .await
            }
            Err(e) => self.fail(channel_id, TICKET_CONTEXT, &e).await,
        }
    }

    async fn handle_show_ticket(&self, channel_id: &str, key: &str) {
        let Some(tickets) = &self.tickets else {
            return self.reply(channel_id, TICKETS_NOT_CONFIGURED).await;
        };

        match tickets.get(key).await {
            Ok(Some(ticket)) => {
                let text = format!(
                    "{}: {}\nStatus: {}\n{}",
                    ticket.key,
                    ticket.title,
                    ticket.status_or_unknown(),
                    ticket.url
                );
                self.reply(channel_id, &text).await
            }
            Ok(None) => self.reply(channel_id, &format!("Ticket {} not found.", key)).await,
            Err(e) => self.fail(channel_id, TICKET_CONTEXT, &e).await,
        }
    }

    async fn handle_search_tickets(&self, channel_id: &str, query: &str) {
        let Some(tickets) = &self.tickets else {
            return self.reply(channel_id, TICKETS_NOT_CONFIGURED).await;
        };

        match tickets.search(query, SEARCH_LIMIT).await {
            Ok(found) if found.is_empty() => self.reply(channel_id, NO_TICKETS).await,
            Ok(found) => {
                let lines: Vec<String> = found
                    .iter()
                    .map(|t| format!("{} [{}]", t, t.status_or_unknown()))
                    .collect();
                self.reply(channel_id, &lines.join("\n")).await
            }
            Err(e) => self.fail(channel_id, TICKET_CONTEXT, &e).await,
        }
    }

    /// Classify a failure, log it and send the sanitized message
    async fn fail(&self, channel_id: &str, context: &str, error: &CapabilityError) {
        let user_error = classify(error, context);
        user_error.report(error);
        self.reply(channel_id, &user_error.message).await;
    }

    /// Send a reply; a failed send is logged and dropped
    async fn reply(&self, channel_id: &str, text: &str) {
        if let Err(e) = self.chat.send(channel_id, text).await {
            let user_error = classify(&e, CHAT_CONTEXT);
            tracing::error!(
                channel = channel_id,
                adapter = self.chat.name(),
                category = %user_error.category,
                error = %e,
                "Failed to deliver reply"
            );
        }
    }
}
