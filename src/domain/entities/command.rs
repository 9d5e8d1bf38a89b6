/// A user command parsed from raw chat text.
///
/// Usage-hint variants (`AiUsage`, `DeleteUsage`, `TicketUsage`) are valid
/// commands, not errors: they were recognized but are missing arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward a prompt to the AI capability
    AiPrompt { text: String },
    /// `ai` with nothing after it
    AiUsage,
    ListMembers,
    ListChannels,
    DeleteMessage { message_id: String },
    /// `delete message` with the wrong number of tokens
    DeleteUsage,
    CreateTicket { title: String, description: String },
    ShowTicket { key: String },
    SearchTickets { query: String },
    /// `ticket ...` with a missing or malformed argument
    TicketUsage,
    /// Multi-word text that matches no command
    Unknown { raw: String },
    /// Empty text or a single unrecognized word
    Noop,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AiPrompt { .. } => "ai_prompt",
            Command::AiUsage => "ai_usage",
            Command::ListMembers => "list_members",
            Command::ListChannels => "list_channels",
            Command::DeleteMessage { .. } => "delete_message",
            Command::DeleteUsage => "delete_usage",
            Command::CreateTicket { .. } => "create_ticket",
            Command::ShowTicket { .. } => "show_ticket",
            Command::SearchTickets { .. } => "search_tickets",
            Command::TicketUsage => "ticket_usage",
            Command::Unknown { .. } => "unknown",
            Command::Noop => "noop",
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Command::Noop)
    }
}
