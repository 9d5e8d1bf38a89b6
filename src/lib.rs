//! chatops-bot - Routes chat commands to AI, ticketing and channel admin
//! capabilities, answering the chat webhook with HTTP 200 no matter what.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{BotError, CapabilityError, ConfigError};
pub use application::messaging::{classify, parse, CommandRouter, ErrorCategory, UserFacingError};
pub use application::services::{EventOutcome, EventService};
pub use domain::entities::{Command, Ticket};
pub use domain::traits::{AiCapability, ChatCapability, Generation, TicketCapability};
