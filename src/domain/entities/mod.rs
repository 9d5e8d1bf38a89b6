//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod event;
pub mod ticket;

pub use command::Command;
pub use event::{ChatEvent, NestedMessage};
pub use ticket::Ticket;
