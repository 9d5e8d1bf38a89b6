//! Message handling - Command parsing, routing and error translation

pub mod classifier;
pub mod dispatcher;
pub mod parser;

#[cfg(test)]
pub(crate) mod mocks;

pub use classifier::{classify, ErrorCategory, UserFacingError};
pub use dispatcher::CommandRouter;
pub use parser::parse;
