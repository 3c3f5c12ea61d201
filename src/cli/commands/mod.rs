//! CLI command implementations.

mod acquire;
mod chat;

pub use acquire::run_acquire;
pub use chat::run_chat;
