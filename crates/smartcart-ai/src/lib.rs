//! AI text-generation proxy.
//!
//! Stateless formatter and forwarder: each operation builds a
//! role-structured chat prompt from request fields, sends it to an
//! external completion service, and returns the raw trimmed text. No
//! caching, no retry, no parsing of the returned content.

pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;

pub use client::{AiConfig, CompletionBackend, CompletionRequest, HttpCompletionClient};
pub use error::AiError;
pub use generator::TextGenerator;
pub use prompt::{ChatMessage, ChatRole, Prompt};
