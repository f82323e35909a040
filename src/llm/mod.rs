//! Completion service abstraction
//!
//! The language model is an opaque, billed collaborator: given a system
//! prompt and a user prompt it returns generated text or an error. No
//! retries are performed here; retry policy belongs to the caller.

pub mod client;

pub use client::CompletionProvider;
pub use client::LlmClient;

use async_trait::async_trait;

use crate::errors::Result;

/// A chat-completion backend.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Request a completion for a system/user prompt pair.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String>;
}
