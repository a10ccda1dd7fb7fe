//! LLM module for recap
//!
//! Completion providers (Groq, Gemini), the prompts sent to them, and the
//! retry wrapper applied to every provider.

mod client;
mod gemini;
mod groq;
pub mod prompts;
mod retry;

pub use client::{build_client, ChatMessage, CompletionClient, Role};
pub use gemini::GeminiClient;
pub use groq::GroqClient;
pub use retry::{RetryPolicy, RetryingClient};
