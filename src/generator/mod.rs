//! AI question generation: prompt assembly, the upstream completion client,
//! and strict validation of what comes back.

pub mod client;
pub mod prompt;
pub mod response;

pub use client::{CompletionClient, OpenRouterClient};
pub use prompt::{build_prompt, Prompt};
pub use response::parse_generated_questions;
