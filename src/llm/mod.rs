//! LLM structured-output client, prompts and models.

pub mod client;
pub mod error;
pub mod models;
pub mod prompts;

pub use client::{OpenAiClient, ProductLlm};
pub use error::LlmError;
pub use models::{Product, RegexPattern, StructuredOutput};
