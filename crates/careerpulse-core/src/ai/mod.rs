//! LLM coaching support
//!
//! - `client`: OpenAI chat-completions client
//! - `prompts`: prompt templates for each coaching endpoint
//! - `coach`: retry-wrapped prompt execution used by the handlers

pub mod client;
pub mod coach;
pub mod prompts;

pub use client::{AiClient, AiClientConfig, AiError, Completion};
pub use coach::CoachService;
pub use prompts::CoachPrompt;
