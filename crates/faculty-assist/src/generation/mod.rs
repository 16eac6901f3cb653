//! Prompt assembly for chat, question and vision calls

pub mod prompt;

pub use prompt::PromptBuilder;
