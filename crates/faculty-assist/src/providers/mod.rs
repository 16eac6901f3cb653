//! Generative model abstraction
//!
//! Handlers talk to the model through the `GenerativeModel` trait so the
//! Gemini backend can be swapped for a stub in tests.

pub mod gemini;
pub mod llm;

pub use gemini::GeminiClient;
pub use llm::{GenerationOptions, GenerativeModel, HarmBlockThreshold, HarmCategory, SafetySetting};
