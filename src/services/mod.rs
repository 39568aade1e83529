//! Business logic services for the summarize server.
//!
//! - [`gemini`]: typed client for the generative-text service
//! - [`summarizer`]: prompt construction and output normalization

pub mod gemini;
pub mod summarizer;

// Re-export commonly used types
pub use gemini::{GeminiClient, GenerateContentResponse, TextGenerator};
pub use summarizer::{build_prompt, normalize_summary, Summarizer};
