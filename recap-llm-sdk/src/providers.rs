//! Provider name constants

/// Groq provider (OpenAI-compatible chat completions)
pub const GROQ: &str = "groq";
