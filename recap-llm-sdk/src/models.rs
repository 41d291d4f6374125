//! Model constants for supported LLM providers

/// Groq model constants
pub mod groq {
    /// Llama 3.1 8B Instant - low latency, used for transcript summaries
    pub const LLAMA_3_1_8B_INSTANT_ID: &str = "llama-3.1-8b-instant";

    pub const DEFAULT_MODEL: &str = LLAMA_3_1_8B_INSTANT_ID;
}
