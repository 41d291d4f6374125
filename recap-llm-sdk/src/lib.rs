//! # Recap LLM SDK
//!
//! A small chat-completion SDK for Rust. It exposes a provider-agnostic
//! [`client::LlmClient`] trait and ships a Groq client speaking the
//! OpenAI-compatible Chat Completions API.
//!
//! ## Example
//!
//! ```rust,no_run
//! use recap_llm_sdk::groq::GroqClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::new("your-groq-api-key")?;
//!     let response = client
//!         .message_builder()
//!         .model("llama-3.1-8b-instant")
//!         .max_tokens(1024)
//!         .temperature(0.3)
//!         .system_message("You summarize transcripts.")
//!         .user_message("Summarize: ...")
//!         .send()
//!         .await?;
//!
//!     println!("Response: {}", response.choices[0].message.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Trait usage
//!
//! ```rust,no_run
//! use recap_llm_sdk::client::LlmClient;
//! use recap_llm_sdk::groq::GroqClient;
//! use recap_llm_sdk::types::{CompletionRequest, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client: Box<dyn LlmClient> = Box::new(GroqClient::new("key")?);
//!     let response = client
//!         .complete(CompletionRequest {
//!             messages: vec![Message::user("Hello")],
//!             max_tokens: 256,
//!             model: "llama-3.1-8b-instant".to_string(),
//!             system: None,
//!             temperature: Some(0.3),
//!             top_p: None,
//!             stop_sequences: None,
//!         })
//!         .await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod groq;
pub mod models;
pub mod providers;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use types::{CompletionRequest, CompletionResponse, ContentBlock, Message, Role, Usage};
