pub mod builder;
pub mod client;
pub mod types;

pub use builder::GroqMessageBuilder;
pub use client::GroqClient;
pub use types::*;
