//! Prompt assembly and the single completion call behind summary generation.

use crate::config::LlmConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recap_llm_sdk::{
    groq::GroqClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, Message,
};
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "You are an AI assistant specialized in analyzing and summarizing transcripts. \
Your task is to process the provided transcript according to the user's specific instructions.

Guidelines:
- Be concise but comprehensive
- Maintain the original context and meaning
- Use clear, professional language
- Structure your response logically
- If the prompt asks for bullet points, use proper formatting
- If action items are requested, clearly identify responsible parties when mentioned
- Focus on the most important and relevant information";

/// Sampling temperature for every summary request
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// User turn embedding the transcript and the caller's instruction
pub fn build_user_prompt(transcript_content: &str, instruction: &str) -> String {
    format!(
        "Here is the transcript to analyze:\n\n---\n{transcript_content}\n---\n\n\
         User's instruction: {instruction}\n\n\
         Please provide a summary based on the instruction above."
    )
}

/// Title used when the caller does not supply one, e.g. `Summary - 3/7/2025`
pub fn default_title(now: DateTime<Utc>) -> String {
    format!("Summary - {}", now.format("%-m/%-d/%Y"))
}

pub struct SummaryGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    max_tokens: u32,
}

impl SummaryGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: String, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One completion call; no retry and no streaming
    pub async fn generate(&self, transcript_content: &str, instruction: &str) -> Result<String, LlmError> {
        let request = CompletionRequest {
            messages: vec![Message::user(build_user_prompt(transcript_content, instruction))],
            max_tokens: self.max_tokens,
            model: self.model.clone(),
            system: Some(SYSTEM_PROMPT.to_string()),
            temperature: Some(SUMMARY_TEMPERATURE),
            top_p: None,
            stop_sequences: None,
        };

        tracing::info!(
            provider = self.client.provider_name(),
            model = %self.model,
            transcript_chars = transcript_content.chars().count(),
            "Requesting summary"
        );

        let response = self.client.complete(request).await?;
        let text = response.text();

        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Summary generated"
        );
        Ok(text)
    }
}

impl SummaryGenerator {
    /// Groq-backed generator, or one whose every call fails when no API key is set
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let client: Arc<dyn LlmClient> = match config.api_key.as_deref() {
            Some(key) => {
                let mut groq = GroqClient::new(key)?.with_model(config.model.clone());
                if let Some(base_url) = &config.base_url {
                    groq = groq.with_base_url(base_url.clone());
                }
                Arc::new(groq)
            }
            None => {
                tracing::warn!("No LLM API key configured; summary generation will fail");
                Arc::new(UnconfiguredLlmClient)
            }
        };

        Ok(Self::new(client, config.model.clone(), config.max_tokens))
    }
}

/// Stand-in client used when no API key is configured
pub struct UnconfiguredLlmClient;

#[async_trait]
impl LlmClient for UnconfiguredLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::authentication("No LLM API key configured"))
    }

    fn provider_name(&self) -> &str {
        "unconfigured"
    }

    fn model_name(&self) -> &str {
        "none"
    }
}
