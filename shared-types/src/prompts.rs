use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named, reusable summarization instruction
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptPreset {
    pub name: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptListResponse {
    pub prompts: Vec<PromptPreset>,
}
