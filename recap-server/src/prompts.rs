use shared_types::PromptPreset;

/// Built-in summarization instructions offered next to the free-form prompt
pub const DEFAULT_PROMPTS: &[(&str, &str)] = &[
    (
        "Executive Summary",
        "Summarize this transcript in bullet points for executives, focusing on key decisions, action items, and strategic insights.",
    ),
    (
        "Action Items",
        "Extract and list all action items, tasks, and next steps mentioned in this transcript. Include who is responsible if mentioned.",
    ),
    (
        "Key Decisions",
        "Identify and summarize all key decisions made during this meeting or conversation.",
    ),
    (
        "Meeting Notes",
        "Create structured meeting notes with main topics discussed, decisions made, and follow-up actions.",
    ),
    (
        "Technical Summary",
        "Provide a technical summary focusing on technical discussions, solutions proposed, and implementation details.",
    ),
];

pub fn default_presets() -> Vec<PromptPreset> {
    DEFAULT_PROMPTS
        .iter()
        .map(|(name, prompt)| PromptPreset {
            name: name.to_string(),
            prompt: prompt.to_string(),
        })
        .collect()
}
