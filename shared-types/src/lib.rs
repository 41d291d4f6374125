use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod auth;
pub mod dashboard;
pub mod prompts;
pub mod share;
pub mod summary;
pub mod transcript;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use auth::{
    LoginRequest, LoginResponse, SessionResponse, SignupRequest, UserInfo, UserResponse,
};
pub use dashboard::{DashboardStats, DashboardStatsResponse};
pub use prompts::{PromptListResponse, PromptPreset};
pub use share::{
    EmailShareItem, ShareListQuery, ShareListResponse, ShareSummaryRequest, ShareSummaryResponse,
    SummaryRef,
};
pub use summary::{
    GenerateSummaryRequest, GenerateSummaryResponse, SummaryCreated, SummaryItem,
    SummaryListQuery, SummaryListResponse, SummaryResponse, TranscriptRef, UpdateSummaryRequest,
};
pub use transcript::{
    CreateTranscriptRequest, CreateTranscriptResponse, SummaryBrief, TranscriptCreated,
    TranscriptDetail, TranscriptListItem, TranscriptListResponse, TranscriptResponse,
};

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. `not_found`
    pub error: String,
    pub message: String,
}

/// Generic acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    pub uptime: u64,
}
