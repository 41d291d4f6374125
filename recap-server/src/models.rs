//! Persisted rows and their conversion into API types.

use chrono::Utc;
use shared_types::{
    EmailShareItem, SummaryBrief, SummaryCreated, SummaryItem, SummaryRef, TranscriptCreated,
    TranscriptListItem, TranscriptRef, UserInfo,
};
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: i64,
}

impl User {
    pub fn new(email: String, name: Option<String>, password_hash: String) -> Self {
        Self {
            id: new_id(),
            email,
            name,
            password_hash,
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Transcript {
    pub fn new(user_id: &str, title: String, content: String) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Transcript> for TranscriptCreated {
    fn from(t: &Transcript) -> Self {
        TranscriptCreated {
            id: t.id.clone(),
            title: t.title.clone(),
            created_at: t.created_at,
        }
    }
}

/// Transcript list row, annotated with its summary count
#[derive(Debug, Clone)]
pub struct TranscriptOverview {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub summary_count: i64,
}

impl From<TranscriptOverview> for TranscriptListItem {
    fn from(t: TranscriptOverview) -> Self {
        TranscriptListItem {
            id: t.id,
            title: t.title,
            created_at: t.created_at,
            updated_at: t.updated_at,
            summary_count: t.summary_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub id: String,
    pub user_id: String,
    pub transcript_id: String,
    pub title: String,
    pub content: String,
    pub prompt: String,
    pub is_edited: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Summary {
    pub fn new(
        user_id: &str,
        transcript_id: &str,
        title: String,
        content: String,
        prompt: String,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            transcript_id: transcript_id.to_string(),
            title,
            content,
            prompt,
            is_edited: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Summary> for SummaryCreated {
    fn from(s: &Summary) -> Self {
        SummaryCreated {
            id: s.id.clone(),
            title: s.title.clone(),
            content: s.content.clone(),
            prompt: s.prompt.clone(),
            created_at: s.created_at,
        }
    }
}

impl From<Summary> for SummaryBrief {
    fn from(s: Summary) -> Self {
        SummaryBrief {
            id: s.id,
            title: s.title,
            prompt: s.prompt,
            created_at: s.created_at,
        }
    }
}

/// Summary joined with its transcript's title
#[derive(Debug, Clone)]
pub struct SummaryWithTranscript {
    pub summary: Summary,
    pub transcript_title: String,
}

impl From<SummaryWithTranscript> for SummaryItem {
    fn from(row: SummaryWithTranscript) -> Self {
        let s = row.summary;
        SummaryItem {
            transcript: TranscriptRef {
                id: s.transcript_id.clone(),
                title: row.transcript_title,
            },
            id: s.id,
            title: s.title,
            content: s.content,
            prompt: s.prompt,
            is_edited: s.is_edited,
            transcript_id: s.transcript_id,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmailShare {
    pub id: String,
    pub user_id: String,
    pub summary_id: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub message: Option<String>,
    pub sent_at: i64,
}

impl EmailShare {
    pub fn new(
        user_id: &str,
        summary_id: &str,
        recipients: Vec<String>,
        subject: String,
        message: Option<String>,
    ) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            summary_id: summary_id.to_string(),
            recipients,
            subject,
            message,
            sent_at: Utc::now().timestamp(),
        }
    }
}

/// Share joined with its summary's title
#[derive(Debug, Clone)]
pub struct EmailShareWithSummary {
    pub share: EmailShare,
    pub summary_title: String,
}

impl From<EmailShareWithSummary> for EmailShareItem {
    fn from(row: EmailShareWithSummary) -> Self {
        let s = row.share;
        EmailShareItem {
            summary: SummaryRef {
                id: s.summary_id.clone(),
                title: row.summary_title,
            },
            id: s.id,
            summary_id: s.summary_id,
            recipients: s.recipients,
            subject: s.subject,
            message: s.message,
            sent_at: s.sent_at,
        }
    }
}
