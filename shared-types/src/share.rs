use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShareSummaryRequest {
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShareSummaryResponse {
    pub message: String,
    pub recipient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryRef {
    pub id: String,
    pub title: String,
}

/// One recorded share, i.e. one successful batch of sends
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmailShareItem {
    pub id: String,
    pub summary_id: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub message: Option<String>,
    pub sent_at: i64,
    pub summary: SummaryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShareListResponse {
    pub shares: Vec<EmailShareItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareListQuery {
    pub summary_id: Option<String>,
}
