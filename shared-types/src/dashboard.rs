use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_transcripts: i64,
    pub total_summaries: i64,
    pub total_shares: i64,
    /// Summaries created in the trailing seven days
    pub recent_activity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStatsResponse {
    pub stats: DashboardStats,
}
