use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::SessionUser;
use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use shared_types::{DashboardStats, DashboardStatsResponse};

/// Window for `recentActivity`
pub const RECENT_ACTIVITY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Runs one count query on the blocking pool
async fn blocking_count<F>(data: &web::Data<AppState>, query: F) -> AppResult<i64>
where
    F: FnOnce(&Database) -> AppResult<i64> + Send + 'static,
{
    let data = data.clone();
    web::block(move || query(&data.database)).await?
}

pub async fn get_stats(
    data: web::Data<AppState>,
    user: SessionUser,
) -> Result<HttpResponse, AppError> {
    let since = Utc::now().timestamp() - RECENT_ACTIVITY_SECONDS;
    let user_id = user.id;

    let (total_transcripts, total_summaries, total_shares, recent_activity) = tokio::try_join!(
        blocking_count(&data, {
            let user_id = user_id.clone();
            move |db| db.count_transcripts(&user_id)
        }),
        blocking_count(&data, {
            let user_id = user_id.clone();
            move |db| db.count_summaries(&user_id)
        }),
        blocking_count(&data, {
            let user_id = user_id.clone();
            move |db| db.count_email_shares(&user_id)
        }),
        blocking_count(&data, move |db| db.count_summaries_since(&user_id, since)),
    )?;

    Ok(HttpResponse::Ok().json(DashboardStatsResponse {
        stats: DashboardStats {
            total_transcripts,
            total_summaries,
            total_shares,
            recent_activity,
        },
    }))
}
