use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::SessionUser;
use actix_web::{web, HttpResponse, Result};
use shared_types::{EmailShareItem, ShareListQuery, ShareListResponse};

/// Share history, newest first, optionally narrowed to one summary
pub async fn list_shares(
    data: web::Data<AppState>,
    user: SessionUser,
    query: web::Query<ShareListQuery>,
) -> Result<HttpResponse, AppError> {
    let summary_id = query
        .summary_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let shares = data
        .database
        .list_email_shares(&user.id, summary_id)?
        .into_iter()
        .map(EmailShareItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(ShareListResponse { shares }))
}
