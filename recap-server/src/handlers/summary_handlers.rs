use crate::email::{invalid_recipients, render_share_email, send_all, OutgoingEmail};
use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::SessionUser;
use crate::models::{EmailShare, Summary};
use crate::summarizer::default_title;
use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use shared_types::{
    GenerateSummaryRequest, GenerateSummaryResponse, MessageResponse, ShareSummaryRequest,
    ShareSummaryResponse, SummaryItem, SummaryListQuery, SummaryListResponse, SummaryResponse,
    UpdateSummaryRequest,
};

/// Trimmed value, `None` when missing or blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub async fn generate_summary(
    data: web::Data<AppState>,
    user: SessionUser,
    request: web::Json<GenerateSummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    // The prompt is stored and sent exactly as given; trimming only decides presence
    let (transcript_id, prompt) = match (
        non_blank(req.transcript_id.as_deref()),
        req.prompt.as_deref().filter(|p| !p.trim().is_empty()),
    ) {
        (Some(t), Some(p)) => (t, p),
        _ => {
            return Err(AppError::InvalidRequest(
                "Transcript ID and prompt are required".to_string(),
            ))
        }
    };

    // Ownership is checked before any model call
    let transcript = data.database.get_transcript(transcript_id, &user.id)?;

    tracing::info!(
        "Generating summary for transcript {} with model {}",
        transcript.id,
        data.summarizer.model()
    );

    let content = data
        .summarizer
        .generate(&transcript.content, prompt)
        .await
        .map_err(|e| AppError::dependency("Failed to generate summary", e))?;

    let title = non_blank(req.title.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| default_title(Utc::now()));

    let summary = Summary::new(
        &user.id,
        &transcript.id,
        title,
        content,
        prompt.to_string(),
    );
    data.database.create_summary(&summary)?;

    Ok(HttpResponse::Ok().json(GenerateSummaryResponse {
        message: "Summary generated successfully".to_string(),
        summary: (&summary).into(),
    }))
}

pub async fn list_summaries(
    data: web::Data<AppState>,
    user: SessionUser,
    query: web::Query<SummaryListQuery>,
) -> Result<HttpResponse, AppError> {
    let summaries = data
        .database
        .list_summaries(&user.id, non_blank(query.transcript_id.as_deref()))?
        .into_iter()
        .map(SummaryItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(SummaryListResponse { summaries }))
}

pub async fn get_summary(
    data: web::Data<AppState>,
    user: SessionUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let summary = data.database.get_summary(&path.into_inner(), &user.id)?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        message: None,
        summary: summary.into(),
    }))
}

pub async fn update_summary(
    data: web::Data<AppState>,
    user: SessionUser,
    path: web::Path<String>,
    request: web::Json<UpdateSummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let (title, content) = match (
        non_blank(request.title.as_deref()),
        non_blank(request.content.as_deref()),
    ) {
        (Some(t), Some(c)) => (t, c),
        _ => {
            return Err(AppError::InvalidRequest(
                "Title and content are required".to_string(),
            ))
        }
    };

    // Marked edited even when nothing changed
    let summary = data.database.update_summary(
        &path.into_inner(),
        &user.id,
        title,
        content,
        Utc::now().timestamp(),
    )?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        message: Some("Summary updated successfully".to_string()),
        summary: summary.into(),
    }))
}

pub async fn delete_summary(
    data: web::Data<AppState>,
    user: SessionUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    data.database.delete_summary(&id, &user.id)?;

    tracing::info!("Deleted summary {} for user {}", id, user.id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Summary deleted successfully")))
}

pub fn share_success_message(count: usize) -> String {
    let noun = if count == 1 { "recipient" } else { "recipients" };
    format!("Summary shared successfully with {count} {noun}")
}

/// Emails a summary to every recipient, then records the share.
/// Nothing is recorded unless every send succeeds.
pub async fn share_summary(
    data: web::Data<AppState>,
    user: SessionUser,
    path: web::Path<String>,
    request: web::Json<ShareSummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    let recipients = req.recipients.unwrap_or_default();

    if recipients.is_empty() {
        return Err(AppError::InvalidRequest(
            "At least one recipient is required".to_string(),
        ));
    }

    let invalid = invalid_recipients(&recipients);
    if !invalid.is_empty() {
        return Err(AppError::InvalidRequest(format!(
            "Invalid email addresses: {}",
            invalid.join(", ")
        )));
    }

    let summary = data.database.get_summary(&path.into_inner(), &user.id)?.summary;

    let sender = user.display_name();
    let subject = non_blank(req.subject.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Shared Summary: {}", summary.title));
    let message = non_blank(req.message.as_deref()).map(str::to_string);

    let (text_body, html_body) =
        render_share_email(&summary.title, &summary.content, sender, message.as_deref())
            .map_err(|e| AppError::dependency("Failed to send emails", e))?;

    let emails = recipients
        .iter()
        .map(|to| OutgoingEmail {
            to: to.clone(),
            subject: subject.clone(),
            text_body: text_body.clone(),
            html_body: html_body.clone(),
        })
        .collect();

    send_all(data.email_sender.as_ref(), emails)
        .await
        .map_err(|e| AppError::dependency("Failed to send emails", e))?;

    let recipient_count = recipients.len();
    let share = EmailShare::new(&user.id, &summary.id, recipients, subject, message);
    data.database.create_email_share(&share)?;

    tracing::info!(
        "Shared summary {} with {} recipient(s)",
        summary.id,
        recipient_count
    );

    Ok(HttpResponse::Ok().json(ShareSummaryResponse {
        message: share_success_message(recipient_count),
        recipient_count,
    }))
}
