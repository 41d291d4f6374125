use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::SessionUser;
use crate::models::Transcript;
use actix_web::{web, HttpResponse, Result};
use shared_types::{
    CreateTranscriptRequest, CreateTranscriptResponse, MessageResponse, SummaryBrief,
    TranscriptDetail, TranscriptListItem, TranscriptListResponse, TranscriptResponse,
};

pub const MAX_TRANSCRIPT_CHARS: usize = 50_000;

/// Trimmed `(title, content)`, or the reason the upload is rejected
fn validate_upload(req: &CreateTranscriptRequest) -> Result<(String, String), AppError> {
    let title = req.title.as_deref().map(str::trim).unwrap_or_default();
    let content = req.content.as_deref().unwrap_or_default();

    if title.is_empty() || content.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Title and content are required".to_string(),
        ));
    }

    if content.encode_utf16().count() > MAX_TRANSCRIPT_CHARS {
        return Err(AppError::InvalidRequest(
            "Content is too long (max 50,000 characters)".to_string(),
        ));
    }

    Ok((title.to_string(), content.trim().to_string()))
}

pub async fn create_transcript(
    data: web::Data<AppState>,
    user: SessionUser,
    request: web::Json<CreateTranscriptRequest>,
) -> Result<HttpResponse, AppError> {
    let (title, content) = validate_upload(&request)?;

    let transcript = Transcript::new(&user.id, title, content);
    data.database.create_transcript(&transcript)?;

    tracing::info!(
        "Stored transcript {} ({} chars) for user {}",
        transcript.id,
        transcript.content.chars().count(),
        user.id
    );

    Ok(HttpResponse::Created().json(CreateTranscriptResponse {
        message: "Transcript uploaded successfully".to_string(),
        transcript: (&transcript).into(),
    }))
}

pub async fn list_transcripts(
    data: web::Data<AppState>,
    user: SessionUser,
) -> Result<HttpResponse, AppError> {
    let transcripts = data
        .database
        .list_transcripts(&user.id)?
        .into_iter()
        .map(TranscriptListItem::from)
        .collect();

    Ok(HttpResponse::Ok().json(TranscriptListResponse { transcripts }))
}

pub async fn get_transcript(
    data: web::Data<AppState>,
    user: SessionUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let transcript = data.database.get_transcript(&id, &user.id)?;

    let summaries = data
        .database
        .list_summaries(&user.id, Some(&transcript.id))?
        .into_iter()
        .map(|row| SummaryBrief::from(row.summary))
        .collect();

    Ok(HttpResponse::Ok().json(TranscriptResponse {
        transcript: TranscriptDetail {
            id: transcript.id,
            title: transcript.title,
            content: transcript.content,
            created_at: transcript.created_at,
            updated_at: transcript.updated_at,
            summaries,
        },
    }))
}

pub async fn delete_transcript(
    data: web::Data<AppState>,
    user: SessionUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    data.database.delete_transcript(&id, &user.id)?;

    tracing::info!("Deleted transcript {} for user {}", id, user.id);

    Ok(HttpResponse::Ok().json(MessageResponse::new("Transcript deleted successfully")))
}
