use crate::config::AppConfig;
use crate::database::Database;
use crate::email::EmailSender;
use crate::error::AppError;
use crate::prompts::default_presets;
use crate::summarizer::SummaryGenerator;
use actix_web::{web, HttpResponse, Result};
use shared_types::{PromptListResponse, ServerStatus};
use std::sync::Arc;
use std::time::SystemTime;

pub struct AppState {
    pub database: Arc<Database>,
    pub start_time: SystemTime,
    pub config: Arc<AppConfig>,
    pub summarizer: Arc<SummaryGenerator>,
    pub email_sender: Arc<dyn EmailSender>,
}

pub async fn health_check(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let uptime = data
        .start_time
        .elapsed()
        .map_err(|e| AppError::Internal(format!("Failed to calculate uptime: {e}")))?
        .as_secs();

    let status = ServerStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime,
    };

    Ok(HttpResponse::Ok().json(status))
}

pub async fn list_prompts() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(PromptListResponse {
        prompts: default_presets(),
    }))
}
