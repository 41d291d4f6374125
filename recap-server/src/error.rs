use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// An outbound call (LLM, SMTP) failed. Only `message` reaches the caller.
    #[error("{message}: {detail}")]
    Dependency { message: String, detail: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn dependency(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Dependency {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Migration(_) => "database_error",
            AppError::Config(_) => "config_error",
            AppError::Io(_) => "io_error",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidRequest(_) => "validation_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Dependency { .. } => "dependency_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Text safe to show the caller. Server-side failures never leak their detail.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::InvalidRequest(msg) | AppError::Unauthorized(msg) => {
                msg.clone()
            }
            AppError::Dependency { message, .. } => message.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Dependency { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), "{}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_type().to_string(),
            message: self.public_message(),
        })
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("Blocking task failed: {e}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
