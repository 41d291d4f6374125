//! Route table shared by the server binary and the integration tests.
//!
//! Callers wrap the app in [`crate::middleware::SessionGate`] so the guard sees
//! every request, pages included:
//!
//! ```ignore
//! App::new()
//!     .app_data(state)
//!     .wrap(SessionGate)
//!     .configure(configure_routes)
//! ```

use crate::error::AppError;
use crate::handlers::{
    auth_handlers, dashboard_handlers, main_handlers, page_handlers, share_handlers,
    summary_handlers, transcript_handlers,
};
use actix_web::{error::JsonPayloadError, web, HttpRequest};

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);
    AppError::InvalidRequest(format!("Invalid request body: {err}")).into()
}

fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    AppError::InvalidRequest(format!("Invalid query string: {err}")).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));

    let api_scope = web::scope("/api")
        .route("/health", web::get().to(main_handlers::health_check))
        .route("/prompts", web::get().to(main_handlers::list_prompts))
        .service(
            web::scope("/auth")
                .route("/signup", web::post().to(auth_handlers::signup))
                .route("/login", web::post().to(auth_handlers::login))
                .route("/logout", web::post().to(auth_handlers::logout))
                .route("/session", web::get().to(auth_handlers::session)),
        )
        .service(
            web::scope("/transcripts")
                .route("", web::get().to(transcript_handlers::list_transcripts))
                .route("", web::post().to(transcript_handlers::create_transcript))
                .route("/{id}", web::get().to(transcript_handlers::get_transcript))
                .route(
                    "/{id}",
                    web::delete().to(transcript_handlers::delete_transcript),
                ),
        )
        .service(
            web::scope("/summaries")
                .route("", web::get().to(summary_handlers::list_summaries))
                .route(
                    "/generate",
                    web::post().to(summary_handlers::generate_summary),
                )
                .route("/{id}", web::get().to(summary_handlers::get_summary))
                .route("/{id}", web::put().to(summary_handlers::update_summary))
                .route("/{id}", web::delete().to(summary_handlers::delete_summary))
                .route(
                    "/{id}/share",
                    web::post().to(summary_handlers::share_summary),
                ),
        )
        .route("/shares", web::get().to(share_handlers::list_shares))
        .route(
            "/dashboard/stats",
            web::get().to(dashboard_handlers::get_stats),
        );

    cfg.service(api_scope)
        .route("/", web::get().to(page_handlers::index))
        .route("/login", web::get().to(page_handlers::login_page))
        .route("/signup", web::get().to(page_handlers::signup_page))
        .route("/dashboard", web::get().to(page_handlers::dashboard_page))
        .route(
            "/dashboard/{tail:.*}",
            web::get().to(page_handlers::dashboard_page),
        );
}
