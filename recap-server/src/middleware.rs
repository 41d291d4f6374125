use crate::auth::{session_token, validate_token};
use crate::error::AppError;
use crate::handlers::AppState;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, FromRequest, HttpRequest, HttpResponse,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use shared_types::{ErrorResponse, UserInfo};

/// Pages that send anonymous visitors to the login form
const PAGE_PREFIXES: &[&str] = &["/dashboard"];
/// API routes that answer anonymous callers with 401
const API_PREFIXES: &[&str] = &["/api/transcripts", "/api/summaries"];

/// `/dashboard` matches `/dashboard` and `/dashboard/x`, never `/dashboards`
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

enum Gate {
    Open,
    RedirectToLogin,
    Reject,
}

fn classify(path: &str, has_session: bool) -> Gate {
    if has_session {
        return Gate::Open;
    }
    if PAGE_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        return Gate::RedirectToLogin;
    }
    if API_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        return Gate::Reject;
    }
    Gate::Open
}

/// Login URL carrying the original path and query as `callbackUrl`
pub fn login_redirect_location(path_and_query: &str) -> String {
    format!("/login?callbackUrl={}", urlencoding::encode(path_and_query))
}

/// Route guard run before any handler. It only checks that a session token
/// (cookie or bearer header) is present; handlers validate it through [`SessionUser`].
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateService { service }))
    }
}

pub struct SessionGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let has_session = session_token(req.request()).is_some();

        match classify(req.path(), has_session) {
            Gate::Open => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Gate::RedirectToLogin => {
                let path_and_query = req
                    .uri()
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| req.path().to_string());
                tracing::debug!("Redirecting anonymous request for {} to login", path_and_query);

                let response = HttpResponse::TemporaryRedirect()
                    .insert_header((header::LOCATION, login_redirect_location(&path_and_query)))
                    .finish()
                    .map_into_right_body();
                Box::pin(async move { Ok(req.into_response(response)) })
            }
            Gate::Reject => {
                tracing::debug!("Rejected anonymous request for {}", req.path());
                let response = HttpResponse::Unauthorized()
                    .json(ErrorResponse {
                        error: "unauthorized".to_string(),
                        message: "Unauthorized".to_string(),
                    })
                    .map_into_right_body();
                Box::pin(async move { Ok(req.into_response(response)) })
            }
        }
    }
}

/// The caller, resolved from a valid session token whose user still exists
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    /// Unix seconds at which the session token expires
    pub expires_at: i64,
}

impl SessionUser {
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    /// Name shown to email recipients
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(Some(self.email.as_str()).filter(|e| !e.is_empty()))
            .unwrap_or("Anonymous")
    }
}

fn resolve_session_user(req: &HttpRequest) -> Result<SessionUser, AppError> {
    let unauthorized = || AppError::Unauthorized("Unauthorized".to_string());

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("Application state not configured".to_string()))?;

    let token = session_token(req).ok_or_else(unauthorized)?;
    let claims = validate_token(&token, state.config.session_secret())?;

    let user = match state.database.get_user_by_id(&claims.sub) {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            tracing::warn!("Session refers to missing user {}", claims.sub);
            return Err(unauthorized());
        }
        Err(e) => return Err(e),
    };

    Ok(SessionUser {
        id: user.id,
        email: user.email,
        name: user.name,
        expires_at: claims.exp,
    })
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_session_user(req))
    }
}
