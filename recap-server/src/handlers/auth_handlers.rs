use crate::auth::{
    expired_session_cookie, generate_token, hash_password, session_cookie, verify_password, Claims,
};
use crate::email::is_valid_address;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::SessionUser;
use crate::models::User;
use actix_web::{web, HttpResponse, Result};
use shared_types::{
    LoginRequest, LoginResponse, MessageResponse, SessionResponse, SignupRequest, UserResponse,
};

const MIN_PASSWORD_LENGTH: usize = 8;

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

pub async fn signup(
    data: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    let email = req.email.trim().to_string();
    if !is_valid_address(&email) {
        return Err(AppError::InvalidRequest(
            "A valid email address is required".to_string(),
        ));
    }

    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidRequest(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let password_hash = hash_password(&req.password)?;
    let user = User::new(email, name, password_hash);
    data.database.create_user(&user)?;

    tracing::info!("Created account {} ({})", user.id, user.email);

    Ok(HttpResponse::Created().json(UserResponse { user: user.info() }))
}

pub async fn login(
    data: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = match data.database.get_user_by_email(email) {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(invalid_credentials()),
        Err(e) => return Err(e),
    };

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::warn!("Failed login for {}", email);
        return Err(invalid_credentials());
    }

    let auth = &data.config.auth;
    let claims = Claims::new(
        &user.id,
        &user.email,
        user.name.clone(),
        auth.session_ttl_seconds,
    );
    let token = generate_token(&claims, data.config.session_secret())?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(
            token.clone(),
            auth.session_ttl_seconds,
            auth.secure_cookies,
        ))
        .json(LoginResponse {
            token,
            user: user.info(),
        }))
}

pub async fn logout(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .cookie(expired_session_cookie(data.config.auth.secure_cookies))
        .json(MessageResponse::new("Logged out")))
}

pub async fn session(user: SessionUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(SessionResponse {
        user: user.info(),
        expires_at: user.expires_at,
    }))
}
