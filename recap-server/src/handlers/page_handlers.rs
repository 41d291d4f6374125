use actix_web::{http::header::ContentType, HttpResponse};

const INDEX_PAGE: &str = include_str!("../pages/index.html");
const LOGIN_PAGE: &str = include_str!("../pages/login.html");
const SIGNUP_PAGE: &str = include_str!("../pages/signup.html");
const DASHBOARD_PAGE: &str = include_str!("../pages/dashboard.html");

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

pub async fn index() -> HttpResponse {
    html(INDEX_PAGE)
}

pub async fn login_page() -> HttpResponse {
    html(LOGIN_PAGE)
}

pub async fn signup_page() -> HttpResponse {
    html(SIGNUP_PAGE)
}

/// Reached only with a session cookie; see [`crate::middleware::SessionGate`]
pub async fn dashboard_page() -> HttpResponse {
    html(DASHBOARD_PAGE)
}
