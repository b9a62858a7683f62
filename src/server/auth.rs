use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration;

use crate::auth::{AUTH_COOKIE, RequireAdmin, verify_password};
use crate::server::AppState;
use crate::server::dto::LoginRequest;
use crate::server::response::{ApiError, ApiResponse};

const TOKEN_TTL_DAYS: i64 = 7;

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (email, password) = match (req.email, req.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::bad_request("Email and password are required.")),
    };

    let admin = state
        .store
        .get_admin_by_email(&email)
        .map_err(|_| ApiError::internal("Error logging in."))?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let valid = verify_password(&password, &admin.password_hash)
        .map_err(|_| ApiError::internal("Error logging in."))?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = state
        .signer
        .sign(&admin.id, Duration::days(TOKEN_TTL_DAYS))
        .map_err(|_| ApiError::internal("Error logging in."))?;

    let cookie = Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(ApiResponse::with_data(
            "Logged in successfully",
            admin.identity(),
        )),
    ))
}

pub async fn logout(_admin: RequireAdmin, jar: CookieJar) -> impl IntoResponse {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");

    (
        jar.remove(cookie),
        Json(ApiResponse::message("Logged out successfully")),
    )
}

pub async fn is_authenticated(admin: RequireAdmin) -> impl IntoResponse {
    Json(ApiResponse::with_data("Authenticated", admin.0))
}
