use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::error::Error;
use crate::server::AppState;
use crate::types::AdminIdentity;

/// Name of the cookie carrying the signed admin token.
pub const AUTH_COOKIE: &str = "token";

/// Extractor that gates a route behind a valid admin token cookie.
///
/// Verifies the cookie's signature and expiry against the shared secret,
/// then resolves the embedded admin id against the store. Idempotent and
/// side-effect free, so it is safe on every protected request.
pub struct RequireAdmin(pub AdminIdentity);

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    UnknownAdmin,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Access denied. No token provided.",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Invalid or expired token",
            ),
            AuthError::UnknownAdmin => (StatusCode::UNAUTHORIZED, "Invalid token."),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = json!({ "success": false, "message": message });

        (status, Json(body)).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AuthError::MissingToken)?;

        let claims = state.signer.verify(&token).map_err(|e| match e {
            Error::Config(_) => AuthError::InternalError,
            _ => AuthError::InvalidToken,
        })?;

        let admin = state
            .store
            .get_admin_by_id(&claims.sub)
            .map_err(|_| AuthError::InternalError)?
            .ok_or(AuthError::UnknownAdmin)?;

        Ok(RequireAdmin(admin.identity()))
    }
}
