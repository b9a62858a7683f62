use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::mail::confirmation::send_confirmation;
use crate::server::AppState;
use crate::server::dto::{InquiryListResponse, SubmitInquiryRequest};
use crate::server::response::{ApiError, ApiResponse};
use crate::types::Inquiry;

fn required(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::bad_request("All fields are required.")),
    }
}

pub async fn add_inquiry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitInquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let full_name = required(req.full_name)?;
    let mobile = required(req.mobile)?;
    let email = required(req.email)?;

    let inquiry = Inquiry {
        id: Uuid::new_v4().to_string(),
        full_name,
        mobile,
        email,
        source: req.source,
        project_id: req.project_id,
        created_at: Utc::now(),
    };

    state
        .store
        .create_inquiry(&inquiry)
        .map_err(|e| ApiError::internal_with("Error submitting form.", e.to_string()))?;

    // Fire-and-forget: delivery failure is logged inside send_confirmation
    // and never alters the submission response.
    let mailer = state.mailer.clone();
    let (full_name, email, source) = (
        inquiry.full_name.clone(),
        inquiry.email.clone(),
        inquiry.source.clone(),
    );
    tokio::spawn(async move {
        send_confirmation(mailer.as_ref(), &full_name, &email, source.as_deref()).await;
    });

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data("Form submitted successfully.", inquiry)),
    ))
}

pub async fn get_inquiry(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> Result<Json<InquiryListResponse>, ApiError> {
    let inquiries = state
        .store
        .list_inquiries()
        .map_err(|e| ApiError::internal_with("Error in getting inquiry", e.to_string()))?;

    Ok(Json(InquiryListResponse {
        success: true,
        message: "Inquiry fetched successfully".to_string(),
        inquiry: inquiries,
    }))
}

pub async fn delete_inquiry(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::missing_parameter("Inquiry id is required."));
    }

    // No existence check: deleting an unknown id reports success, so the
    // operation is idempotent from the caller's perspective.
    state
        .store
        .delete_inquiry(&id)
        .map_err(|e| ApiError::internal_with("Error deleting inquiry.", e.to_string()))?;

    Ok(Json(ApiResponse::message("Inquiry deleted successfully")))
}

pub async fn delete_inquiry_missing_id(_admin: RequireAdmin) -> ApiError {
    ApiError::missing_parameter("Inquiry id is required.")
}
