use serde::{Deserialize, Serialize};

use crate::types::Inquiry;

/// Form submission body. Required fields arrive as options so an absent
/// field yields the API's 400 envelope instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInquiryRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Listing envelope. The records live under `inquiry`, not `data`;
/// the admin dashboard reads that key.
#[derive(Debug, Serialize)]
pub struct InquiryListResponse {
    pub success: bool,
    pub message: String,
    pub inquiry: Vec<Inquiry>,
}
