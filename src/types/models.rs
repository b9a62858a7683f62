use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored lead-capture submission. Created on form submission, listed
/// newest-first by the admin surface, deleted by id, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A privileged account. Seeded at startup, never created through a
/// public endpoint. The password hash never leaves this type's module
/// boundary in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    #[must_use]
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

/// The admin view that is safe to attach to a request or return to a client.
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub id: String,
    pub email: String,
}

/// A project entity carrying an optional embedded SEO configuration.
/// Read-only from the request path's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<ProjectSeo>,
    pub created_at: DateTime<Utc>,
}

/// Per-project metadata controlling rendered page head content.
/// `scripts` and `body_scripts` are raw snippets injected verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSeo {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_scripts: Vec<String>,
}
