mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{Admin, Inquiry, Project};

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Inquiry operations
    fn create_inquiry(&self, inquiry: &Inquiry) -> Result<()>;
    /// All inquiries, most recent first.
    fn list_inquiries(&self) -> Result<Vec<Inquiry>>;
    /// Returns whether a row was actually removed. Callers treat deletion
    /// of an unknown id as success.
    fn delete_inquiry(&self, id: &str) -> Result<bool>;

    // Admin operations
    fn create_admin(&self, admin: &Admin) -> Result<()>;
    fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>>;
    fn get_admin_by_id(&self, id: &str) -> Result<Option<Admin>>;

    // Project / SEO operations
    fn create_project(&self, project: &Project) -> Result<()>;
    fn get_project_by_seo_slug(&self, slug: &str) -> Result<Option<Project>>;

    fn close(&self) -> Result<()>;
}
