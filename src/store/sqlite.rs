use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::{Admin, Inquiry, Project, ProjectSeo};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn scripts_to_json(scripts: &[String]) -> Result<Option<String>> {
    if scripts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(scripts)?))
    }
}

fn scripts_from_json(json: Option<String>) -> Vec<String> {
    json.as_deref()
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

fn row_to_inquiry(row: &Row<'_>) -> rusqlite::Result<Inquiry> {
    Ok(Inquiry {
        id: row.get(0)?,
        full_name: row.get(1)?,
        mobile: row.get(2)?,
        email: row.get(3)?,
        source: row.get(4)?,
        project_id: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    let seo_slug: Option<String> = row.get(2)?;
    let seo = match seo_slug {
        Some(slug) => Some(ProjectSeo {
            slug,
            title: row.get(3)?,
            meta_description: row.get(4)?,
            canonical: row.get(5)?,
            robots: row.get(6)?,
            og_title: row.get(7)?,
            og_description: row.get(8)?,
            scripts: scripts_from_json(row.get(9)?),
            body_scripts: scripts_from_json(row.get(10)?),
        }),
        None => None,
    };

    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        seo,
        created_at: parse_datetime(&row.get::<_, String>(11)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Inquiry operations

    fn create_inquiry(&self, inquiry: &Inquiry) -> Result<()> {
        self.conn().execute(
            "INSERT INTO inquiries (id, full_name, mobile, email, source, project_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                inquiry.id,
                inquiry.full_name,
                inquiry.mobile,
                inquiry.email,
                inquiry.source,
                inquiry.project_id,
                format_datetime(&inquiry.created_at),
            ],
        )?;
        Ok(())
    }

    fn list_inquiries(&self) -> Result<Vec<Inquiry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, full_name, mobile, email, source, project_id, created_at
             FROM inquiries ORDER BY created_at DESC, rowid DESC",
        )?;
        let inquiries = stmt
            .query_map([], row_to_inquiry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(inquiries)
    }

    fn delete_inquiry(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn()
            .execute("DELETE FROM inquiries WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // Admin operations

    fn create_admin(&self, admin: &Admin) -> Result<()> {
        self.conn().execute(
            "INSERT INTO admins (id, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                admin.id,
                admin.email,
                admin.password_hash,
                format_datetime(&admin.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, email, password_hash, created_at FROM admins WHERE email = ?1",
            params![email],
            |row| {
                Ok(Admin {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_admin_by_id(&self, id: &str) -> Result<Option<Admin>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, email, password_hash, created_at FROM admins WHERE id = ?1",
            params![id],
            |row| {
                Ok(Admin {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    // Project / SEO operations

    fn create_project(&self, project: &Project) -> Result<()> {
        let seo = project.seo.as_ref();
        self.conn().execute(
            "INSERT INTO projects (id, name, seo_slug, seo_title, seo_meta_description,
                                   seo_canonical, seo_robots, seo_og_title, seo_og_description,
                                   seo_scripts, seo_body_scripts, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                project.id,
                project.name,
                seo.map(|s| s.slug.clone()),
                seo.and_then(|s| s.title.clone()),
                seo.and_then(|s| s.meta_description.clone()),
                seo.and_then(|s| s.canonical.clone()),
                seo.and_then(|s| s.robots.clone()),
                seo.and_then(|s| s.og_title.clone()),
                seo.and_then(|s| s.og_description.clone()),
                seo.map(|s| scripts_to_json(&s.scripts)).transpose()?.flatten(),
                seo.map(|s| scripts_to_json(&s.body_scripts)).transpose()?.flatten(),
                format_datetime(&project.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_project_by_seo_slug(&self, slug: &str) -> Result<Option<Project>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, seo_slug, seo_title, seo_meta_description,
                    seo_canonical, seo_robots, seo_og_title, seo_og_description,
                    seo_scripts, seo_body_scripts, created_at
             FROM projects WHERE seo_slug = ?1",
            params![slug],
            row_to_project,
        )
        .optional()
        .map_err(Error::from)
    }

    fn close(&self) -> Result<()> {
        // Fold the WAL back into the main database file before shutdown.
        let conn = self.conn();
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        Ok(())
    }
}
