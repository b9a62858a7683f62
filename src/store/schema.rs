pub const SCHEMA: &str = r#"
-- Lead submissions. Never updated in place.
CREATE TABLE IF NOT EXISTS inquiries (
    id TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    mobile TEXT NOT NULL,
    email TEXT NOT NULL,
    source TEXT,
    project_id TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_inquiries_created_at ON inquiries(created_at DESC);

-- Privileged accounts. One record is seeded at process start.
CREATE TABLE IF NOT EXISTS admins (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Projects with an embedded SEO sub-record. seo_slug IS NULL means the
-- project carries no SEO configuration. Script lists are JSON arrays.
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    seo_slug TEXT,
    seo_title TEXT,
    seo_meta_description TEXT,
    seo_canonical TEXT,
    seo_robots TEXT,
    seo_og_title TEXT,
    seo_og_description TEXT,
    seo_scripts TEXT,
    seo_body_scripts TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_projects_seo_slug ON projects(seo_slug);
"#;
