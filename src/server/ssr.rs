//! Server-side rendering of the client shell with per-project SEO metadata.
//!
//! Runs as the router fallback for GET paths no API route or static service
//! claimed. The built frontend's `index.html` is read per request (the file
//! is static per deployment) to extract its hashed asset references, then a
//! full document is assembled around an empty mount point for client-side
//! hydration.

use std::sync::{Arc, LazyLock};

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use regex::Regex;

use crate::server::AppState;
use crate::types::ProjectSeo;

const DEFAULT_TITLE: &str = "Apna Project";
const DEFAULT_DESCRIPTION: &str = "Welcome to Apna Project";
const DEFAULT_ROBOTS: &str = "index, follow";
const FALLBACK_OG_TITLE: &str = "Apna project offering plot buying";
const FALLBACK_OG_DESCRIPTION: &str = "Buy plot from Apna Project at best price and best location";
const FALLBACK_CANONICAL: &str = "https://apnaprojectpatna.com/";
const FAVICON_PATH: &str = "/assets/logo-BdHZwnLv.png";

static CSS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(/assets/[^"]+\.css)""#).unwrap());
static JS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="(/assets/[^"]+\.js)""#).unwrap());

/// Resolved head metadata for one rendered page.
#[derive(Debug, Clone)]
pub struct SeoData {
    pub title: String,
    pub description: String,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub scripts: Vec<String>,
    pub body_scripts: Vec<String>,
}

impl Default for SeoData {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            canonical: None,
            robots: Some(DEFAULT_ROBOTS.to_string()),
            og_title: None,
            og_description: None,
            scripts: Vec::new(),
            body_scripts: Vec::new(),
        }
    }
}

impl SeoData {
    /// Overlays a project's SEO record onto the defaults.
    ///
    /// `title` and `description` keep their defaults when the record omits
    /// them; every other field is taken from the record unconditionally,
    /// even when absent. The asymmetry only shows through the render-time
    /// fallbacks below.
    #[must_use]
    pub fn overlay(mut self, seo: &ProjectSeo) -> Self {
        if let Some(title) = &seo.title {
            self.title = title.clone();
        }
        if let Some(description) = &seo.meta_description {
            self.description = description.clone();
        }
        self.canonical = seo.canonical.clone();
        self.robots = seo.robots.clone();
        self.og_title = seo.og_title.clone();
        self.og_description = seo.og_description.clone();
        self.scripts = seo.scripts.clone();
        self.body_scripts = seo.body_scripts.clone();
        self
    }
}

/// Extracts stylesheet and module-script asset paths from the built shell,
/// in document order, duplicates preserved.
pub fn extract_asset_paths(shell_html: &str) -> (Vec<String>, Vec<String>) {
    let css = CSS_RE
        .captures_iter(shell_html)
        .map(|c| c[1].to_string())
        .collect();
    let js = JS_RE
        .captures_iter(shell_html)
        .map(|c| c[1].to_string())
        .collect();
    (css, js)
}

fn or_fallback<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Assembles the full HTML document. The `#root` mount point is left empty;
/// hydration happens client-side.
pub fn render_document(seo: &SeoData, css_files: &[String], js_files: &[String]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                link rel="icon" type="image/svg+xml" sizes="48x48" href=(FAVICON_PATH);
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (seo.title) }
                meta name="description" content=(seo.description);
                meta property="og:title" content=(or_fallback(&seo.og_title, FALLBACK_OG_TITLE));
                meta property="og:description" content=(or_fallback(&seo.og_description, FALLBACK_OG_DESCRIPTION));
                meta name="robots" content=(or_fallback(&seo.robots, DEFAULT_ROBOTS));
                link rel="canonical" href=(or_fallback(&seo.canonical, FALLBACK_CANONICAL));
                @for css in css_files {
                    link rel="stylesheet" crossorigin href=(css);
                }
                @for snippet in &seo.scripts {
                    (PreEscaped(snippet.as_str()))
                }
            }
            body {
                @for snippet in &seo.body_scripts {
                    (PreEscaped(snippet.as_str()))
                }
                div id="root" {}
                @for js in js_files {
                    script type="module" crossorigin src=(js) {}
                }
            }
        }
    }
}

/// Router fallback. Responds with the rendered shell for GET requests and
/// a plain-text 500 on any failure; page routes never return the JSON
/// error envelope.
pub async fn render_page(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET {
        return StatusCode::NOT_FOUND.into_response();
    }

    // Unmatched API paths are not pages.
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return StatusCode::NOT_FOUND.into_response();
    }

    match render_for_path(&state, uri.path()).await {
        Ok(document) => Html(document).into_response(),
        Err(e) => {
            tracing::error!("SSR error for {}: {e}", uri.path());
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn render_for_path(state: &AppState, path: &str) -> crate::error::Result<String> {
    let slug = path.strip_prefix('/').unwrap_or(path).trim();

    let mut seo = SeoData::default();
    if !slug.is_empty() {
        if let Some(project) = state.store.get_project_by_seo_slug(slug)? {
            if let Some(record) = &project.seo {
                seo = seo.overlay(record);
            }
        }
    }

    let shell = tokio::fs::read_to_string(state.frontend_dist.join("index.html")).await?;
    let (css_files, js_files) = extract_asset_paths(&shell);

    Ok(render_document(&seo, &css_files, &js_files).into_string())
}
