use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use super::{auth, inquiry, ssr};
use crate::auth::TokenSigner;
use crate::mail::Mailer;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub mailer: Arc<dyn Mailer>,
    pub signer: TokenSigner,
    /// Built frontend directory. Its `index.html` is the SSR shell and its
    /// `assets/` subdirectory is served statically.
    pub frontend_dist: PathBuf,
    pub uploads_dir: PathBuf,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

fn inquiry_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addInquiry", post(inquiry::add_inquiry))
        .route("/getInquiry", get(inquiry::get_inquiry))
        .route("/deleteInquiry", delete(inquiry::delete_inquiry_missing_id))
        .route("/deleteInquiry/{id}", delete(inquiry::delete_inquiry))
}

fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/isAuthenticated", get(auth::is_authenticated))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/inquiry", inquiry_router())
        .nest("/api/v1/auth", auth_router())
        .nest_service("/uploads", ServeDir::new(&state.uploads_dir))
        .nest_service("/assets", ServeDir::new(state.frontend_dist.join("assets")))
        .route_service(
            "/favicon.ico",
            ServeFile::new(state.frontend_dist.join("favicon.ico")),
        )
        .route_service(
            "/robots.txt",
            ServeFile::new(state.frontend_dist.join("robots.txt")),
        )
        .route_service(
            "/sitemap.xml",
            ServeFile::new(state.frontend_dist.join("sitemap.xml")),
        )
        // Everything else is a page request: render the shell with SEO data.
        .fallback(ssr::render_page)
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}
