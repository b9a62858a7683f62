//! # Apna Server
//!
//! Backend for the Apna Project lead-capture website: inquiry intake with a
//! templated confirmation email, a token-gated admin surface, and
//! server-side rendered pages with per-project SEO metadata.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use apna_server::auth::TokenSigner;
//! use apna_server::mail::ResendMailer;
//! use apna_server::server::{AppState, create_router};
//! use apna_server::store::SqliteStore;
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/apna.db")).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState {
//!     store: Arc::new(store),
//!     mailer: Arc::new(ResendMailer::new("re_...".into()).unwrap()),
//!     signer: TokenSigner::new(b"secret"),
//!     frontend_dist: PathBuf::from("./dist"),
//!     uploads_dir: PathBuf::from("./uploads"),
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod mail;
pub mod server;
pub mod store;
pub mod types;
