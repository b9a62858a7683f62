mod auth;
pub mod dto;
mod inquiry;
pub mod response;
mod router;
pub mod ssr;

pub use router::{AppState, create_router};
