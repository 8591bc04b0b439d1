//! Web layer for Quill.
//!
//! JSON API and server-rendered pages on axum, guarded by a cookie session.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::{ApiError, ViewError};
pub use handlers::AppState;
pub use router::{create_app, create_router};
pub use server::WebServer;
