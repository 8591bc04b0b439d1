//! Middleware for the web layer.

pub mod cors;
pub mod security;
pub mod session;

pub use cors::create_cors_layer;
pub use security::security_headers;
pub use session::{require_session, session_user, CurrentUser};
