//! Authentication module for Quill.
//!
//! Password hashing, user accounts, signup and credential checks, and the
//! in-memory session table used by the web layer.

mod password;
mod repository;
mod service;
mod session;
mod user;

pub use password::{
    validate_password, PasswordError, PasswordHasher, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use repository::UserRepository;
pub use service::UserService;
pub use session::{AuthSession, LimitResult, LoginLimiter, SessionError, SessionManager};
pub use user::{normalize_email, NewUser, User};
