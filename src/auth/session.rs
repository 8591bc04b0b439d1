//! Authentication session management for Quill.
//!
//! Sessions live in memory and are addressed by an opaque UUID token that
//! travels in the session cookie. Failed logins are counted per email and
//! lock the account for a while once the limit is hit.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::user::User;
use crate::config::SessionConfig;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid credentials (unknown email or wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account is locked due to too many failed attempts.
    #[error("account locked for {0} seconds")]
    AccountLocked(u64),

    /// Session has expired.
    #[error("session expired")]
    SessionExpired,

    /// Session not found.
    #[error("session not found")]
    SessionNotFound,
}

/// Authentication session representing a logged-in user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Unique session token (UUID v4).
    pub token: String,
    /// User ID associated with this session.
    pub user_id: i64,
    /// Email the user signed in with.
    pub email: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session expires (absolute timeout).
    pub expires_at: DateTime<Utc>,
    last_activity: Instant,
}

impl AuthSession {
    /// Create a session for a user that expires after `duration`.
    pub fn new(user_id: i64, email: impl Into<String>, duration: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(duration).unwrap_or_default();

        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            email: email.into(),
            created_at: now,
            expires_at,
            last_activity: Instant::now(),
        }
    }

    /// Check if the session has expired (absolute timeout).
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if the session has been idle too long.
    pub fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_activity.elapsed() >= idle_timeout
    }

    /// Check if the session is still valid (not expired and not idle).
    pub fn is_valid(&self, idle_timeout: Duration) -> bool {
        !self.is_expired() && !self.is_idle(idle_timeout)
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Result of a login attempt rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitResult {
    /// Login attempt is allowed.
    Allowed,
    /// Account is locked for the specified duration.
    Locked(Duration),
}

/// Login attempt limiter.
///
/// Tracks failed login attempts per email and enforces a lockout after
/// too many failures inside the window. Keys are used as given; callers
/// pass emails through [`normalize_email`](super::normalize_email) first.
#[derive(Debug)]
pub struct LoginLimiter {
    attempts: HashMap<String, Vec<Instant>>,
    max_attempts: u32,
    window: Duration,
    lockout: Duration,
}

impl LoginLimiter {
    /// Create a limiter. The counting window equals the lockout duration.
    pub fn new(max_attempts: u32, lockout_secs: u64) -> Self {
        Self {
            attempts: HashMap::new(),
            max_attempts,
            window: Duration::from_secs(lockout_secs),
            lockout: Duration::from_secs(lockout_secs),
        }
    }

    /// Check if a login attempt is allowed for the given email.
    pub fn check(&mut self, email: &str) -> LimitResult {
        let now = Instant::now();
        let attempts = self.attempts.entry(email.to_string()).or_default();

        attempts.retain(|t| now.duration_since(*t) < self.window);

        if attempts.len() >= self.max_attempts as usize {
            if let Some(oldest) = attempts.first() {
                let elapsed = now.duration_since(*oldest);
                if elapsed < self.lockout {
                    return LimitResult::Locked(self.lockout - elapsed);
                }
                attempts.clear();
            }
        }

        LimitResult::Allowed
    }

    /// Record a failed login attempt.
    pub fn record_failure(&mut self, email: &str) {
        let now = Instant::now();
        let attempts = self.attempts.entry(email.to_string()).or_default();

        attempts.retain(|t| now.duration_since(*t) < self.window);
        attempts.push(now);

        debug!(
            email = %email,
            attempt_count = attempts.len(),
            "Recorded failed login attempt"
        );
    }

    /// Clear all attempts for an email (called on successful login).
    pub fn clear(&mut self, email: &str) {
        self.attempts.remove(email);
    }

    /// Drop expired entries.
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        let window = self.window;
        self.attempts.retain(|_, attempts| {
            attempts.retain(|t| now.duration_since(*t) < window);
            !attempts.is_empty()
        });
    }
}

/// Session table shared by the web layer.
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<String, AuthSession>,
    limiter: LoginLimiter,
    duration: Duration,
    idle_timeout: Duration,
}

impl SessionManager {
    /// Create a session manager from the `[session]` configuration section.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            limiter: LoginLimiter::new(config.max_login_attempts, config.lockout_secs),
            duration: Duration::from_secs(config.duration_secs),
            idle_timeout: Duration::from_secs(config.idle_timeout_secs),
        }
    }

    /// Fail early when the email is currently locked out.
    ///
    /// Called before the password is verified so a locked account does not
    /// cost a hash computation.
    pub fn check_login(&mut self, email: &str) -> Result<(), SessionError> {
        match self.limiter.check(email) {
            LimitResult::Locked(remaining) => {
                warn!(
                    email = %email,
                    remaining_secs = remaining.as_secs(),
                    "Login attempt blocked: account locked"
                );
                Err(SessionError::AccountLocked(remaining.as_secs().max(1)))
            }
            LimitResult::Allowed => Ok(()),
        }
    }

    /// Finish a login attempt.
    ///
    /// `user` is the account whose credentials were verified, or `None` when
    /// verification failed. Returns the new session on success.
    pub fn login(&mut self, email: &str, user: Option<&User>) -> Result<AuthSession, SessionError> {
        self.check_login(email)?;

        let Some(user) = user else {
            self.limiter.record_failure(email);
            warn!(email = %email, "Login failed: invalid credentials");
            return Err(SessionError::InvalidCredentials);
        };

        self.limiter.clear(email);

        let session = AuthSession::new(user.id, &user.email, self.duration);
        self.sessions
            .insert(session.token.clone(), session.clone());

        info!(email = %email, user_id = user.id, "Login successful");
        Ok(session)
    }

    /// Log out a session by token.
    pub fn logout(&mut self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(session) => {
                info!(user_id = session.user_id, "Session logged out");
                true
            }
            None => {
                debug!("Logout: session not found");
                false
            }
        }
    }

    /// Validate a session and record activity on it.
    pub fn touch_session(&mut self, token: &str) -> Result<AuthSession, SessionError> {
        let idle_timeout = self.idle_timeout;
        let session = self
            .sessions
            .get_mut(token)
            .ok_or(SessionError::SessionNotFound)?;

        if !session.is_valid(idle_timeout) {
            self.sessions.remove(token);
            return Err(SessionError::SessionExpired);
        }

        session.touch();
        Ok(session.clone())
    }

    /// Remove expired sessions and stale login attempts.
    pub fn cleanup(&mut self) -> usize {
        let before = self.sessions.len();
        let idle_timeout = self.idle_timeout;

        self.sessions.retain(|_, s| s.is_valid(idle_timeout));
        self.limiter.cleanup();

        let removed = before - self.sessions.len();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired sessions");
        }
        removed
    }

    /// Get the number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
