//! Web server for Quill.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::{Config, WebConfig};
use crate::{Database, QuillError, Result};

use super::handlers::AppState;
use super::router::create_app;

/// HTTP server for the API and the pages.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
    /// Seconds between expired-session sweeps.
    cleanup_interval_secs: u64,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| QuillError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(db, config)?),
            web_config: config.web.clone(),
            cleanup_interval_secs: config.session.cleanup_interval_secs,
        })
    }

    /// Start the session cleanup background task.
    ///
    /// Drops expired and idle sessions along with stale login attempts.
    fn start_session_cleanup_task(state: Arc<AppState>, interval_secs: u64) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let (removed, remaining) = {
                    let mut sessions = state.sessions.lock().await;
                    (sessions.cleanup(), sessions.session_count())
                };
                if removed > 0 {
                    tracing::info!(
                        removed_count = removed,
                        active_count = remaining,
                        "Cleaned up expired sessions"
                    );
                } else {
                    tracing::debug!("No expired sessions to clean up");
                }
            }
        });
    }

    /// Run the web server until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let state = self.app_state.clone();
        let router = create_app(self.app_state, &self.web_config);
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(state, self.cleanup_interval_secs);
        tracing::info!(
            interval_secs = self.cleanup_interval_secs,
            "Session cleanup task started"
        );

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Web server stopped");
        Ok(())
    }
}
