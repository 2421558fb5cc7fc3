//! Session lifecycle management.
//!
//! Creates, discovers, validates and reuses authenticated sessions. A run
//! first looks for the most recently created session whose credential
//! artifact still carries every marker the channel requires; only when none
//! exists does it fall through to the channel's login flow.

use crate::ports::login_flow::{LoginError, LoginFlow};
use crate::ports::session_repository::{SessionRepository, SessionStoreError};
use chatcheck_domain::{Channel, Session};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default bound on the login flow (interactive logins included).
const DEFAULT_LOGIN_BOUND: Duration = Duration::from_secs(300);

/// Session establishment failures. Fatal for the run.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Login flow error: {0}")]
    Login(#[from] LoginError),

    #[error("Login flow did not complete within {0:?}")]
    LoginTimeout(Duration),

    #[error("Login flow completed but the artifact lacks required markers for {0}")]
    MissingMarkers(Channel),

    #[error("Session storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Manages the session lifecycle for one channel.
pub struct SessionManager {
    repository: Arc<dyn SessionRepository>,
    login: Arc<dyn LoginFlow>,
    channel: Channel,
    login_bound: Duration,
}

impl SessionManager {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        login: Arc<dyn LoginFlow>,
        channel: Channel,
    ) -> Self {
        Self {
            repository,
            login,
            channel,
            login_bound: DEFAULT_LOGIN_BOUND,
        }
    }

    /// Override the bound on the login flow.
    pub fn with_login_bound(mut self, bound: Duration) -> Self {
        self.login_bound = bound;
        self
    }

    /// True only if the session's artifact exists, parses, and carries every
    /// required marker. Missing file, parse failure and missing markers all
    /// yield `false` — none are fatal by themselves.
    pub fn validate(&self, session: &Session) -> bool {
        match self.repository.load_artifact(session) {
            Ok(artifact) => {
                let valid = artifact.has_required_markers(self.channel);
                if !valid {
                    debug!(session = %session.id, "session artifact lacks required markers");
                }
                valid
            }
            Err(e) => {
                debug!(session = %session.id, error = %e, "session artifact unreadable");
                false
            }
        }
    }

    /// The most recently created session that validates, or `None`.
    ///
    /// Ordering: creation timestamp descending, lexical id order as the
    /// deterministic tie-break.
    pub fn find_latest_valid(&self) -> Result<Option<Session>, SessionError> {
        let mut sessions = self.repository.list()?;
        sessions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        for session in sessions {
            if self.validate(&session) {
                info!(session = %session.id, "reusing existing valid session");
                return Ok(Some(session));
            }
            warn!(session = %session.id, "skipping invalid session");
        }
        Ok(None)
    }

    /// Run the login flow under a bounded wait and persist the produced
    /// artifact atomically before returning the handle.
    pub async fn create(&self) -> Result<Session, SessionError> {
        info!(channel = %self.channel, "no valid session, starting login flow");
        let artifact = tokio::time::timeout(self.login_bound, self.login.login())
            .await
            .map_err(|_| SessionError::LoginTimeout(self.login_bound))??;

        if !artifact.has_required_markers(self.channel) {
            return Err(SessionError::MissingMarkers(self.channel));
        }

        let session = self.repository.create(&artifact)?;
        info!(session = %session.id, "new session established");
        Ok(session)
    }

    /// Reuse the latest valid session or fall through to [`create`].
    ///
    /// [`create`](Self::create) is never invoked while a valid stored
    /// session exists.
    pub async fn acquire(&self) -> Result<Session, SessionError> {
        if let Some(session) = self.find_latest_valid()? {
            return Ok(session);
        }
        self.create().await
    }
}
