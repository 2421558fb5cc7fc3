//! Session repository port
//!
//! Persistence for authenticated sessions: one folder per session holding a
//! credential artifact, discovered and reused across runs.

use chatcheck_domain::{CredentialArtifact, Session};
use thiserror::Error;

/// Storage failures for session persistence.
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credential artifact is not well-formed: {0}")]
    Malformed(String),
}

/// Filesystem-backed session storage.
pub trait SessionRepository: Send + Sync {
    /// All discoverable sessions, regardless of validity.
    fn list(&self) -> Result<Vec<Session>, SessionStoreError>;

    /// Load and parse the credential artifact of a session.
    ///
    /// A missing or malformed artifact is an `Err`, which validation treats
    /// as "invalid session", never as fatal.
    fn load_artifact(&self, session: &Session) -> Result<CredentialArtifact, SessionStoreError>;

    /// Create a new session folder and persist its artifact atomically
    /// (write-then-rename) before returning the handle.
    fn create(&self, artifact: &CredentialArtifact) -> Result<Session, SessionStoreError>;

    /// Re-save a refreshed artifact into an existing session
    /// (refresh-and-resave is the only permitted mutation).
    fn resave(
        &self,
        session: &Session,
        artifact: &CredentialArtifact,
    ) -> Result<(), SessionStoreError>;
}
