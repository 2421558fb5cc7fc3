//! Filesystem session repository.
//!
//! One folder per session under the sessions root, each holding a
//! `cookies.json` credential artifact:
//!
//! ```text
//! sessions/<session-id>/cookies.json
//! ```
//!
//! Artifacts are persisted with write-then-rename so a half-written file is
//! never discoverable as a session.

use chatcheck_application::ports::session_repository::{SessionRepository, SessionStoreError};
use chatcheck_domain::{CredentialArtifact, Session};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Name of the credential artifact inside a session folder.
const ARTIFACT_FILE: &str = "cookies.json";

/// Filesystem-backed [`SessionRepository`].
pub struct FsSessionRepository {
    root: PathBuf,
}

impl FsSessionRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_path(session_path: &Path) -> PathBuf {
        session_path.join(ARTIFACT_FILE)
    }

    fn created_at(path: &Path) -> DateTime<Utc> {
        fs::metadata(path)
            .and_then(|m| m.created().or_else(|_| m.modified()))
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now())
    }

    fn write_artifact(
        path: &Path,
        artifact: &CredentialArtifact,
    ) -> Result<(), SessionStoreError> {
        let content = serde_json::to_string_pretty(artifact)
            .map_err(|e| SessionStoreError::Malformed(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl SessionRepository for FsSessionRepository {
    fn list(&self) -> Result<Vec<Session>, SessionStoreError> {
        let mut sessions = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // No sessions root yet means no sessions, not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(sessions),
            Err(e) => return Err(SessionStoreError::Io(e)),
        };
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().to_string();
            sessions.push(Session::new(id, path.clone(), Self::created_at(&path)));
        }
        debug!(count = sessions.len(), "discovered session folders");
        Ok(sessions)
    }

    fn load_artifact(&self, session: &Session) -> Result<CredentialArtifact, SessionStoreError> {
        let path = Self::artifact_path(&session.path);
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| SessionStoreError::Malformed(e.to_string()))
    }

    fn create(&self, artifact: &CredentialArtifact) -> Result<Session, SessionStoreError> {
        let id = Uuid::new_v4().to_string();
        let path = self.root.join(&id);
        fs::create_dir_all(&path)?;
        Self::write_artifact(&Self::artifact_path(&path), artifact)?;
        info!(session = %id, "session folder created");
        Ok(Session::new(id, path, Utc::now()))
    }

    fn resave(
        &self,
        session: &Session,
        artifact: &CredentialArtifact,
    ) -> Result<(), SessionStoreError> {
        Self::write_artifact(&Self::artifact_path(&session.path), artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcheck_domain::CredentialRecord;

    fn artifact() -> CredentialArtifact {
        CredentialArtifact::new(vec![
            CredentialRecord::new("c_user", "1"),
            CredentialRecord::new("xs", "sig"),
        ])
    }

    #[test]
    fn test_list_on_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsSessionRepository::new(dir.path().join("nope"));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsSessionRepository::new(dir.path());

        let session = repo.create(&artifact()).unwrap();
        assert!(session.path.join("cookies.json").exists());
        // No temp file left behind by the atomic write
        assert!(!session.path.join("cookies.json.tmp").exists());

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, session.id);

        let loaded = repo.load_artifact(&session).unwrap();
        assert_eq!(loaded, artifact());
    }

    #[test]
    fn test_malformed_artifact_is_soft_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsSessionRepository::new(dir.path());
        let session = repo.create(&artifact()).unwrap();
        fs::write(session.path.join("cookies.json"), "garbage").unwrap();

        assert!(matches!(
            repo.load_artifact(&session),
            Err(SessionStoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_resave_refreshes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FsSessionRepository::new(dir.path());
        let session = repo.create(&artifact()).unwrap();

        let refreshed =
            CredentialArtifact::new(vec![CredentialRecord::new("c_user", "2")]);
        repo.resave(&session, &refreshed).unwrap();
        assert_eq!(repo.load_artifact(&session).unwrap(), refreshed);
    }
}
