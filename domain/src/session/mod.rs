//! Authenticated session entities.
//!
//! A session is a persisted authenticated context (a folder holding a
//! credential artifact) reused across runs until it stops validating. The
//! artifact is a JSON list of name/value records — browser cookies for the
//! page-driven channels, client session records for the bot platforms.

use crate::channel::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One credential record inside the artifact (cookie-shaped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub name: String,
    pub value: String,
    /// Transport-specific extras (domain, expiry, flags) preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CredentialRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// The parsed credential artifact of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialArtifact {
    records: Vec<CredentialRecord>,
}

impl CredentialArtifact {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True only if every marker the channel's auth scheme requires is
    /// present by name. An empty artifact never validates, even for
    /// channels with no required markers.
    pub fn has_required_markers(&self, channel: Channel) -> bool {
        if self.records.is_empty() {
            return false;
        }
        channel
            .required_markers()
            .iter()
            .all(|marker| self.records.iter().any(|r| r.name == *marker))
    }
}

/// A persisted authenticated session.
///
/// Never mutated after creation except refresh-and-resave of the artifact;
/// deleted only by external cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, path: PathBuf, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            path,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facebook_artifact() -> CredentialArtifact {
        CredentialArtifact::new(vec![
            CredentialRecord::new("c_user", "100001"),
            CredentialRecord::new("xs", "signature"),
            CredentialRecord::new("datr", "tracker"),
        ])
    }

    #[test]
    fn test_all_markers_present_validates() {
        assert!(facebook_artifact().has_required_markers(Channel::Facebook));
    }

    #[test]
    fn test_missing_signing_marker_fails() {
        let artifact = CredentialArtifact::new(vec![CredentialRecord::new("c_user", "100001")]);
        assert!(!artifact.has_required_markers(Channel::Facebook));
    }

    #[test]
    fn test_empty_artifact_never_validates() {
        assert!(!CredentialArtifact::default().has_required_markers(Channel::Webchat));
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let json = r#"[{"name":"c_user","value":"1","domain":".facebook.com","secure":true}]"#;
        let artifact: CredentialArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.records()[0].extra["domain"], ".facebook.com");
        let back = serde_json::to_string(&artifact).unwrap();
        assert!(back.contains("secure"));
    }
}
