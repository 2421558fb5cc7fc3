//! Login flow port
//!
//! Channel-specific interactive or exchange-based login producing a fresh
//! credential artifact. The session manager bounds the wait and validates
//! the produced markers.

use async_trait::async_trait;
use chatcheck_domain::CredentialArtifact;
use thiserror::Error;

/// Login failures.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Required credentials missing from the environment: {0}")]
    MissingCredentials(String),

    #[error("Login flow failed: {0}")]
    Failed(String),
}

/// Channel-specific login flow.
#[async_trait]
pub trait LoginFlow: Send + Sync {
    /// Run the login flow to completion and return the credential artifact
    /// it produced. The caller enforces the overall time bound.
    async fn login(&self) -> Result<CredentialArtifact, LoginError>;
}
