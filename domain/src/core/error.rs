//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Empty test plan: no topics with at least one question")]
    EmptyPlan,

    #[error("Invalid run state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid channel: {0}")]
    InvalidChannel(String),

    #[error("Invalid credential artifact: {0}")]
    InvalidCredential(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: "Idle".to_string(),
            to: "RunComplete".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid run state transition: Idle -> RunComplete"
        );
    }
}
