//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Tagged result for session-scoped fetches that distinguish why nothing
/// came back. The four cases are mutually exclusive; only `Success` carries
/// a payload, the rest carry a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    NotFound(String),
    Unauthorized(String),
    Error(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The payload, discarding any failure message.
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_tags_are_mutually_exclusive() {
        let success: Outcome<u32> = Outcome::Success(7);
        assert!(success.is_success());
        assert_eq!(success.into_option(), Some(7));

        let missing: Outcome<u32> = Outcome::NotFound("gone".to_string());
        assert!(!missing.is_success());
        assert_eq!(missing.into_option(), None);
    }
}
