//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a rejected operation: the ledger it was aimed at is
/// left exactly as it was. Storage and transport failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (empty name, bad amount, split not summing to 100, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation would break a ledger invariant (e.g. removing the last person).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The referenced person, expense or trip does not exist.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            DomainError::validation("amount must be positive").to_string(),
            "validation failed: amount must be positive"
        );
        assert_eq!(
            DomainError::invariant("cannot remove the last person").to_string(),
            "invariant violated: cannot remove the last person"
        );
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
