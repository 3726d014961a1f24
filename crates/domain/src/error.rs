//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations, so adapters can
//! classify contract failures without falling back to strings or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., a value outside its allowed range)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Input could not be parsed as JSON at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON parsed, but does not satisfy the response schema
    #[error("Schema violation on '{field}': {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if !(MIN..=MAX).contains(&value) {
    ///     return Err(DomainError::validation("intimacy out of range"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a schema violation naming the offending field.
    pub fn schema_violation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation { .. })
    }
}
