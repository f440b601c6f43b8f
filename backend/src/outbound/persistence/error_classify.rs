//! Shared classification of Diesel errors for adapter error mapping.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Transport-level classification of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(String),
    /// A uniqueness constraint fired; carries the constraint name when the
    /// driver reports one.
    UniqueViolation(Option<String>),
    /// Any other query failure.
    Query(String),
}

/// Classify a Diesel error, logging the raw diagnostics at debug level.
pub(crate) fn classify(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    DieselFailure::UniqueViolation(info.constraint_name().map(str::to_owned))
                }
                DatabaseErrorKind::ClosedConnection => {
                    DieselFailure::Connection(info.message().to_owned())
                }
                _ => DieselFailure::Query(info.message().to_owned()),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            DieselFailure::Query(other.to_string())
        }
    }
}
