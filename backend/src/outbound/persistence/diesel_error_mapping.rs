//! Shared classification of Diesel failures for the roster repositories.
//!
//! Each repository owns its port error type; this module reduces a Diesel
//! error to the handful of outcomes those types distinguish, logging the raw
//! database message at `debug` so it never reaches a client.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// What a failed statement means for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-statement.
    Connection(String),
    /// A unique or primary key constraint rejected the write.
    UniqueViolation(String),
    /// A foreign key pointed at a missing row.
    ForeignKeyViolation(String),
    /// Anything else.
    Query(String),
}

fn constraint_or(info: &dyn diesel::result::DatabaseErrorInformation, fallback: &str) -> String {
    info.constraint_name().unwrap_or(fallback).to_owned()
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query("database query error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation(constraint_or(info.as_ref(), "unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKeyViolation(constraint_or(info.as_ref(), "foreign key"))
        }
        DieselError::DatabaseError(_, _) => DieselFailure::Query("database error".to_owned()),
        _ => DieselFailure::Query("database error".to_owned()),
    }
}
