//! Error type for storage operations.
//!
//! Driver errors are classified by the constraint they violated so callers can
//! tell a duplicate email apart from a dangling phone owner without parsing
//! messages.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors returned by schema, mutator and reader operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the row (e.g. a duplicate client email).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A FOREIGN KEY constraint rejected the row (e.g. a phone for a missing client).
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A NOT NULL constraint rejected the row.
    #[error("not-null constraint violated: {0}")]
    NotNullViolation(String),

    /// Any other driver or connectivity failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return Self::UniqueViolation(message),
                ErrorKind::ForeignKeyViolation => return Self::ForeignKeyViolation(message),
                ErrorKind::NotNullViolation => return Self::NotNullViolation(message),
                _ => {}
            }
        }
        Self::Database(err)
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_passed_through() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn messages_name_the_constraint() {
        let err = StoreError::UniqueViolation("clients_email_key".to_string());
        assert_eq!(err.to_string(), "unique constraint violated: clients_email_key");
    }
}
