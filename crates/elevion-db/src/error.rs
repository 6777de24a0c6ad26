//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,
}

impl DbError {
    /// Whether this error is a unique-constraint violation (Postgres 23505).
    ///
    /// Creates propagate constraint failures unwrapped; callers that want
    /// to distinguish "duplicate username" from a connection fault check
    /// here instead of parsing messages.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }
}

/// Result alias for database operations
pub type DbResult<T> = Result<T, DbError>;
