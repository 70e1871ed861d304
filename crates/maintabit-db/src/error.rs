//! Database-specific error types and conversions.

use maintabit_core::error::MaintabitError;
use surrealdb_types::QueryError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Corrupt record: {0}")]
    Decode(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    Duplicate { entity: String },
}

impl DbError {
    /// Whether the engine reported a transaction conflict, which may
    /// succeed when retried.
    pub fn is_retryable_conflict(&self) -> bool {
        match self {
            DbError::Surreal(e) => {
                matches!(e.query_details(), Some(QueryError::TransactionConflict))
            }
            _ => false,
        }
    }

    /// Map a failed write to [`DbError::Duplicate`] when a unique index
    /// rejected it.
    pub(crate) fn from_write(err: surrealdb::Error, entity: &str) -> Self {
        if err.to_string().contains("already contains") {
            DbError::Duplicate {
                entity: entity.into(),
            }
        } else {
            DbError::Surreal(err)
        }
    }
}

impl From<DbError> for MaintabitError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => MaintabitError::NotFound { entity, id },
            DbError::Duplicate { entity } => MaintabitError::AlreadyExists { entity },
            other => MaintabitError::Database(other.to_string()),
        }
    }
}
