use domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when reading or writing aggregates.
///
/// A failed write never leaves part of an aggregate behind.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row matches the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A row with the same id is already stored.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// The aggregate violates a domain invariant.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A stored row cannot be turned back into a domain object.
    #[error("Invalid {entity} row {id}: {reason}")]
    InvalidRow {
        entity: &'static str,
        id: String,
        reason: String,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn already_exists(entity: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }

    /// Maps a unique-key violation to `AlreadyExists`, anything else to `Database`.
    pub(crate) fn on_insert(error: sqlx::Error, entity: &'static str, id: impl ToString) -> Self {
        if let sqlx::Error::Database(ref db_err) = error
            && db_err.is_unique_violation()
        {
            return Self::already_exists(entity, id);
        }
        Self::Database(error)
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
