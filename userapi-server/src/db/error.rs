//! Store error classification

use sqlx::error::DatabaseError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store rejected a write because of a unique constraint (SQLSTATE 23505)
    #[error("unique violation: {message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    /// Message text reported by the store, suitable for diagnostics in responses.
    pub fn store_message(&self) -> String {
        match self {
            Self::UniqueViolation { message, .. } => message.clone(),
            Self::NotFound { .. } => self.to_string(),
            Self::Sqlx(sqlx::Error::Database(e)) => e.message().to_owned(),
            Self::Sqlx(e) => e.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => unique_violation(db.as_ref()),
            other => Self::Sqlx(other),
        }
    }
}

fn unique_violation(db: &dyn DatabaseError) -> DbError {
    DbError::UniqueViolation {
        constraint: db.constraint().map(str::to_owned),
        message: db.message().to_owned(),
    }
}
