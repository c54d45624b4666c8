use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a failed store operation.
///
/// Callers can tell a missing row from a rejected write from a broken
/// database, which a plain success flag cannot express.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error("Storage error: {0}")]
    Storage(DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::ConstraintViolation(format!("unique: {msg}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Self::ConstraintViolation(format!("foreign key: {msg}"))
            }
            _ => Self::Storage(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_db_errors_are_storage_errors() {
        let err: StoreError = DbErr::Custom("disk on fire".to_string()).into();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = StoreError::not_found("User", 9);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "User 9 not found");
    }
}
