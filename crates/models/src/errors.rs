use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify a driver error by the constraint it tripped, if any.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::UniqueViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => ModelError::ForeignKeyViolation(msg),
            _ => ModelError::Db(err.to_string()),
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        Self::from_db(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_without_sql_state_stay_generic() {
        let err = ModelError::from_db(DbErr::Custom("boom".into()));
        assert!(matches!(err, ModelError::Db(msg) if msg.contains("boom")));

        let err = ModelError::from_db(DbErr::RecordNotFound("company".into()));
        assert!(matches!(err, ModelError::Db(_)));
    }
}
