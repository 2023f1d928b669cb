//! Errors raised by repositories and row mappers.

use thiserror::Error;

/// A stored value could not be read into its declared field type.
#[derive(Error, Debug)]
pub enum TypeConversionError {
    #[error("column '{column}' is missing from the result row")]
    MissingColumn { column: String },

    #[error("column '{column}' could not be converted: {source}")]
    Decode {
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    TypeConversion(#[from] TypeConversionError),

    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other) =>
            {
                RepositoryError::ConstraintViolation(db_err.message().to_string())
            }
            _ => RepositoryError::Database(err),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
