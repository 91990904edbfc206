use thiserror::Error;

/// Failure of the persistence collaborator. Repositories produce it, the
/// clinic service passes it through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataAccessError {
    #[error("database error: {0}")]
    Db(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("integrity violation: {0}")]
    Integrity(String),
}

impl DataAccessError {
    pub fn not_found(entity: &str, id: i32) -> Self { Self::NotFound(format!("{} {}", entity, id)) }
}

impl From<models::errors::ModelError> for DataAccessError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => DataAccessError::Integrity(msg),
            models::errors::ModelError::NotFound(what) => DataAccessError::NotFound(what),
            models::errors::ModelError::Db(msg) => DataAccessError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for DataAccessError {
    fn from(e: sea_orm::DbErr) -> Self { DataAccessError::Db(e.to_string()) }
}
