use models::validation::ValidationErrors;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("not found: {0}")]
    NotFound(String),
    /// The row changed under an update and still exists. Never retried.
    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),
    #[error("no member selected")]
    MissingSelection,
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn db(e: DbErr) -> Self { Self::Db(e.to_string()) }

    /// Single-field validation failure.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self { Self::Validation(errors) }
}
