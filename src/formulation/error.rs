//! Formulation errors

use thiserror::Error;

use crate::db::DbError;

#[derive(Debug, Error)]
pub enum RationError {
    /// Caller-correctable request problem
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Ingredient or standard id that does not resolve for the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catalog backend failure, passed through untouched
    #[error(transparent)]
    Catalog(#[from] DbError),
}

impl RationError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, RationError::InvalidInput(_) | RationError::NotFound(_))
    }
}

pub type FormulationResult<T> = Result<T, RationError>;
