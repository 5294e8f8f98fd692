use std::fmt;

use thiserror::Error;

/// External registry a reference is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Customer,
    Vehicle,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Customer => f.write_str("customer"),
            Reference::Vehicle => f.write_str("vehicle"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("field '{0}' is missing")]
    MissingField(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} not found")]
    ReferenceNotFound(Reference),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Client-side failures are answered as-is; everything else is a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingField(_)
                | ServiceError::Validation(_)
                | ServiceError::ReferenceNotFound(_)
                | ServiceError::NotFound(_)
        )
    }
}
