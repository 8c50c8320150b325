//! Validation services

mod orchestrator;

pub use orchestrator::ImportValidator;

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors raised while setting up validation
#[derive(Error, Debug)]
pub enum ValidationServiceError {
    #[error("Import error: {0}")]
    Import(#[from] vmimport_types::ImportError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type for validation services
pub type ValidationServiceResult<T> = Result<T, ValidationServiceError>;
