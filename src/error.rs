use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product with ID {0} not found")]
    NotFound(u32),

    #[error("database error: {0}")]
    Database(String),
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        RepositoryError::Database(err.to_string())
    }
}

/// Reasons a product identifier could not be taken from a request path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid product ID")]
    Missing,

    #[error("Invalid product ID format")]
    Format,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("failed to load seed file {path}: {reason}")]
    Seed { path: String, reason: String },
}
