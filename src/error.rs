use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarbandError {
    #[error("invalid budget: max points must be non-negative, got {0}")]
    InvalidBudget(i64),

    #[error("invalid unit '{name}': {reason}")]
    InvalidUnit { name: String, reason: String },

    #[error("unable to read '{path}': {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse '{path}': {message}")]
    CatalogParse { path: String, message: String },

    #[error("unsupported catalog format for '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedCatalogFormat(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WarbandError>;
