use thiserror::Error;

/// Every way a catalog call can fail. Callers treat these as data: the
/// display string is what ends up in a list store's `last_error`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog API token is not configured")]
    MissingToken,

    #[error("Request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("Catalog returned {status} for {path}: {message}")]
    Status { path: String, status: u16, message: String },

    #[error("Could not decode catalog response for {path}: {message}")]
    Decode { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
