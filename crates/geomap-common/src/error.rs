//! Error types for Geomap
//!
//! `GeomapError` is the failure taxonomy of the service facade. Its `Display`
//! output is exactly the message placed in a failed response envelope, so the
//! store detail carried by `StoreFailure` is never part of it.

/// Failure outcomes of an object operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeomapError {
    /// One or more request fields failed validation; all messages are kept in order
    #[error("invalid data: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("invalid WKT format: {0}")]
    MalformedGeometry(String),

    #[error("not found")]
    NotFound,

    /// Store-level failure; the detail is for logs only
    #[error("database error")]
    StoreFailure(String),

    /// Request could not be decoded (bad JSON body, non-integer id)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GeomapError {
    /// Wrap any store error, keeping its full chain for logging
    pub fn store(err: impl std::fmt::Display) -> Self {
        GeomapError::StoreFailure(format!("{:#}", err))
    }

    /// Short stable name of the variant, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            GeomapError::Validation(_) => "validation",
            GeomapError::MalformedGeometry(_) => "malformed_geometry",
            GeomapError::NotFound => "not_found",
            GeomapError::StoreFailure(_) => "store_failure",
            GeomapError::InvalidRequest(_) => "invalid_request",
        }
    }
}
