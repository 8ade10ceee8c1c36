//! # Catalog Errors

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures of the layer catalog.
///
/// The messages carry database detail and are meant for the server log only.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Invalid layer identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Database connection failed: {0}")]
    Connect(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Unexpected result shape: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Whether the failure was caused by the caller's input rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(self, CatalogError::InvalidIdentifier(_))
    }
}

impl From<tokio_postgres::Error> for CatalogError {
    fn from(e: tokio_postgres::Error) -> Self {
        CatalogError::Query(describe_pg_error(&e))
    }
}

/// Render a driver error with the server's SQLSTATE and message.
///
/// The driver's own `Display` only says "db error" for server-side failures.
pub fn describe_pg_error(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => format_db_error(db.code().code(), db.message(), db.detail()),
        None => error_chain(e),
    }
}

fn format_db_error(sqlstate: &str, message: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{}: {} ({})", sqlstate, message, detail),
        None => format!("{}: {}", sqlstate, message),
    }
}

/// An error followed by each of its sources, joined with ": ".
pub(crate) fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
