// crates/geofinder-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the crate.
///
/// Match outcomes ("nothing found", "country not supported", ...) are never
/// errors; they are [`Classification`](crate::Classification) values on the
/// returned query. An `Err` means a collaborator failed: the dataset could not
/// be read, or the gazetteer query interface reported a failure.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The gazetteer query interface failed. The in-progress resolution is aborted.
    #[error("Gazetteer query failed: {0}")]
    Gazetteer(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
