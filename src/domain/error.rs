//! Error types for photodeck.
//!
//! This module defines the centralized error type [`PhotodeckError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with `thiserror`.

use thiserror::Error;

/// The main error type for photodeck operations.
///
/// Dispatching bulk actions is optimistic and does not surface request outcomes,
/// so most variants are produced by the service layer and only reach the caller
/// through the worker's outcome channel or through direct service use.
///
/// # Examples
///
/// ```
/// use photodeck::PhotodeckError;
///
/// fn validate_config() -> Result<(), PhotodeckError> {
///     Err(PhotodeckError::Config("server_address is empty".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum PhotodeckError {
    /// HTTP transport failure while talking to the photo server.
    ///
    /// Automatically converts from `reqwest::Error`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The photo server answered with a non-success status.
    #[error("Service error: {endpoint} returned {status}")]
    Service {
        /// Endpoint path relative to the API root.
        endpoint: String,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The background mutation worker is gone or could not be started.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Remove-from-album was dispatched on a user-album route without an album.
    #[error("no album context for route {route}")]
    MissingAlbumContext {
        /// Route the action was invoked on.
        route: String,
    },
}

/// A specialized `Result` type for photodeck operations.
pub type Result<T> = std::result::Result<T, PhotodeckError>;
