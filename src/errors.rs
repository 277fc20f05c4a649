// src/errors.rs
// DOCUMENTATION: Custom error types
// PURPOSE: Centralized error handling for entire application

use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Configuration and export errors are fatal; API errors abort the
/// current query but leave already-gathered results usable.
#[derive(Error, Debug)]
pub enum ProspectorError {
    #[error("GOOGLE_MAPS_API_KEY is not configured")]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Failed to write spreadsheet {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: csv::Error,
    },
}
