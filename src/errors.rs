/*!
 * Error types for the stagehand application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when loading or rebuilding the interchange format
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Error when the interchange document is not valid JSON
    #[error("Failed to parse interchange JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when the interchange document has the wrong shape
    #[error("Malformed interchange document: {0}")]
    Malformed(String),

    /// Error when a map key cannot be converted back to numeric form
    #[error("Invalid {context} key in interchange document: {key}")]
    InvalidKey {
        /// Which nesting level the key belongs to
        context: &'static str,
        /// The offending key text
        key: String,
    },
}

/// Errors that can occur during dialogue extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Error when the requested act does not exist in the play
    #[error("Act {0} not found in the play")]
    ActNotFound(u32),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from script parsing or the interchange format
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from dialogue extraction
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
