/*!
 * Error types for the scenescript application.
 *
 * The screenplay parser itself never fails. These types cover the layers
 * around it: rebuilding a scene list from its serialized shape, parser
 * configuration, and the application workflow.
 */

use thiserror::Error;

/// Errors that can occur when building or rebuilding a scene list
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// The serialized scene list does not start with the metadata entry
    #[error("Scene list must start with a metadata entry")]
    MissingMetadata,

    /// A metadata entry was found after the first position
    #[error("Unexpected metadata entry at position {index}")]
    UnexpectedMetadata {
        /// Position of the offending entry in the list
        index: usize,
    },

    /// A configured speaker name cannot be used for matching
    #[error("Invalid speaker name: '{0}'")]
    InvalidSpeaker(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from scene list handling
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error while reading or writing JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
