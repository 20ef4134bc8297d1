//! Error types for the dominant_colors library

use thiserror::Error;

/// Result type alias for dominant_colors operations
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Error taxonomy for color extraction
///
/// An image with no qualifying pixels is not an error; it yields an empty
/// color list.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Input could not be interpreted as a raster image
    #[error("Failed to decode image: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Extraction parameter outside its valid range
    #[error("Invalid argument: {parameter} = {value}")]
    InvalidArgument { parameter: String, value: String },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Background extraction task panicked or was cancelled
    #[error("Extraction task failed: {message}")]
    TaskFailed { message: String },
}

impl ExtractionError {
    /// Create a decode error with its underlying cause
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error that has no underlying cause
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid argument error naming the offending parameter
    pub fn invalid_argument(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::DecodeError { .. } => {
                "Could not read the image. Please check the file format and try again.".to_string()
            }
            ExtractionError::InvalidArgument { parameter, .. } => {
                format!("The extraction setting '{}' is not valid.", parameter)
            }
            ExtractionError::ConfigError { .. } => {
                "Could not load the extraction settings.".to_string()
            }
            ExtractionError::TaskFailed { .. } => {
                "Color extraction was interrupted. Please try again.".to_string()
            }
        }
    }
}
