//! Error handling for maftile

use thiserror::Error;

/// Errors raised by the alignment model, the tiler and the range reader
#[derive(Error, Debug)]
pub enum MafError {
    #[error("Range error: {message}")]
    Range { message: String },

    #[error("Inconsistent alignment block: {message}")]
    Consistency { message: String },

    #[error("Invalid FASTA format: {message}")]
    Format { message: String },

    #[error("Unsupported operation: {message}")]
    UnsupportedOperation { message: String },

    #[error("Unhandled reference data source: {message}")]
    UnhandledSource { message: String },

    #[error("Missing sequence row: {message}")]
    MissingRow { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MafError {
    pub fn range<S: Into<String>>(message: S) -> Self {
        Self::Range { message: message.into() }
    }

    pub fn consistency<S: Into<String>>(message: S) -> Self {
        Self::Consistency { message: message.into() }
    }

    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format { message: message.into() }
    }

    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedOperation { message: message.into() }
    }

    pub fn unhandled_source<S: Into<String>>(message: S) -> Self {
        Self::UnhandledSource { message: message.into() }
    }

    pub fn missing_row<S: Into<String>>(message: S) -> Self {
        Self::MissingRow { message: message.into() }
    }
}

/// Result type for maftile operations
pub type MafResult<T> = Result<T, MafError>;
