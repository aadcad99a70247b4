//! Error types for paper mortality analysis.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! The estimator itself is total and never returns an error; these types cover the
//! boundary (input validation) and the citation sources feeding it.

/// Errors from a citation source lookup.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// Failed to read a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source data was not valid JSON or had the wrong shape.
    #[error("Failed to parse source data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The source exists but could not answer right now.
    #[error("Source '{source_name}' unavailable: {message}")]
    Unavailable {
        /// Name of the failing source
        source_name: String,
        /// Reason reported by the source
        message: String,
    },
}

impl SourceError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable { source_name: source_name.into(), message: message.into() }
    }

    /// Returns true if retrying the same lookup might succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Io(_))
    }
}

/// Errors from analysing papers.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// Error from a citation source
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Input failed validation before reaching the estimator
    #[error("Invalid input: {field}: {message}")]
    InvalidInput {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Failed to serialize results
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), message: message.into() }
    }

    /// Returns true if this error came from caller-supplied input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Convert to a short message suitable for a CLI user.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::InvalidInput { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Source(SourceError::Unavailable { source_name, .. }) => {
                format!("Citation source '{source_name}' is unavailable. Try again later.")
            }
            Self::Source(SourceError::Io(e)) => format!("Could not read citation data: {e}"),
            Self::Source(SourceError::Parse(e)) => {
                format!("Citation data is not in the expected JSON shape: {e}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for source lookups.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
