use std::path::PathBuf;

/// Result type alias for hauntfs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hauntfs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A name that the cache does not track
    #[error("no cache entry is tracked under '{name}'")]
    NotTracked { name: String },
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create an error for a name the cache does not track
    #[must_use]
    pub fn not_tracked(name: impl Into<String>) -> Self {
        Error::NotTracked { name: name.into() }
    }

    /// Whether the error means the underlying file no longer exists
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::FileSystem { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Error::NotTracked { .. } => true,
            _ => false,
        }
    }
}
