use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the counting pipeline.
#[derive(Error, Debug)]
pub enum TopKError {
    /// Input or stopword file missing or unreadable
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rejected before any work was scheduled
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A shard task failed; the whole run is aborted
    #[error("Worker failed on shard {shard}: {reason}")]
    Pool { shard: usize, reason: String },

    /// The worker pool could not be started
    #[error("Worker pool setup failed: {0}")]
    PoolSetup(String),

    /// Malformed configuration file
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TopKError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TopKError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TopKError::InvalidArgument(msg.into())
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, TopKError>;

impl From<toml::de::Error> for TopKError {
    fn from(e: toml::de::Error) -> Self {
        TopKError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TopKError::InvalidArgument("k must be at least 1".to_string());
        assert_eq!(err.to_string(), "Invalid argument: k must be at least 1");

        let err = TopKError::Pool {
            shard: 3,
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Worker failed on shard 3: boom");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = TopKError::io("/tmp/missing.txt", io_err);
        assert!(err.to_string().contains("/tmp/missing.txt"));
        assert!(matches!(err, TopKError::Io { .. }));
    }
}
