//! Run configuration for the top-K pipeline.
//!
//! A `Config` is an explicit record handed to the entry point; nothing is
//! read from process-wide state. It can be built in code, loaded from a TOML
//! file and then overridden field by field (the CLI does this).
//!
//! ```toml
//! input = "data_300MB.txt"
//! stopwords = "stopword.txt"
//! k = 10
//! workers = 8
//! boundary = "byte_exact"
//!
//! [shards]
//! count = 16
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopKError};

/// Default shard size when sizing by bytes.
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000_000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_K: usize = 10;

/// How the input is cut into shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShardSpec {
    /// Exactly this many shards of `ceil(size / n)` bytes.
    Count(usize),
    /// Shards of this many bytes; `size / chunk + 1` of them.
    ChunkSize(u64),
}

impl Default for ShardSpec {
    fn default() -> Self {
        ShardSpec::ChunkSize(DEFAULT_CHUNK_SIZE)
    }
}

/// What a shard reader does with a word cut by a shard boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Read the planned byte range verbatim. A straddling word is counted as
    /// two fragments, one per neighbouring shard.
    #[default]
    ByteExact,
    /// Snap reads to word boundaries so every word is counted once.
    Whitespace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text file to rank
    pub input: PathBuf,
    /// Newline-delimited stopword list
    pub stopwords: PathBuf,
    /// Number of ranked entries to return
    pub k: usize,
    pub shards: ShardSpec,
    /// Size of the worker pool
    pub workers: usize,
    pub boundary: BoundaryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            stopwords: PathBuf::new(),
            k: DEFAULT_K,
            shards: ShardSpec::default(),
            workers: DEFAULT_WORKERS,
            boundary: BoundaryPolicy::default(),
        }
    }
}

impl Config {
    pub fn new(
        input: impl Into<PathBuf>,
        stopwords: impl Into<PathBuf>,
        k: usize,
        shard_count: usize,
        workers: usize,
    ) -> Self {
        Self {
            input: input.into(),
            stopwords: stopwords.into(),
            k,
            shards: ShardSpec::Count(shard_count),
            workers,
            boundary: BoundaryPolicy::ByteExact,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Load a TOML file; missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| TopKError::io(path, e))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Reject non-positive counts before any work is scheduled.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(TopKError::invalid("input path is empty"));
        }
        if self.stopwords.as_os_str().is_empty() {
            return Err(TopKError::invalid("stopword path is empty"));
        }
        if self.k < 1 {
            return Err(TopKError::invalid("k must be at least 1"));
        }
        if self.workers < 1 {
            return Err(TopKError::invalid("worker count must be at least 1"));
        }
        match self.shards {
            ShardSpec::Count(0) => Err(TopKError::invalid("shard count must be at least 1")),
            ShardSpec::ChunkSize(0) => Err(TopKError::invalid("chunk size must be at least 1")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.k, 10);
        assert_eq!(cfg.shards, ShardSpec::ChunkSize(10_000_000));
        assert_eq!(cfg.boundary, BoundaryPolicy::ByteExact);
    }

    #[test]
    fn test_from_toml_partial() {
        let cfg = Config::from_toml_str(
            r#"
            input = "big.txt"
            stopwords = "stop.txt"
            k = 3
            boundary = "whitespace"

            [shards]
            count = 16
            "#,
        )
        .unwrap();
        assert_eq!(cfg.input, PathBuf::from("big.txt"));
        assert_eq!(cfg.k, 3);
        assert_eq!(cfg.shards, ShardSpec::Count(16));
        assert_eq!(cfg.workers, DEFAULT_WORKERS);
        assert_eq!(cfg.boundary, BoundaryPolicy::Whitespace);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = Config::from_toml_str("k = \"ten\"").unwrap_err();
        assert!(matches!(err, TopKError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let base = Config::new("in.txt", "stop.txt", 1, 1, 1);
        base.validate().unwrap();

        for cfg in [
            Config { k: 0, ..base.clone() },
            Config { workers: 0, ..base.clone() },
            Config { shards: ShardSpec::Count(0), ..base.clone() },
            Config { shards: ShardSpec::ChunkSize(0), ..base.clone() },
            Config { input: PathBuf::new(), ..base.clone() },
        ] {
            let err = cfg.validate().unwrap_err();
            assert!(matches!(err, TopKError::InvalidArgument(_)), "{cfg:?}");
        }
    }
}
