//! Parallel sharded top-K word counting.
//!
//! The input file is cut into byte-range shards, each shard is tokenized and
//! counted on a bounded worker pool, partial counts are merged on the calling
//! thread and the merged map is ranked.
//!
//! ```no_run
//! use topk_words::{Config, compute_top_k};
//!
//! let config = Config::new("data.txt", "stopword.txt", 10, 16, 4);
//! for entry in compute_top_k(&config)? {
//!     println!("{}, {}", entry.word, entry.count);
//! }
//! # Ok::<(), topk_words::TopKError>(())
//! ```

pub mod config;
pub mod counter;
pub mod error;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod pool;
pub mod shard;
pub mod stopwords;
pub mod tokenize;
pub mod topk;

pub use config::{BoundaryPolicy, Config, ShardSpec};
pub use counter::FrequencyMap;
pub use error::{Result, TopKError};
pub use pipeline::{compute_frequencies, compute_top_k, top_k_words};
pub use stopwords::StopwordSet;
pub use topk::RankedEntry;
