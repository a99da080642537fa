use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::Config;
use crate::counter::{FrequencyMap, count_tokens};
use crate::error::{Result, TopKError};
use crate::merge::Merger;
use crate::pool::WorkerPool;
use crate::shard::{ShardReader, plan_for};
use crate::stopwords::StopwordSet;
use crate::tokenize::ShardText;
use crate::topk::{RankedEntry, select_top_k};

/// Shard, count and merge the input; the merged map is not yet filtered or
/// ranked.
pub fn compute_frequencies(config: &Config) -> Result<FrequencyMap> {
    config.validate()?;
    let stopwords = Arc::new(StopwordSet::load(&config.stopwords)?);
    let size = input_size(&config.input)?;

    let shards = plan_for(size, config.shards)?;
    debug!(size, shards = shards.len(), boundary = ?config.boundary, "planned shards");

    let reader = ShardReader::new(&config.input, size, config.boundary);
    let pool = WorkerPool::new(config.workers)?;

    let start = Instant::now();
    let mut merger = Merger::new();
    pool.dispatch(
        shards,
        move |shard| {
            let bytes = reader.read(shard)?;
            let text = ShardText::decode(&bytes);
            Ok::<_, io::Error>(count_tokens(text.tokens(), &stopwords))
        },
        |index, partial| merger.fold(index, partial),
    )?;

    let shards_merged = merger.merged();
    let freqs = merger.finish();
    info!(
        shards = shards_merged,
        distinct = freqs.len(),
        tokens = freqs.total(),
        elapsed = ?start.elapsed(),
        "counting finished"
    );
    Ok(freqs)
}

/// Rank the `config.k` most frequent alphabetic words of `config.input`.
pub fn compute_top_k(config: &Config) -> Result<Vec<RankedEntry>> {
    let freqs = compute_frequencies(config)?;
    select_top_k(freqs, config.k)
}

/// Positional form of [`compute_top_k`] with byte-exact boundaries.
pub fn top_k_words(
    input: impl AsRef<Path>,
    stopwords: impl AsRef<Path>,
    k: usize,
    shard_count: usize,
    workers: usize,
) -> Result<Vec<RankedEntry>> {
    let config = Config::new(input.as_ref(), stopwords.as_ref(), k, shard_count, workers);
    compute_top_k(&config)
}

fn input_size(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(|e| TopKError::io(path, e))?;
    let meta = file.metadata().map_err(|e| TopKError::io(path, e))?;
    if !meta.is_file() {
        return Err(TopKError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok(meta.len())
}
