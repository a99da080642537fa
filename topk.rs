use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::counter::FrequencyMap;
use crate::error::{Result, TopKError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Count descending, then word ascending.
fn rank_order(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}

fn is_alphabetic(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// The `k` most frequent alphabetic-only words. Returns fewer than `k`
/// entries when fewer words qualify.
pub fn select_top_k(freqs: FrequencyMap, k: usize) -> Result<Vec<RankedEntry>> {
    if k < 1 {
        return Err(TopKError::invalid("k must be at least 1"));
    }
    Ok(freqs
        .into_iter()
        .filter(|(word, _)| is_alphabetic(word))
        .map(|(word, count)| RankedEntry { word, count })
        .k_smallest_by(k, rank_order)
        .collect())
}
