use tracing::debug;

use crate::counter::FrequencyMap;

/// Owns the global frequency map and folds partial results into it one at a
/// time, in whatever order they complete.
#[derive(Debug, Default)]
pub struct Merger {
    global: FrequencyMap,
    merged: usize,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, shard: usize, partial: FrequencyMap) {
        debug!(shard, words = partial.len(), "merging shard");
        self.global.merge(partial);
        self.merged += 1;
    }

    /// Number of partial maps folded so far.
    pub fn merged(&self) -> usize {
        self.merged
    }

    pub fn finish(self) -> FrequencyMap {
        self.global
    }
}

/// Merge a batch of partial maps.
pub fn merge_all<I>(partials: I) -> FrequencyMap
where
    I: IntoIterator<Item = FrequencyMap>,
{
    let mut merger = Merger::new();
    for (i, partial) in partials.into_iter().enumerate() {
        merger.fold(i, partial);
    }
    merger.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn partials() -> Vec<FrequencyMap> {
        vec![
            ["a", "b", "a"].into_iter().collect(),
            ["b", "c"].into_iter().collect(),
            FrequencyMap::new(),
            ["c", "c", "d", "a"].into_iter().collect(),
        ]
    }

    #[test]
    fn test_merge_is_order_independent() {
        let expected = merge_all(partials());
        for order in (0..4).permutations(4) {
            let parts = partials();
            let shuffled = order.iter().map(|&i| parts[i].clone());
            assert_eq!(merge_all(shuffled), expected, "order {order:?}");
        }
    }

    #[test]
    fn test_merge_is_lossless() {
        let merged = merge_all(partials());
        let sum: u64 = partials().iter().map(FrequencyMap::total).sum();
        assert_eq!(merged.total(), sum);
        assert_eq!(merged.get("a"), 3);
        assert_eq!(merged.get("c"), 3);
        assert_eq!(merged.get("d"), 1);
    }

    #[test]
    fn test_merger_counts_folds() {
        let mut merger = Merger::new();
        for (i, p) in partials().into_iter().enumerate() {
            merger.fold(i, p);
        }
        assert_eq!(merger.merged(), 4);
        assert_eq!(merger.finish().len(), 4);
    }
}
