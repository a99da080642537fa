use std::collections::HashMap;
use std::collections::hash_map;

use crate::stopwords::StopwordSet;

/// Word to occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: HashMap<String, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: &str, count: u64) {
        if let Some(entry) = self.counts.get_mut(word) {
            *entry += count;
        } else {
            self.counts.insert(word.to_string(), count);
        }
    }

    /// Fold `other` into `self` by summing counts for shared words.
    pub fn merge(&mut self, other: FrequencyMap) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (word, count) in other.counts {
            *self.counts.entry(word).or_default() += count;
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, u64> {
        self.counts.iter()
    }
}

impl IntoIterator for FrequencyMap {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a> FromIterator<&'a str> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for word in iter {
            map.add(word, 1);
        }
        map
    }
}

/// Count every token not in `stopwords`. Pure; the unit of parallel work.
pub fn count_tokens<'a, I>(tokens: I, stopwords: &StopwordSet) -> FrequencyMap
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .filter(|word| !stopwords.contains(word))
        .collect()
}
