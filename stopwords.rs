use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TopKError};

/// Words excluded from counting. Built once, then shared read-only by every
/// worker.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a newline-delimited word list. Trailing whitespace is stripped
    /// and entries are lowercased so they compare against lowercased tokens.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TopKError::io(path, e))?;
        let mut words = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| TopKError::io(path, e))?;
            let word = line.trim_end();
            if !word.is_empty() {
                words.insert(word.to_lowercase());
            }
        }
        debug!(path = %path.display(), count = words.len(), "stopwords loaded");
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_strips_trailing_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "the\non  \r\nand\t\nthe\n").unwrap();

        let set = StopwordSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(set.contains("on"));
        assert!(set.contains("and"));
        assert!(!set.contains("on  "));
    }

    #[test]
    fn test_empty_file_is_valid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let set = StopwordSet::load(file.path()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StopwordSet::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, TopKError::Io { .. }));
    }

    #[test]
    fn test_uppercase_entries_are_folded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "The").unwrap();
        let set = StopwordSet::load(file.path()).unwrap();
        assert!(set.contains("the"));
    }
}
