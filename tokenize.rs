use encoding_rs::UTF_8;
use once_cell::sync::Lazy;
use regex::{Matches, Regex};
use tracing::warn;

// Compile once; a word is a maximal run of letters, digits or underscore.
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Lowercased text of one shard, ready to be tokenized.
#[derive(Debug, Clone, Default)]
pub struct ShardText {
    text: String,
}

impl ShardText {
    /// Decode raw shard bytes. Invalid UTF-8 (e.g. a character cut by a
    /// byte-exact boundary) is replaced and acts as a separator.
    pub fn decode(bytes: &[u8]) -> Self {
        let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
        if had_errors {
            warn!(len = bytes.len(), "invalid UTF-8 replaced in shard");
        }
        Self::new(&text)
    }

    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lazy token stream; call again to restart from the beginning.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            inner: WORD_REGEX.find_iter(&self.text),
        }
    }
}

pub struct Tokens<'a> {
    inner: Matches<'static, 'a>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|m| m.as_str())
    }
}
