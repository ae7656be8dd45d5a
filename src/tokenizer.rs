use std::collections::BTreeSet;

/// Split text into words on spaces. Runs of spaces never yield empty words.
pub fn split_into_words(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whitespace tokenizer with a configurable stop-word set.
///
/// Words are case-sensitive and never stemmed: `"The"` and `"the"` are
/// distinct terms.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: BTreeSet<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with the space-separated stop words in `text`
    pub fn with_stop_words(text: &str) -> Self {
        let mut tokenizer = Self::new();
        tokenizer.set_stop_words(text);
        tokenizer
    }

    /// Add every word of `text` to the stop-word set
    pub fn set_stop_words(&mut self, text: &str) {
        self.stop_words.extend(split_into_words(text));
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Remove stop words, keeping the order of the rest
    pub fn remove_stop_words(&self, words: Vec<String>) -> Vec<String> {
        words
            .into_iter()
            .filter(|word| !self.is_stop_word(word))
            .collect()
    }

    /// Full analysis pipeline: split, then drop stop words
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.remove_stop_words(split_into_words(text))
    }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.stop_words.iter().map(String::as_str)
    }
}
