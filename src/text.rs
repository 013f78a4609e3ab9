//! Word-frequency analysis over the message corpus.
//!
//! The word-cloud renderer lives outside this crate; what it needs from the
//! core is the corpus (see `aggregate::word_frequency_corpus`) and, for
//! text-only frontends, the ranked word counts produced here.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use stop_words::{get, LANGUAGE};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, TabulationError};

/// Tokenizer and word counter for Portuguese customer messages
pub struct CorpusAnalyzer {
    url_regex: Regex,
    non_word_regex: Regex,
    stopwords: HashSet<String>,
}

impl CorpusAnalyzer {
    /// Create a new analyzer with Portuguese stop words
    pub fn new() -> Result<Self> {
        let url_regex = Regex::new(r"https?://\S+|www\.\S+")
            .map_err(|e| TabulationError::Other(format!("Failed to compile URL regex: {e}")))?;
        let non_word_regex = Regex::new(r"[^\w\s]")
            .map_err(|e| TabulationError::Other(format!("Failed to compile word regex: {e}")))?;

        let stopwords: HashSet<String> = get(LANGUAGE::Portuguese)
            .iter()
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            url_regex,
            non_word_regex,
            stopwords,
        })
    }

    /// Normalize and split a corpus into lowercase tokens, dropping URLs,
    /// punctuation and stop words
    #[must_use]
    pub fn tokenize(&self, corpus: &str) -> Vec<String> {
        let normalized = corpus.nfc().collect::<String>().to_lowercase();
        let no_urls = self.url_regex.replace_all(&normalized, " ");
        let words_only = self.non_word_regex.replace_all(&no_urls, " ");

        words_only
            .split_whitespace()
            .filter(|token| token.chars().count() > 1 && !self.stopwords.contains(*token))
            .map(ToString::to_string)
            .collect()
    }

    /// Rank the most frequent words in a corpus.
    ///
    /// Returns at most `limit` `(word, count)` pairs, most frequent first;
    /// equal counts are ordered alphabetically so the output is stable.
    #[must_use]
    pub fn word_frequencies(&self, corpus: &str, limit: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in self.tokenize(corpus) {
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}
