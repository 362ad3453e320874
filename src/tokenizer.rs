use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    // Runs of anything outside this class separate tokens; hyphens stay so
    // compound terms like "t-shirt" survive as one token.
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9-]+").expect("valid regex");
    // One suffix stripped per token, alternation order is priority.
    static ref SUFFIX_RE: Regex = Regex::new(r"(?:ing|ers|er|s)$").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        [
            // generic
            "a", "an", "and", "any", "are", "as", "at", "be", "but", "by", "for",
            "from", "has", "have", "i", "in", "is", "it", "me", "my", "new", "of",
            "on", "or", "some", "that", "the", "this", "to", "with",
            // query scaffolding, common in the query surface grammar
            "show", "find", "search", "looking", "want", "need", "get", "buy",
            "shop", "shopping", "please", "under", "over", "below", "above",
            "between", "than", "less", "more", "around", "about", "best", "top",
            "good", "great", "cheap", "expensive", "budget", "price", "priced",
            "review", "reviews", "rating", "ratings", "star", "stars",
            "item", "items", "product", "products",
        ]
        .iter()
        .copied()
        .collect()
    };
}

pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Create a tokenizer with a caller-supplied stop-word set
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        Self { stop_words }
    }

    /// Split lowercased text into raw tokens
    fn split(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Remove stop-words
    fn stopword_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t.as_str()))
            .collect()
    }

    /// Strip at most one known suffix from the end of a token
    fn stem(token: &str) -> String {
        SUFFIX_RE.replace(token, "").into_owned()
    }

    /// Full analysis pipeline: every surviving token, any length
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.split(text);
        let tokens = self.stopword_filter(tokens);
        tokens.iter().map(|t| Self::stem(t)).collect()
    }

    /// Keyword variant: stemmed length > 1, deduplicated in first-seen order
    pub fn keywords(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.analyze(text)
            .into_iter()
            .filter(|t| t.len() > 1)
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    /// Analyze and count term frequencies
    pub fn analyze_with_frequencies(&self, text: &str) -> HashMap<String, usize> {
        let mut frequencies = HashMap::new();
        for token in self.analyze(text) {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        frequencies
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
