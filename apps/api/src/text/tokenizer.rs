//! Word tokenizer and stopword filtering shared by the vectorizer and the
//! string-similarity primitive.

use std::collections::HashSet;

/// Articles, prepositions, conjunctions, pronouns and auxiliary verbs that carry
/// no signal when comparing short project texts.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "of", "in", "on", "at", "to",
    "for", "from", "by", "with", "into", "onto", "over", "under", "about", "as", "via", "per",
    "than", "then", "this", "that", "these", "those", "it", "its", "i", "we", "our", "my", "me",
    "you", "your", "he", "she", "they", "their", "them", "is", "are", "was", "were", "be",
    "been", "being", "am", "has", "have", "had", "do", "does", "did", "will", "would", "can",
    "could", "should", "may", "might", "must", "shall", "not", "no", "all", "also", "using",
    "used", "use",
];

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric or `_` characters; everything else
/// separates. The iterator is lazy: nothing is allocated until a token is pulled.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Characters that make up a token: alphanumerics and `_`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// An immutable stopword set. Lookups expect already-lowercased tokens.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Distinct tokens of `text` that are not stopwords.
    pub fn content_tokens(&self, text: &str) -> HashSet<String> {
        tokenize(text).filter(|t| !self.contains(t)).collect()
    }

    /// Drops stopwords and tokens shorter than `min_len` characters, re-joining
    /// the survivors with single spaces. Generic verbs and glue words otherwise
    /// dominate bigram overlap on longer project descriptions.
    pub fn distill(&self, text: &str, min_len: usize) -> String {
        tokenize(text)
            .filter(|t| t.chars().count() >= min_len && !self.contains(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_on_punctuation() {
        let tokens: Vec<String> = tokenize("Built a React/Node app, shipped v2!").collect();
        assert_eq!(tokens, vec!["built", "a", "react", "node", "app", "shipped", "v2"]);
    }

    #[test]
    fn test_tokenize_keeps_underscores_and_digits() {
        let tokens: Vec<String> = tokenize("snake_case 2024").collect();
        assert_eq!(tokens, vec!["snake_case", "2024"]);
    }

    #[test]
    fn test_tokenize_empty_text_yields_nothing() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("  -- !! ").count(), 0);
    }

    #[test]
    fn test_tokenize_handles_unicode_letters() {
        let tokens: Vec<String> = tokenize("Café Überweisung").collect();
        assert_eq!(tokens, vec!["café", "überweisung"]);
    }

    #[test]
    fn test_stopwords_are_case_folded_on_construction() {
        let stop = StopWords::new(["The", " AND "]);
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
        assert!(!stop.contains("The"));
    }

    #[test]
    fn test_content_tokens_are_distinct_and_filtered() {
        let stop = StopWords::default();
        let tokens = stop.content_tokens("The parser and the lexer for the parser");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("parser"));
        assert!(tokens.contains("lexer"));
    }

    #[test]
    fn test_distill_removes_stopwords_and_short_tokens() {
        let stop = StopWords::default();
        let distilled = stop.distill("I built an ML pipeline in Go for the team", 3);
        assert_eq!(distilled, "built pipeline team");
    }
}
