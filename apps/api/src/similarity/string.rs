//! Lightweight similarity for short texts such as project titles, where a full
//! TF-IDF pass over the batch would be overkill.

use std::collections::HashMap;

use crate::text::StopWords;

/// Default number of shared content tokens that marks two texts as the same.
pub const DEFAULT_SHARED_TOKEN_THRESHOLD: usize = 8;

/// Sørensen–Dice coefficient over character bigrams.
///
/// Comparison is case-insensitive and ignores whitespace. Identical inputs score
/// 1; an input with fewer than two characters cannot form a bigram and scores 0
/// against anything it is not equal to.
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a);
    let b: Vec<char> = normalize(b);

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                intersection += 1;
            }
        }
    }

    (2 * intersection) as f64 / (a.len() + b.len() - 2) as f64
}

fn normalize(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Dice similarity with a shared-vocabulary override: texts that share at
/// least `threshold` distinct non-stopword tokens are treated as identical,
/// whatever their word order.
#[derive(Debug, Clone)]
pub struct StringSimilarity {
    threshold: usize,
    stopwords: StopWords,
}

impl StringSimilarity {
    pub fn new(threshold: usize, stopwords: StopWords) -> Self {
        Self {
            threshold,
            stopwords,
        }
    }

    /// Similarity in `[0, 1]`.
    pub fn compare(&self, a: &str, b: &str) -> f64 {
        if self.shared_tokens(a, b) >= self.threshold {
            return 1.0;
        }
        dice_coefficient(a, b)
    }

    /// Number of distinct non-stopword tokens present in both texts.
    pub fn shared_tokens(&self, a: &str, b: &str) -> usize {
        let tokens_a = self.stopwords.content_tokens(a);
        if tokens_a.is_empty() {
            return 0;
        }
        let tokens_b = self.stopwords.content_tokens(b);
        tokens_a.intersection(&tokens_b).count()
    }
}

impl Default for StringSimilarity {
    fn default() -> Self {
        Self::new(DEFAULT_SHARED_TOKEN_THRESHOLD, StopWords::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(dice_coefficient("Inventory Tracker", "Inventory Tracker"), 1.0);
    }

    #[test]
    fn test_dice_ignores_case_and_whitespace() {
        assert_eq!(dice_coefficient("Chess Bot", "chessbot"), 1.0);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(dice_coefficient("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_short_strings_score_zero() {
        assert_eq!(dice_coefficient("a", "ab"), 0.0);
        assert_eq!(dice_coefficient("", "abc"), 0.0);
    }

    #[test]
    fn test_two_empty_strings_are_equal() {
        assert_eq!(dice_coefficient("", ""), 1.0);
    }

    #[test]
    fn test_dice_known_value() {
        // night: ni ig gh ht; nacht: na ac ch ht → 1 shared of 8 bigrams
        let sim = dice_coefficient("night", "nacht");
        assert!((sim - 0.25).abs() < 1e-12, "sim was {sim}");
    }

    #[test]
    fn test_dice_counts_repeated_bigrams_once_each() {
        // aa aa vs aa: one match, (2*1)/(3+2-2)
        let sim = dice_coefficient("aaa", "aa");
        assert!((sim - 2.0 / 3.0).abs() < 1e-12, "sim was {sim}");
    }

    #[test]
    fn test_dice_is_symmetric() {
        let a = "Distributed cache in Rust";
        let b = "Rust key-value store";
        assert_eq!(dice_coefficient(a, b), dice_coefficient(b, a));
    }

    #[test]
    fn test_shared_token_override_forces_one() {
        let sim = StringSimilarity::new(3, StopWords::default());
        let a = "realtime chat server websocket";
        let b = "websocket server for realtime chat, shipped to students";
        assert!(dice_coefficient(a, b) < 1.0);
        assert_eq!(sim.compare(a, b), 1.0);
    }

    #[test]
    fn test_override_ignores_stopwords() {
        let sim = StringSimilarity::new(2, StopWords::default());
        // only "the" and "of" in common
        assert!(sim.compare("the art of war", "the theory of games") < 1.0);
        assert_eq!(sim.shared_tokens("the art of war", "the theory of games"), 0);
    }

    #[test]
    fn test_default_threshold_needs_eight_tokens() {
        let sim = StringSimilarity::default();
        let words = "alpha beta gamma delta epsilon zeta eta theta";
        let shuffled = "theta eta zeta epsilon delta gamma beta alpha";
        assert_eq!(sim.shared_tokens(words, shuffled), 8);
        assert_eq!(sim.compare(words, shuffled), 1.0);

        let seven = "alpha beta gamma delta epsilon zeta eta";
        assert!(sim.compare(seven, "eta zeta epsilon delta gamma beta alpha") < 1.0);
    }
}
