//! TF-IDF vectorizer: turns one batch of documents into dense vectors over a
//! vocabulary built from exactly that batch.
//!
//! Nothing is cached between calls: two batches never share a vocabulary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::tokenizer::tokenize;

/// A piece of text to compare, tagged for result correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// term → weight for a single document.
pub type TermWeightMap = HashMap<String, f64>;

/// Inverse-document-frequency formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfScheme {
    /// `1 + ln(N / (1 + df))`, the formula of common TF-IDF libraries.
    Classic,
    /// `ln(1 + N / df)`; never zero or negative, softer on common terms.
    #[default]
    Smoothed,
}

impl IdfScheme {
    pub fn idf(self, n_docs: usize, doc_freq: usize) -> f64 {
        let n = n_docs as f64;
        let df = doc_freq as f64;
        match self {
            IdfScheme::Classic => 1.0 + (n / (1.0 + df)).ln(),
            IdfScheme::Smoothed => (1.0 + n / df).ln(),
        }
    }
}

impl std::str::FromStr for IdfScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(IdfScheme::Classic),
            "smoothed" => Ok(IdfScheme::Smoothed),
            other => Err(format!("unknown idf scheme '{other}' (expected 'classic' or 'smoothed')")),
        }
    }
}

/// Output of one vectorization pass. Every vector has `vocabulary.len()` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vectorized {
    pub vocabulary: Vec<String>,
    pub vectors: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextVectorizer {
    scheme: IdfScheme,
}

impl TextVectorizer {
    pub fn new(scheme: IdfScheme) -> Self {
        Self { scheme }
    }

    /// Vectorizes a batch. Vocabulary order is first-seen across the batch.
    pub fn vectorize<D: AsRef<str>>(&self, documents: &[D]) -> Vectorized {
        if documents.is_empty() {
            return Vectorized {
                vocabulary: Vec::new(),
                vectors: Vec::new(),
            };
        }

        let mut vocabulary: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut term_counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                let slot = match index.get(&token) {
                    Some(&slot) => slot,
                    None => {
                        let slot = vocabulary.len();
                        index.insert(token.clone(), slot);
                        vocabulary.push(token);
                        slot
                    }
                };
                *counts.entry(slot).or_insert(0) += 1;
            }
            term_counts.push(counts);
        }

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for counts in &term_counts {
            for &slot in counts.keys() {
                doc_freq[slot] += 1;
            }
        }

        let n_docs = documents.len();
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| self.scheme.idf(n_docs, df))
            .collect();

        let vectors = term_counts
            .iter()
            .map(|counts| {
                let mut vector = vec![0.0; vocabulary.len()];
                for (&slot, &tf) in counts {
                    vector[slot] = tf as f64 * idf[slot];
                }
                vector
            })
            .collect();

        tracing::debug!(
            documents = n_docs,
            vocabulary = vocabulary.len(),
            scheme = ?self.scheme,
            "vectorized batch"
        );

        Vectorized { vocabulary, vectors }
    }

    /// Sparse tf × idf weights per document, keyed by term.
    pub fn term_weights<D: AsRef<str>>(&self, documents: &[D]) -> Vec<TermWeightMap> {
        let Vectorized { vocabulary, vectors } = self.vectorize(documents);
        vectors
            .iter()
            .map(|vector| {
                vocabulary
                    .iter()
                    .zip(vector)
                    .filter(|(_, w)| **w != 0.0)
                    .map(|(term, &w)| (term.clone(), w))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_returns_empty_output() {
        let out = TextVectorizer::default().vectorize::<&str>(&[]);
        assert!(out.vocabulary.is_empty());
        assert!(out.vectors.is_empty());
    }

    #[test]
    fn test_vocabulary_is_first_seen_order() {
        let out = TextVectorizer::default().vectorize(&["beta alpha", "gamma beta"]);
        assert_eq!(out.vocabulary, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_vectors_match_vocabulary_length() {
        let out = TextVectorizer::default().vectorize(&["one two", "", "three"]);
        assert_eq!(out.vectors.len(), 3);
        assert!(out.vectors.iter().all(|v| v.len() == out.vocabulary.len()));
    }

    #[test]
    fn test_empty_document_is_zero_vector() {
        let out = TextVectorizer::default().vectorize(&["rust", ""]);
        assert!(out.vectors[1].iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_smoothed_weight_is_tf_times_idf() {
        // "rust" appears twice in doc0 and in 1 of 2 docs: 2 * ln(1 + 2/1)
        let out = TextVectorizer::new(IdfScheme::Smoothed).vectorize(&["rust rust", "go"]);
        let expected = 2.0 * 3.0_f64.ln();
        assert!((out.vectors[0][0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_classic_idf_formula() {
        // N=2, df=1 → 1 + ln(2/2) = 1
        assert!((IdfScheme::Classic.idf(2, 1) - 1.0).abs() < 1e-12);
        // N=1, df=1 → 1 + ln(1/2), still positive
        assert!(IdfScheme::Classic.idf(1, 1) > 0.0);
    }

    #[test]
    fn test_single_document_batch() {
        let out = TextVectorizer::default().vectorize(&["solo solo text"]);
        assert_eq!(out.vocabulary, vec!["solo", "text"]);
        // N=1, df=1 → ln(2)
        assert!((out.vectors[0][1] - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_vectorize_documents_by_text() {
        let docs = vec![Document::new("a", "React Node"), Document::new("b", "react")];
        let out = TextVectorizer::default().vectorize(&docs);
        assert_eq!(out.vocabulary, vec!["react", "node"]);
    }

    #[test]
    fn test_vectorize_is_deterministic() {
        let docs = ["alpha beta gamma", "beta delta", "gamma gamma epsilon"];
        let v = TextVectorizer::default();
        assert_eq!(v.vectorize(&docs), v.vectorize(&docs));
    }

    #[test]
    fn test_term_weights_skip_absent_terms() {
        let maps = TextVectorizer::default().term_weights(&["rust", "go"]);
        assert_eq!(maps[0].len(), 1);
        assert!(maps[0].contains_key("rust"));
        assert!(!maps[0].contains_key("go"));
    }

    #[test]
    fn test_idf_scheme_parses_case_insensitively() {
        assert_eq!("Classic".parse::<IdfScheme>().unwrap(), IdfScheme::Classic);
        assert_eq!(" smoothed ".parse::<IdfScheme>().unwrap(), IdfScheme::Smoothed);
        assert!("bm25".parse::<IdfScheme>().is_err());
    }
}
