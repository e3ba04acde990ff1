//! Keyword signal: presence of entrepreneurial phrases, saturated on an
//! exponential curve so keyword stuffing stops paying off after a few hits.

use regex::Regex;

use crate::errors::ScoringError;
use crate::text::tokenizer::is_word_char;

/// Case-insensitive phrase matcher compiled once from the configured list.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<(String, Regex)>,
}

impl KeywordMatcher {
    /// Word boundaries are only enforced on edges that are word characters,
    /// so symbols such as `™` still match directly after a product name.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, ScoringError> {
        let keywords = keywords
            .iter()
            .map(|kw| {
                let kw = kw.as_ref().trim();
                let (first, last) = match (kw.chars().next(), kw.chars().last()) {
                    (Some(first), Some(last)) => (first, last),
                    _ => {
                        return Err(ScoringError::Configuration(
                            "keywords cannot be blank".to_string(),
                        ))
                    }
                };
                let pattern = format!(
                    "(?i){}{}{}",
                    if is_word_char(first) { r"\b" } else { "" },
                    regex::escape(kw),
                    if is_word_char(last) { r"\b" } else { "" },
                );
                let re = Regex::new(&pattern).map_err(|e| {
                    ScoringError::Configuration(format!("keyword '{kw}' is not matchable: {e}"))
                })?;
                Ok((kw.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keywords })
    }

    /// Number of distinct keywords present in `text`. Repeats count once.
    pub fn count_hits(&self, text: &str) -> usize {
        self.keywords.iter().filter(|(_, re)| re.is_match(text)).count()
    }
}

/// `1 − e^(−hits/α)`: 0 for no hits, approaching 1 as hits grow. Smaller α
/// saturates faster.
pub fn keyword_fraction(hits: usize, alpha: f64) -> f64 {
    (1.0 - (-(hits as f64) / alpha).exp()).clamp(0.0, 1.0)
}
