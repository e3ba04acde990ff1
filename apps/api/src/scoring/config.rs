use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;
use crate::similarity::{PartWeights, DEFAULT_SHARED_TOKEN_THRESHOLD};
use crate::text::{IdfScheme, DEFAULT_STOPWORDS};

/// Entrepreneurial vocabulary searched for in a candidate's full text.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "Founded",
    "Founder",
    "Co-founded",
    "Self-employed",
    "Sole proprietor",
    "Independent contractor",
    "Owner",
    "Operator",
    "Published",
    "Designed and marketed",
    "Creator of",
    "Produced original content",
    "Curated content",
    "Personal project",
    "Portfolio project",
    "Monetized",
    "Generated revenue",
    "Built a customer base",
    "Scaled a business",
    "Grew user base",
    "Started",
    "Launched",
    "Ran ads",
    "Managed ad campaigns",
    "Online marketplace",
    "Identified a market gap",
    "Spearheaded",
    "Pitched to investors",
    "Freelance",
    "Consultant",
    "Contract work",
    "Online business",
    "™",
    "®",
    "mentored",
];

/// Keyword saturation constant: hits at which the keyword signal reaches ~63%.
pub const DEFAULT_KEYWORD_ALPHA: f64 = 1.8;

/// Body tokens shorter than this are dropped before comparing project bodies.
pub const DEFAULT_MIN_BODY_TOKEN_LEN: usize = 3;

/// Immutable scoring parameters, validated once when an engine is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Shared non-stopword tokens at which two titles count as identical.
    pub shared_token_threshold: usize,
    pub part_weights: PartWeights,
    pub keyword_alpha: f64,
    pub idf_scheme: IdfScheme,
    pub min_body_token_len: usize,
    pub keywords: Vec<String>,
    pub stopwords: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            shared_token_threshold: DEFAULT_SHARED_TOKEN_THRESHOLD,
            part_weights: PartWeights::default(),
            keyword_alpha: DEFAULT_KEYWORD_ALPHA,
            idf_scheme: IdfScheme::default(),
            min_body_token_len: DEFAULT_MIN_BODY_TOKEN_LEN,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.shared_token_threshold == 0 {
            return Err(ScoringError::Configuration(
                "shared_token_threshold must be at least 1".to_string(),
            ));
        }
        self.part_weights.validate()?;
        if !self.keyword_alpha.is_finite() || self.keyword_alpha <= 0.0 {
            return Err(ScoringError::Configuration(format!(
                "keyword_alpha must be a positive number, got {}",
                self.keyword_alpha
            )));
        }
        if let Some(pos) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ScoringError::Configuration(format!(
                "keyword at position {pos} is blank"
            )));
        }
        Ok(())
    }
}
