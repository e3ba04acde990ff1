//! TF-IDF uniqueness and variety calculators.
//!
//! Both report a percentage in `[0, 100]`. Payloads are decoded strictly:
//! a missing or unknown field is a configuration error, never an empty list.

use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;
use crate::similarity::{cosine_similarity, mean_similarity, pairwise_similarities, safe_mean};
use crate::text::TextVectorizer;

/// `{ "thisProjects": [...], "otherProjects": [[...], ...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UniquenessInput {
    pub this_projects: Vec<String>,
    pub other_projects: Vec<Vec<String>>,
}

/// `{ "projects": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarietyInput {
    pub projects: Vec<String>,
}

/// Which calculator a payload is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorKind {
    Uniqueness,
    Variety,
}

impl CalculatorKind {
    pub fn program(&self) -> &'static str {
        match self {
            CalculatorKind::Uniqueness => "calc_uniq",
            CalculatorKind::Variety => "calc_variety",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorInput {
    Uniqueness(UniquenessInput),
    Variety(VarietyInput),
}

impl CalculatorInput {
    /// Decodes a JSON payload into the variant `kind` expects.
    pub fn decode(kind: CalculatorKind, json: &str) -> Result<Self, ScoringError> {
        let malformed =
            |e: serde_json::Error| ScoringError::Configuration(format!("malformed payload: {e}"));
        match kind {
            CalculatorKind::Uniqueness => serde_json::from_str(json)
                .map(CalculatorInput::Uniqueness)
                .map_err(malformed),
            CalculatorKind::Variety => serde_json::from_str(json)
                .map(CalculatorInput::Variety)
                .map_err(malformed),
        }
    }

    pub fn compute(&self, vectorizer: &TextVectorizer) -> f64 {
        match self {
            CalculatorInput::Uniqueness(input) => uniqueness_percentage(input, vectorizer),
            CalculatorInput::Variety(input) => variety_percentage(input, vectorizer),
        }
    }
}

fn non_blank(projects: &[String]) -> Vec<&str> {
    projects
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// How far one candidate's projects sit from everyone else's.
///
/// Each candidate becomes one document (projects joined by newlines); the
/// result is `(1 − mean cosine(own, other)) × 100`. A candidate with no
/// project text has nothing to be unique about and scores 0.
pub fn uniqueness_percentage(input: &UniquenessInput, vectorizer: &TextVectorizer) -> f64 {
    let own = non_blank(&input.this_projects);
    if own.is_empty() {
        return 0.0;
    }

    let mut docs = Vec::with_capacity(input.other_projects.len() + 1);
    docs.push(own.join("\n"));
    docs.extend(input.other_projects.iter().map(|projects| projects.join("\n")));

    let vectorized = vectorizer.vectorize(&docs);
    let Some((own_vector, others)) = vectorized.vectors.split_first() else {
        return 0.0;
    };
    let mean = safe_mean(
        others
            .iter()
            .filter_map(|other| cosine_similarity(own_vector, other)),
    );
    percentage(mean)
}

/// How different a candidate's projects are from each other:
/// `(1 − mean pairwise cosine) × 100`. Fewer than two non-blank projects
/// cannot show variety and score 0.
pub fn variety_percentage(input: &VarietyInput, vectorizer: &TextVectorizer) -> f64 {
    let projects = non_blank(&input.projects);
    if projects.len() <= 1 {
        return 0.0;
    }
    let vectorized = vectorizer.vectorize(&projects);
    percentage(mean_similarity(&pairwise_similarities(&vectorized.vectors)))
}

fn percentage(mean_similarity: f64) -> f64 {
    (1.0 - mean_similarity).max(0.0) * 100.0
}

/// Two-decimal rendering printed by the calculator binaries.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}")
}
