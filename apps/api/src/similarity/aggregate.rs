//! Aggregation of similarity values. Every mean in the crate goes through
//! [`safe_mean`] so non-finite values are excluded in exactly one place.

use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;

/// Arithmetic mean of the finite values. Returns 0.0 when there are none.
pub fn safe_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    if mean.is_finite() {
        mean
    } else {
        0.0
    }
}

/// Mean of a precomputed similarity list.
pub fn mean_similarity(similarities: &[f64]) -> f64 {
    safe_mean(similarities.iter().copied())
}

/// `1 − mean(compare(item, c))` over the corpus, clamped to `[0, 1]`.
///
/// `exclude` names the corpus slot holding `item` itself; that pair is skipped
/// so an item never lowers its own uniqueness. Other slots with identical text
/// are still compared.
pub fn uniqueness<S, F>(item: &str, corpus: &[S], exclude: Option<usize>, compare: F) -> f64
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> f64,
{
    let mean = safe_mean(
        corpus
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != exclude)
            .map(|(_, other)| compare(item, other.as_ref())),
    );
    (1.0 - mean).clamp(0.0, 1.0)
}

/// Relative weight of each part of a two-part document (title, body).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartWeights {
    pub title: f64,
    pub body: f64,
}

impl PartWeights {
    /// Body text carries most of the differentiation between projects.
    pub const DEFAULT: PartWeights = PartWeights {
        title: 0.1,
        body: 0.9,
    };

    const SUM_TOLERANCE: f64 = 1e-9;

    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, w) in [("title", self.title), ("body", self.body)] {
            if !w.is_finite() || w < 0.0 {
                return Err(ScoringError::Configuration(format!(
                    "{name} weight must be a non-negative number, got {w}"
                )));
            }
        }
        let sum = self.title + self.body;
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ScoringError::Configuration(format!(
                "part weights must sum to 1, got {sum}"
            )));
        }
        Ok(())
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.title, self.body]
    }
}

impl Default for PartWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Weighted dissimilarity of two multi-part documents: `Σ wᵢ · (1 − simᵢ)`.
///
/// `None` when part counts disagree with the weights or a part similarity is
/// not finite; the pair is then left out of any mean.
pub fn weighted_pair_dissimilarity<S, F>(
    a: &[S],
    b: &[S],
    weights: &[f64],
    compare: F,
) -> Option<f64>
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> f64,
{
    if a.len() != weights.len() || b.len() != weights.len() {
        return None;
    }
    let mut total = 0.0;
    for ((part_a, part_b), w) in a.iter().zip(b).zip(weights) {
        let sim = compare(part_a.as_ref(), part_b.as_ref());
        if !sim.is_finite() {
            return None;
        }
        total += w * (1.0 - sim);
    }
    Some(total)
}
