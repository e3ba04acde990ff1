//! Similarity primitives and the aggregates built on them.

pub mod aggregate;
pub mod cosine;
pub mod string;

pub use aggregate::{mean_similarity, safe_mean, uniqueness, weighted_pair_dissimilarity, PartWeights};
pub use cosine::{cosine_similarity, pairwise_similarities};
pub use string::{dice_coefficient, StringSimilarity, DEFAULT_SHARED_TOKEN_THRESHOLD};
