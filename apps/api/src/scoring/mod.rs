// Candidate scoring: composite entrepreneurial score and TF-IDF calculators.
// Everything below `handlers` is synchronous and free of I/O.

pub mod calculators;
pub mod composite;
pub mod config;
pub mod handlers;
pub mod keywords;
pub mod project;

pub use calculators::{CalculatorInput, CalculatorKind, UniquenessInput, VarietyInput};
pub use composite::{rank, Candidate, CandidateScore, CompositeScoreEngine, ScoreBreakdown};
pub use config::ScoringConfig;
