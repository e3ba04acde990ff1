//! Axum route handlers for the Scoring API.
//!
//! Scoring is CPU-bound, so every computation runs on the blocking pool.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::calculators::{format_percentage, CalculatorInput, CalculatorKind};
use crate::scoring::composite::{rank, Candidate, CandidateScore};
use crate::state::AppState;
use crate::text::{Document, IdfScheme, TextVectorizer, Vectorized};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VectorizeRequest {
    pub documents: Vec<Document>,
    /// Overrides the configured idf scheme for this call.
    #[serde(default)]
    pub scheme: Option<IdfScheme>,
}

#[derive(Debug, Serialize)]
pub struct VectorizeResponse {
    pub ids: Vec<String>,
    #[serde(flatten)]
    pub vectorized: Vectorized,
}

#[derive(Debug, Serialize)]
pub struct PercentageResponse {
    pub score: f64,
    /// Two-decimal rendering, identical to the calculator binaries' output.
    pub display: String,
}

#[derive(Debug, Deserialize)]
pub struct EntrepreneurialRequest {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct RankedScore {
    #[serde(flatten)]
    pub score: CandidateScore,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct EntrepreneurialResponse {
    pub scores: Vec<RankedScore>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/vectorize
pub async fn handle_vectorize(
    State(state): State<AppState>,
    payload: Result<Json<VectorizeRequest>, JsonRejection>,
) -> Result<Json<VectorizeResponse>, AppError> {
    let Json(request) = payload?;
    let vectorizer = match request.scheme {
        Some(scheme) => TextVectorizer::new(scheme),
        None => state.engine.vectorizer(),
    };
    let documents = request.documents;

    let response = run_blocking(move || {
        let vectorized = vectorizer.vectorize(&documents);
        VectorizeResponse {
            ids: documents.into_iter().map(|d| d.id).collect(),
            vectorized,
        }
    })
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/scores/uniqueness
///
/// Body: `{ "thisProjects": [...], "otherProjects": [[...]] }`.
pub async fn handle_uniqueness(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<PercentageResponse>, AppError> {
    percentage(&state, CalculatorKind::Uniqueness, body).await
}

/// POST /api/v1/scores/variety
///
/// Body: `{ "projects": [...] }`.
pub async fn handle_variety(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<PercentageResponse>, AppError> {
    percentage(&state, CalculatorKind::Variety, body).await
}

/// POST /api/v1/scores/entrepreneurial
///
/// Scores every candidate of the batch against the batch and returns them
/// ranked, highest total first.
pub async fn handle_entrepreneurial(
    State(state): State<AppState>,
    payload: Result<Json<EntrepreneurialRequest>, JsonRejection>,
) -> Result<Json<EntrepreneurialResponse>, AppError> {
    let Json(request) = payload?;
    if request.candidates.is_empty() {
        return Err(AppError::Validation("candidates cannot be empty".to_string()));
    }

    let engine = state.engine.clone();
    let mut scores = run_blocking(move || engine.score_candidates(&request.candidates)).await?;
    rank(&mut scores);

    let scores = scores
        .into_iter()
        .map(|score| RankedScore {
            explanation: score.breakdown.explain(),
            score,
        })
        .collect();

    Ok(Json(EntrepreneurialResponse { scores }))
}

async fn percentage(
    state: &AppState,
    kind: CalculatorKind,
    body: String,
) -> Result<Json<PercentageResponse>, AppError> {
    let input = CalculatorInput::decode(kind, &body)?;
    let vectorizer = state.engine.vectorizer();

    let score = run_blocking(move || input.compute(&vectorizer)).await?;

    Ok(Json(PercentageResponse {
        score,
        display: format_percentage(score),
    }))
}

async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("scoring task failed: {e}")))
}
