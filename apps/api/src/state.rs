use std::sync::Arc;

use crate::config::Config;
use crate::scoring::CompositeScoreEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable once built; scoring calls share it without locking.
    pub engine: Arc<CompositeScoreEngine>,
}

impl AppState {
    /// Builds the engine from `config.scoring`, failing fast on invalid parameters.
    pub fn new(config: Config) -> Result<Self, crate::errors::ScoringError> {
        let engine = CompositeScoreEngine::new(config.scoring.clone())?;
        Ok(Self {
            config,
            engine: Arc::new(engine),
        })
    }
}
