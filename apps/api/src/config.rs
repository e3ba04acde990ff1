use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::scoring::ScoringConfig;
use crate::text::IdfScheme;

/// Application configuration loaded from environment variables.
/// Scoring overrides are optional; anything unset keeps its default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScoringConfig::default();
        let mut scoring = ScoringConfig {
            shared_token_threshold: parse_or(
                &lookup,
                "SCORING_SHARED_TOKENS",
                defaults.shared_token_threshold,
            )?,
            keyword_alpha: parse_or(&lookup, "SCORING_KEYWORD_ALPHA", defaults.keyword_alpha)?,
            ..defaults.clone()
        };
        scoring.part_weights.title =
            parse_or(&lookup, "SCORING_TITLE_WEIGHT", defaults.part_weights.title)?;
        scoring.part_weights.body =
            parse_or(&lookup, "SCORING_BODY_WEIGHT", defaults.part_weights.body)?;
        scoring.idf_scheme = idf_scheme_or(&lookup, defaults.idf_scheme)?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: rust_log(&lookup),
            scoring,
        })
    }
}

/// The subset of the environment the calculator binaries read. Server-only
/// settings such as `PORT` are never parsed, so they cannot break a CLI run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    pub rust_log: String,
    pub idf_scheme: IdfScheme,
}

impl CalculatorConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(CalculatorConfig {
            rust_log: rust_log(&lookup),
            idf_scheme: idf_scheme_or(&lookup, IdfScheme::default())?,
        })
    }
}

fn rust_log<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG").unwrap_or_else(|| "info".to_string())
}

fn idf_scheme_or<F>(lookup: &F, default: IdfScheme) -> Result<IdfScheme>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("SCORING_IDF_SCHEME") {
        Some(raw) => IdfScheme::from_str(&raw)
            .map_err(|e| anyhow!(e))
            .context("SCORING_IDF_SCHEME must be 'smoothed' or 'classic'"),
        None => Ok(default),
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
