//! Shared entry point of the `calc_uniq` and `calc_variety` binaries.
//!
//! stdout carries only the two-decimal percentage; logs and errors go to stderr.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::CalculatorConfig;
use crate::scoring::calculators::{format_percentage, CalculatorInput, CalculatorKind};
use crate::text::TextVectorizer;

/// Runs a calculator over `args` (program name excluded).
pub fn run<I>(kind: CalculatorKind, args: I) -> ExitCode
where
    I: IntoIterator<Item = String>,
{
    let Some(path) = args.into_iter().next() else {
        eprintln!("{}", usage(kind));
        return ExitCode::from(1);
    };

    let result = CalculatorConfig::from_env().and_then(|config| {
        init_logging(&config.rust_log);
        calculate(kind, Path::new(&path), &TextVectorizer::new(config.idf_scheme))
    });

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e:#}", kind.program());
            ExitCode::from(1)
        }
    }
}

pub fn usage(kind: CalculatorKind) -> String {
    format!("Usage: {} <input.json>", kind.program())
}

/// Reads, validates and scores one payload file, returning the printed line.
pub fn calculate(kind: CalculatorKind, path: &Path, vectorizer: &TextVectorizer) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let input = CalculatorInput::decode(kind, &raw)?;
    let score = input.compute(vectorizer);
    tracing::debug!(calculator = kind.program(), score, "calculated");
    Ok(format_percentage(score))
}

fn init_logging(rust_log: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), rust_log)));
    // a second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
