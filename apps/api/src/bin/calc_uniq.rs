//! Prints how unique one candidate's projects are against everyone else's.
//!
//! Usage: `calc_uniq <input.json>` with `{ "thisProjects": [...], "otherProjects": [[...]] }`.

use std::process::ExitCode;

use screener::cli;
use screener::scoring::CalculatorKind;

fn main() -> ExitCode {
    cli::run(CalculatorKind::Uniqueness, std::env::args().skip(1))
}
