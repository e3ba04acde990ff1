//! Prints how varied a candidate's projects are among themselves.
//!
//! Usage: `calc_variety <input.json>` with `{ "projects": [...] }`.

use std::process::ExitCode;

use screener::cli;
use screener::scoring::CalculatorKind;

fn main() -> ExitCode {
    cli::run(CalculatorKind::Variety, std::env::args().skip(1))
}
