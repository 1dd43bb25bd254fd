use std::env;
use std::process;

use ged_parse::{GedcomBuilder, GedcomError, LoadError};

/// Exit codes: 0 success with no errors, 1 parse errors (fatal or
/// recorded), 2 cancellation, 3 I/O failure.
fn main() {
    let code = match run() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(failure) => {
            eprintln!("Error: {failure}");
            for error in &failure.errors {
                eprintln!("  error: {error}");
            }
            match failure.error {
                GedcomError::Io(_) => 3,
                GedcomError::Cancelled { .. } => 2,
                _ => 1,
            }
        }
    };
    process::exit(code);
}

fn run() -> Result<bool, LoadError> {
    let args: Vec<String> = env::args().collect();
    let filename = match args.as_slice() {
        [_, name] if name == "--help" || name == "-h" => {
            println!("Usage: ged_parse ./path/to/file.ged");
            return Ok(true);
        }
        [_, name] => name,
        _ => {
            eprintln!("Usage: ged_parse ./path/to/file.ged");
            return Ok(false);
        }
    };

    let outcome = GedcomBuilder::new().build_from_path(filename)?;

    outcome.gedcom.stats();
    for error in &outcome.errors {
        eprintln!("error: {error}");
    }
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    println!(
        "Parsing complete: {} errors, {} warnings",
        outcome.errors.len(),
        outcome.warnings.len()
    );

    Ok(outcome.errors.is_empty())
}
