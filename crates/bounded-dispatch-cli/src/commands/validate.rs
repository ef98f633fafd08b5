use std::path::Path;

use bounded_dispatch::case::{parse_cases, validate_cases};
use bounded_dispatch::error::Severity;

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = parse_cases(path)?;
    let violations = validate_cases(&file);

    let errors = violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count();
    let warnings = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .count();

    for v in &violations {
        println!("{v}");
    }

    println!("\n{errors} error(s), {warnings} warning(s)");

    if errors == 0 {
        println!("Case file is valid.");
        Ok(())
    } else {
        Err(format!("Case file has {errors} validation error(s)").into())
    }
}
