use std::path::Path;

use bounded_dispatch::case::{parse_cases, run_case};
use bounded_dispatch::runtime::Backend;
use tracing::debug;

use super::OutputFormat;

pub fn run(
    path: &Path,
    backend: Option<Backend>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = parse_cases(path)?;
    let backend = backend.unwrap_or(file.backend);
    debug!(path = %path.display(), cases = file.cases.len(), %backend, "loaded case file");

    let mut reports = Vec::new();
    let mut failed = 0usize;
    for case in &file.cases {
        let report = run_case(case, backend)?;
        if !report.passed() {
            failed += 1;
        }
        if format == OutputFormat::Text {
            println!("{}: {}", case.name, report.outcome());
            for m in &report.mismatches {
                println!("  {m}");
            }
        }
        reports.push(report);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => println!(
            "\n{} case(s), {} failed ({backend})",
            file.cases.len(),
            failed
        ),
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{failed} case(s) failed verification").into())
    }
}
