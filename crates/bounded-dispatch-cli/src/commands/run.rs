use bounded_dispatch::BoundedDispatchVerifier;
use bounded_dispatch::domain::{Domain, LaunchOptions};
use bounded_dispatch::reporter::LogReporter;
use bounded_dispatch::runtime::{Backend, CpuRuntime};

use super::OutputFormat;

pub struct RunArgs {
    pub dim_x: u32,
    pub dim_y: u32,
    pub x: Option<(u32, u32)>,
    pub y: Option<(u32, u32)>,
    pub backend: Backend,
}

/// Turn a clap `START END` pair into a span.
pub fn span(bounds: Option<&[u32]>) -> Option<(u32, u32)> {
    match bounds {
        Some([start, end]) => Some((*start, *end)),
        _ => None,
    }
}

pub fn run(args: &RunArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let domain = Domain::new(args.dim_x, args.dim_y)?;
    let mut options = LaunchOptions::new();
    if let Some((start, end)) = args.x {
        options = options.with_x(start, end);
    }
    if let Some((start, end)) = args.y {
        options = options.with_y(start, end);
    }

    let mut verifier =
        BoundedDispatchVerifier::new(CpuRuntime::new(args.backend), LogReporter::new("bdv run"));
    verifier.configure_launch(domain, &options)?;
    verifier.dispatch_reference()?;
    let report = verifier.verify()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{report}"),
    }

    if report.passed() {
        Ok(())
    } else {
        Err(format!(
            "Verification failed with {} mismatch(es)",
            report.mismatches.len()
        )
        .into())
    }
}
