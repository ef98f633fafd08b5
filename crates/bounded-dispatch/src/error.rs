use thiserror::Error;

use crate::domain::Axis;
use crate::kernel::CellFault;
use crate::verifier::VerifierState;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid domain: {dim_x}x{dim_y} has no cells")]
    InvalidDomain { dim_x: u32, dim_y: u32 },

    #[error("Active region {axis} range {start}..{end} exceeds domain size {dim}")]
    RegionOutOfBounds {
        axis: Axis,
        start: u32,
        end: u32,
        dim: u32,
    },

    #[error("Active region {axis} range is inverted: start {start} > end {end}")]
    InvertedRange { axis: Axis, start: u32, end: u32 },

    #[error("Cannot {operation} while verifier is {state}")]
    Sequencing {
        operation: &'static str,
        state: VerifierState,
    },

    #[error("Kernel '{kernel}' failed at ({x}, {y}): {source}")]
    DispatchFailed {
        kernel: String,
        x: u32,
        y: u32,
        #[source]
        source: CellFault,
    },

    #[error("Dispatch was aborted; verification of a partial buffer is suppressed")]
    DispatchAborted,

    #[error("Failed to read case file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        write!(f, "[{prefix}] {}: {}", self.rule, self.message)
    }
}
