//! Structured verification results.

use serde::{Deserialize, Serialize};

use crate::domain::{Domain, Region};
use crate::reporter::TestOutcome;

/// Whether a cell lies inside or outside the active region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Active,
    Clipped,
}

/// One cell whose value deviates from what it should hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub x: u32,
    pub y: u32,
    pub expected: i32,
    pub actual: i32,
    pub kind: CellKind,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.kind {
            CellKind::Active => "ACTIVE",
            CellKind::Clipped => "CLIPPED",
        };
        write!(
            f,
            "[{tag}] ({}, {}): expected {}, got {}",
            self.x, self.y, self.expected, self.actual
        )
    }
}

/// Result of a full-domain scan. Holds every mismatch, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub domain: Domain,
    pub region: Region,
    pub kernel: String,
    pub cells_checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerificationReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    #[must_use]
    pub fn outcome(&self) -> TestOutcome {
        TestOutcome::from_passed(self.passed())
    }

    /// Mismatches outside the active region, i.e. out-of-bounds writes.
    pub fn clipped_writes(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| m.kind == CellKind::Clipped)
    }

    /// Mismatches inside the active region.
    pub fn active_errors(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| m.kind == CellKind::Active)
    }
}

impl std::fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "domain {}x{}, region {}, kernel {}",
            self.domain.dim_x, self.domain.dim_y, self.region, self.kernel
        )?;
        for m in &self.mismatches {
            writeln!(f, "  {m}")?;
        }
        write!(
            f,
            "{} cell(s) checked, {} mismatch(es): {}",
            self.cells_checked,
            self.mismatches.len(),
            self.outcome()
        )
    }
}
