//! YAML dispatch-case files.
//!
//! A case file lists named domain/region pairs to run through the verifier,
//! plus an optional backend shared by every case:
//!
//! ```yaml
//! backend: parallel
//! cases:
//!   - name: interior
//!     domain: { dim_x: 4, dim_y: 3 }
//!     region: { x_start: 1, x_end: 3, y_start: 1, y_end: 2 }
//! ```
//!
//! Omitting `region` gives the all-zero "clip everything" region.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Domain, Region};
use crate::error::{DispatchError, Severity, Violation};
use crate::report::VerificationReport;
use crate::reporter::LogReporter;
use crate::runtime::{Backend, CpuRuntime};
use crate::verifier::BoundedDispatchVerifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub cases: Vec<DispatchCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchCase {
    pub name: String,
    pub domain: Domain,
    #[serde(default)]
    pub region: Region,
}

/// Parse a YAML case file from disk.
///
/// # Errors
///
/// Returns [`DispatchError::Io`] if the file cannot be read,
/// or [`DispatchError::Yaml`] if the YAML is malformed.
pub fn parse_cases(path: &Path) -> Result<CaseFile, DispatchError> {
    let content = std::fs::read_to_string(path)?;
    parse_cases_str(&content)
}

/// Parse a YAML case file from a string.
///
/// # Errors
///
/// Returns [`DispatchError::Yaml`] if the YAML is malformed.
pub fn parse_cases_str(yaml: &str) -> Result<CaseFile, DispatchError> {
    let file: CaseFile = serde_yaml::from_str(yaml)?;
    Ok(file)
}

/// Check a case file for problems that would stop its cases from running.
pub fn validate_cases(file: &CaseFile) -> Vec<Violation> {
    let mut violations = Vec::new();

    if file.cases.is_empty() {
        violations.push(Violation {
            severity: Severity::Error,
            rule: "CASE-001".to_string(),
            message: "cases must contain at least one dispatch case".to_string(),
            location: Some("cases".to_string()),
        });
    }

    let mut names = HashSet::new();
    for (i, case) in file.cases.iter().enumerate() {
        if !names.insert(case.name.as_str()) {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CASE-002".to_string(),
                message: format!("Duplicate case name: {}", case.name),
                location: Some(format!("cases[{i}].name")),
            });
        }
        if let Err(e) = case.domain.check() {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CASE-003".to_string(),
                message: e.to_string(),
                location: Some(format!("cases[{i}].domain")),
            });
            continue;
        }
        if let Err(e) = case.region.check_within(&case.domain) {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CASE-004".to_string(),
                message: e.to_string(),
                location: Some(format!("cases[{i}].region")),
            });
        } else if case.region.is_empty() {
            violations.push(Violation {
                severity: Severity::Info,
                rule: "CASE-005".to_string(),
                message: format!(
                    "Case '{}' has an empty region; dispatch writes nothing",
                    case.name
                ),
                location: Some(format!("cases[{i}].region")),
            });
        }
    }

    violations
}

/// Run one case through a fresh verifier with the reference kernel.
///
/// # Errors
///
/// Propagates configuration and dispatch errors from the verifier.
pub fn run_case(
    case: &DispatchCase,
    backend: Backend,
) -> Result<VerificationReport, DispatchError> {
    debug!(case = %case.name, %backend, "running dispatch case");
    let mut verifier =
        BoundedDispatchVerifier::new(CpuRuntime::new(backend), LogReporter::new(&case.name));
    verifier.configure_region(case.domain, case.region)?;
    verifier.dispatch_reference()?;
    verifier.verify()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: &str = r"
backend: parallel
cases:
  - name: interior
    domain: { dim_x: 4, dim_y: 3 }
    region: { x_start: 1, x_end: 3, y_start: 1, y_end: 2 }
  - name: clip-everything
    domain: { dim_x: 4, dim_y: 3 }
";

    #[test]
    fn parse_case_file() {
        let file = parse_cases_str(CASES).unwrap();
        assert_eq!(file.backend, Backend::Parallel);
        assert_eq!(file.cases.len(), 2);
        assert_eq!(file.cases[0].region, Region::new(1, 3, 1, 2));
        assert_eq!(file.cases[1].region, Region::clip_all());
    }

    #[test]
    fn backend_defaults_to_sequential() {
        let file = parse_cases_str("cases: []").unwrap();
        assert_eq!(file.backend, Backend::Sequential);
    }

    #[test]
    fn partial_region_fields_default_to_zero() {
        let file = parse_cases_str(
            "cases:\n  - name: a\n    domain: { dim_x: 2, dim_y: 2 }\n    region: { x_end: 2, y_end: 1 }\n",
        )
        .unwrap();
        assert_eq!(file.cases[0].region, Region::new(0, 2, 0, 1));
    }

    #[test]
    fn parse_invalid_yaml() {
        assert!(matches!(
            parse_cases_str("{{invalid"),
            Err(DispatchError::Yaml(_))
        ));
    }

    #[test]
    fn valid_file_has_only_info() {
        let file = parse_cases_str(CASES).unwrap();
        let violations = validate_cases(&file);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Info);
        assert_eq!(violations[0].rule, "CASE-005");
    }

    #[test]
    fn empty_file_is_error() {
        let file = parse_cases_str("cases: []").unwrap();
        let violations = validate_cases(&file);
        assert!(violations.iter().any(|v| v.rule == "CASE-001"));
    }

    #[test]
    fn duplicate_and_bad_cases() {
        let yaml = r"
cases:
  - name: a
    domain: { dim_x: 4, dim_y: 3 }
    region: { x_start: 0, x_end: 5, y_start: 0, y_end: 3 }
  - name: a
    domain: { dim_x: 0, dim_y: 3 }
";
        let file = parse_cases_str(yaml).unwrap();
        let rules: Vec<_> = validate_cases(&file).into_iter().map(|v| v.rule).collect();
        assert!(rules.contains(&"CASE-002".to_string()));
        assert!(rules.contains(&"CASE-003".to_string()));
        assert!(rules.contains(&"CASE-004".to_string()));
    }

    #[test]
    fn run_case_passes() {
        let file = parse_cases_str(CASES).unwrap();
        for case in &file.cases {
            let report = run_case(case, file.backend).unwrap();
            assert!(report.passed(), "{}", report);
        }
    }

    #[test]
    fn run_case_rejects_out_of_bounds() {
        let case = DispatchCase {
            name: "oob".to_string(),
            domain: Domain { dim_x: 4, dim_y: 3 },
            region: Region::new(0, 5, 0, 3),
        };
        assert!(matches!(
            run_case(&case, Backend::Sequential),
            Err(DispatchError::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn parse_cases_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.yaml");
        std::fs::write(&path, CASES).unwrap();
        let file = parse_cases(&path).unwrap();
        assert_eq!(file.cases.len(), 2);
        assert!(matches!(
            parse_cases(&dir.path().join("missing.yaml")),
            Err(DispatchError::Io(_))
        ));
    }
}
