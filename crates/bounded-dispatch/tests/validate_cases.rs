//! Every case file shipped under `cases/` validates and passes.

use std::path::{Path, PathBuf};

use bounded_dispatch::case::{parse_cases, run_case, validate_cases};
use bounded_dispatch::error::Severity;

fn cases_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../cases")
}

fn case_files() -> Vec<PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(cases_dir())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("yaml"))
        .collect();
    files.sort();
    files
}

#[test]
fn shipped_case_files_exist() {
    assert!(case_files().len() >= 2);
}

#[test]
fn shipped_case_files_have_no_errors() {
    for path in case_files() {
        let file = parse_cases(&path).unwrap();
        let errors: Vec<_> = validate_cases(&file)
            .into_iter()
            .filter(|v| v.severity == Severity::Error)
            .collect();
        assert!(errors.is_empty(), "{}: {errors:?}", path.display());
    }
}

#[test]
fn shipped_cases_pass_verification() {
    for path in case_files() {
        let file = parse_cases(&path).unwrap();
        for case in &file.cases {
            let report = run_case(case, file.backend).unwrap();
            assert!(report.passed(), "{} / {}: {report}", path.display(), case.name);
        }
    }
}
