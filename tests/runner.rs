//! jpat UI test runner, this file will read the `cases` directory for
//! `.json` workspaces and run each of them through the pipeline.
//!
//! In the event of a `pass` case, the run should not report any errors.
//! However, it's possible for the case to generate warnings (which is not
//! currently tested).
//!
//! In the event of a `fail` case, the run will emit "reports" that signal
//! what the error is, the case handler will render the reports into strings,
//! strip any kind of ANSI codes, and compare with the `case.stderr` to ensure
//! that the test produces the expected errors.
//!
//! The expected outcome is given by the `run` key of the workspace, which
//! the pipeline itself ignores, and settings can be overridden in the same
//! way:
//! ```json
//! { "run": "fail", "max-base-checks": 1, "types": [...], "switches": [...] }
//! ```
#![cfg(test)]

use std::{fs, path::Path};

use jpat_pipeline::{interface::run, settings::CompilerSettings};
use jpat_reporting::{report::Report, writer::ReportWriter};
use jpat_utils::highlight::set_colours_enabled;
use serde::Deserialize;

use crate::{ANSI_REGEX, REGENERATE_OUTPUT};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TestResult {
    #[default]
    Pass,
    Fail,
}

/// Testing parameters of a case.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CaseMetadata {
    #[serde(default)]
    run: TestResult,

    #[serde(default)]
    max_base_checks: Option<usize>,
}

/// This function is used to handle the case of verifying that a case was
/// expected to fail. This function verifies that it does fail and that the
/// generated [Report]s (which are rendered) match the recorded `case.stderr`
/// entry within the case.
fn handle_failure_case(path: &Path, diagnostics: &[Report]) -> std::io::Result<()> {
    assert!(diagnostics.iter().any(|report| report.is_error()), "checking case: {path:?} did not fail");

    let filename = path.file_name().unwrap().to_string_lossy();
    let contents = ReportWriter::new(diagnostics).with_source(&filename).to_string();

    // Remove any ANSI escape codes generated from the reporting...
    let report_contents = ANSI_REGEX.replace_all(contents.as_str(), "").to_string();

    // We want to load the `.stderr` file and verify that the contents of the
    // file match to the created report. If the `.stderr` file does not exist
    // then we create it and write the generated report to that file
    let stderr_path = path.with_extension("stderr");

    // If we specify to re-generate the output, then we will always write the
    // content of the report into the specified file
    if *REGENERATE_OUTPUT || !stderr_path.exists() {
        fs::write(&stderr_path, &report_contents)?;
    }

    let err_contents = fs::read_to_string(stderr_path)?;
    pretty_assertions::assert_eq!(err_contents, report_contents, "case: {path:?}");

    Ok(())
}

/// Generic test handler in the event whether a case should pass or fail.
fn handle_test(path: &Path) {
    let source = fs::read_to_string(path).unwrap();
    let metadata: CaseMetadata = serde_json::from_str(&source).unwrap();

    let mut settings = CompilerSettings::new(path);
    settings.set_emit_errors(false);

    if let Some(limit) = metadata.max_base_checks {
        settings.exhaustiveness_settings_mut().max_base_checks = limit;
    }

    let diagnostics = match run(&settings) {
        Ok(outcome) => outcome.reports,
        Err(error) => error.into_reports(),
    };

    // Based on the specified metadata within the test case itself, we know
    // whether the test should fail or not
    match metadata.run {
        TestResult::Fail => handle_failure_case(path, &diagnostics).unwrap(),
        TestResult::Pass => {
            assert!(!diagnostics.iter().any(Report::is_error), "checking case failed: {path:?}")
        }
    }
}

#[test]
fn ui_cases() {
    set_colours_enabled(false);

    let cases_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cases");
    let mut cases: Vec<_> = fs::read_dir(&cases_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|extension| extension == "json"))
        .collect();

    cases.sort();
    assert!(!cases.is_empty(), "no cases found in {cases_dir:?}");

    for case in &cases {
        handle_test(case);
    }
}
