//! Running the checker over a [Workspace].
use jpat_exhaustiveness::{ExhaustivenessChecker, SwitchReport};
use jpat_reporting::{diagnostic::Diagnostics, report::Report, reporter::Reports, writer::ReportWriter};
use jpat_utils::{log, stream::CompilerOutputStream, stream_writeln};

use crate::{error::PipelineError, settings::CompilerSettings, workspace::Workspace};

/// The result of checking one switch of a workspace.
#[derive(Debug, Clone)]
pub struct CheckedSwitch {
    pub name: String,
    pub report: SwitchReport,
}

/// The result of checking a whole workspace.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub switches: Vec<CheckedSwitch>,

    /// Reports of every switch, in switch order.
    pub reports: Reports,
}

impl CheckOutcome {
    /// Check if any of the reports is an error.
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(Report::is_error)
    }
}

/// Check every switch of the workspace. Each switch gets its own
/// [ExhaustivenessChecker], and its reports are annotated with the name of
/// the switch.
pub fn check_workspace(workspace: &Workspace, settings: &CompilerSettings) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    for named in &workspace.switches {
        let mut checker = ExhaustivenessChecker::new(&workspace.store, settings.exhaustiveness_settings);

        log::debug!("checking switch `{}`", named.name);
        let report = checker.check_switch(&named.switch);

        for mut diagnostic in checker.into_diagnostics().into_reports() {
            if settings.report_only_errors && !diagnostic.is_error() {
                continue;
            }

            diagnostic.add_note(format!("in switch `{}`", named.name));
            outcome.reports.push(diagnostic);
        }

        outcome.switches.push(CheckedSwitch { name: named.name.clone(), report });
    }

    outcome
}

/// Load the workspace that the settings point to, and check it.
pub fn run(settings: &CompilerSettings) -> Result<CheckOutcome, PipelineError> {
    let path = settings.workspace().ok_or(PipelineError::MissingWorkspace)?;
    let workspace = Workspace::load(path)?;

    log::debug!(
        "loaded workspace `{}` with {} types and {} switches",
        path.display(),
        workspace.store.len(),
        workspace.switches.len()
    );

    Ok(check_workspace(&workspace, settings))
}

/// Write reports to a stream, prefixing locations with the source name.
pub fn emit_reports(reports: &[Report], source: &str, stream: &mut CompilerOutputStream) {
    if !reports.is_empty() {
        stream_writeln!(stream, "{}", ReportWriter::new(reports).with_source(source));
    }
}

#[cfg(test)]
mod test_super {
    use jpat_error_codes::JpatErrorCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::workspace::WorkspaceDecl;

    const WORKSPACE: &str = r#"{
        "types": [
            { "name": "lib.S", "kind": "interface", "permits": ["lib.A", "lib.B"] },
            { "name": "lib.A", "kind": "record", "supertypes": ["lib.S"] },
            { "name": "lib.B", "kind": "record", "supertypes": ["lib.S"] }
        ],
        "switches": [
            { "name": "total", "selector": "lib.S", "cases": [
                { "labels": [{ "pattern": { "binding": "lib.A", "name": "a" } }] },
                { "labels": [{ "pattern": { "binding": "lib.B", "name": "b" } }] }
            ] },
            { "name": "partial", "selector": "lib.S", "cases": [
                { "labels": [{ "pattern": { "binding": "lib.A", "name": "a" } }] }
            ] },
            { "name": "gave-up", "selector": "lib.S", "cases": [
                { "labels": [{ "pattern": { "binding": "lib.A", "name": "a" } }] },
                { "labels": [{ "pattern": { "binding": "lib.B", "name": "b" } }] }
            ] }
        ]
    }"#;

    fn workspace() -> Workspace {
        let decl: WorkspaceDecl = serde_json::from_str(WORKSPACE).unwrap();
        Workspace::resolve(decl).unwrap()
    }

    #[test]
    fn test_check_workspace() {
        let settings = CompilerSettings::default();
        let outcome = check_workspace(&workspace(), &settings);

        let verdicts: Vec<_> =
            outcome.switches.iter().map(|checked| (checked.name.as_str(), checked.report.exhaustive)).collect();
        assert_eq!(verdicts, vec![("total", true), ("partial", false), ("gave-up", true)]);

        assert!(outcome.has_errors());
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].error_code, Some(JpatErrorCode::NotExhaustive));
        assert_eq!(outcome.reports[0].notes().last().map(|note| note.message.as_str()), Some("in switch `partial`"));
    }

    #[test]
    fn test_report_only_errors() {
        let mut settings = CompilerSettings::default();
        settings.exhaustiveness_settings.max_base_checks = 1;

        let outcome = check_workspace(&workspace(), &settings);
        assert!(outcome.switches.iter().all(|checked| checked.report.too_complex));
        // An error and a warning for each switch.
        assert_eq!(outcome.reports.len(), 6);

        settings.report_only_errors = true;
        let outcome = check_workspace(&workspace(), &settings);
        assert_eq!(outcome.reports.len(), 3);
        assert!(outcome.reports.iter().all(Report::is_error));
    }

    #[test]
    fn test_run_without_workspace() {
        let result = run(&CompilerSettings::default());
        assert!(matches!(result, Err(PipelineError::MissingWorkspace)));
    }
}
