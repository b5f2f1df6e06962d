//! All diagnostics that are related to exhaustiveness and label checking of
//! switches.
use jpat_reporting::{
    diagnostic::{DiagnosticStore, IntoReports},
    jpat_error_codes::JpatErrorCode,
    reporter::Reporter,
};
use jpat_source::location::Span;
use jpat_utils::{
    pluralise,
    printing::{SequenceDisplay, SequenceDisplayOptions, SequenceJoinMode},
};

use crate::pats::SwitchKind;

pub type ExhaustivenessDiagnostics = DiagnosticStore<ExhaustivenessError, ExhaustivenessWarning>;

/// Errors that can be emitted while checking a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustivenessError {
    /// A switch that must be exhaustive leaves some values unmatched.
    NonExhaustive {
        kind: SwitchKind,

        /// The span of the switch.
        location: Span,

        /// Patterns describing the values that are not covered. Empty when
        /// the analysis gave up.
        uncovered_pats: Vec<String>,

        /// The number of uncovered patterns that are listed.
        limit: usize,
    },

    /// A case label can never match because an earlier label matches
    /// everything that it matches.
    PatternDominated {
        location: Span,
        label: String,
        dominating_location: Span,
        dominating_label: String,
    },

    /// A case whose guard is the constant `false`.
    GuardConstantFalse { location: Span },

    /// The same constant appears in more than one case label.
    DuplicateCaseLabel { location: Span, label: String },

    /// More than one `default` label.
    DuplicateDefaultLabel { location: Span },

    /// A switch with a `default` label and an unconditional pattern.
    UnconditionalPatternAndDefault { location: Span, pattern: String },

    /// A label that does not fit the types it refers to, e.g. a record
    /// pattern with the wrong number of nested patterns.
    InvalidPattern { location: Span, message: String },
}

impl ExhaustivenessError {
    pub fn code(&self) -> JpatErrorCode {
        match self {
            ExhaustivenessError::NonExhaustive { kind: SwitchKind::Expression, .. } => JpatErrorCode::NotExhaustive,
            ExhaustivenessError::NonExhaustive { kind: SwitchKind::Statement, .. } => {
                JpatErrorCode::NotExhaustiveStatement
            }
            ExhaustivenessError::PatternDominated { .. } => JpatErrorCode::PatternDominated,
            ExhaustivenessError::GuardConstantFalse { .. } => JpatErrorCode::GuardConstantFalse,
            ExhaustivenessError::DuplicateCaseLabel { .. } => JpatErrorCode::DuplicateCaseLabel,
            ExhaustivenessError::DuplicateDefaultLabel { .. } => JpatErrorCode::DuplicateDefaultLabel,
            ExhaustivenessError::UnconditionalPatternAndDefault { .. } => {
                JpatErrorCode::UnconditionalPatternAndDefault
            }
            ExhaustivenessError::InvalidPattern { .. } => JpatErrorCode::InvalidPattern,
        }
    }
}

impl IntoReports for ExhaustivenessError {
    fn add_to_reports(&self, reporter: &mut Reporter) {
        let code = self.code();

        match self {
            ExhaustivenessError::NonExhaustive { kind, location, uncovered_pats, limit } => {
                let kind = match kind {
                    SwitchKind::Expression => "expression",
                    SwitchKind::Statement => "statement",
                };

                let report = reporter
                    .error()
                    .code(code)
                    .title(format!("the switch {kind} does not cover all possible input values"));

                if uncovered_pats.is_empty() {
                    report.add_labelled_span(*location, "");
                } else {
                    let pats = SequenceDisplay::new(
                        uncovered_pats,
                        SequenceDisplayOptions::with_limit(SequenceJoinMode::All, *limit),
                    );

                    report.add_labelled_span(
                        *location,
                        format!("pattern{} {pats} not covered", pluralise!(uncovered_pats.len())),
                    );
                }
            }
            ExhaustivenessError::PatternDominated {
                location,
                label,
                dominating_location,
                dominating_label,
            } => {
                reporter
                    .error()
                    .code(code)
                    .title("this case label is dominated by a preceding case label")
                    .add_labelled_span(*location, format!("`{label}` can never match..."))
                    .add_labelled_span(
                        *dominating_location,
                        format!("...because `{dominating_label}` matches everything it matches"),
                    );
            }
            ExhaustivenessError::GuardConstantFalse { location } => {
                reporter
                    .error()
                    .code(code)
                    .title("this case label has a guard that is a constant expression with value `false`")
                    .add_labelled_span(*location, "");
            }
            ExhaustivenessError::DuplicateCaseLabel { location, label } => {
                reporter
                    .error()
                    .code(code)
                    .title(format!("duplicate case label `{label}`"))
                    .add_labelled_span(*location, "");
            }
            ExhaustivenessError::DuplicateDefaultLabel { location } => {
                reporter.error().code(code).title("duplicate default label").add_labelled_span(*location, "");
            }
            ExhaustivenessError::UnconditionalPatternAndDefault { location, pattern } => {
                reporter
                    .error()
                    .code(code)
                    .title("switch has both an unconditional pattern and a default label")
                    .add_labelled_span(*location, "")
                    .add_note(format!("`{pattern}` already matches every value of the selector"));
            }
            ExhaustivenessError::InvalidPattern { location, message } => {
                reporter.error().code(code).title(message).add_labelled_span(*location, "");
            }
        }
    }
}

/// Warnings that can be emitted while checking a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustivenessWarning {
    /// The analysis exceeded its budget of base checks and assumed that the
    /// switch is not exhaustive.
    AnalysisGaveUp { location: Span, max_base_checks: usize },
}

impl IntoReports for ExhaustivenessWarning {
    fn add_to_reports(&self, reporter: &mut Reporter) {
        match self {
            ExhaustivenessWarning::AnalysisGaveUp { location, max_base_checks } => {
                reporter
                    .warning()
                    .title("exhaustiveness of this switch could not be determined")
                    .add_labelled_span(*location, "")
                    .add_note(format!("the analysis gave up after {max_base_checks} base checks"))
                    .add_help("use `-C max-base-checks=<n>` to raise the limit");
            }
        }
    }
}
