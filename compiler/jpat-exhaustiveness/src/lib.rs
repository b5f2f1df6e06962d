//! jpat switch exhaustiveness module. This module contains all of the
//! machinery that decides whether the case labels of a switch over sealed
//! hierarchies, records, enums and booleans cover every possible value of
//! the selector, and the label checks that go with it (dominance, constant
//! guards, duplicate labels).
//!
//! Exhaustiveness is computed with the usefulness algorithm from
//!
//! <http://moscova.inria.fr/~maranget/papers/warn/warn.pdf>
//!
//! over a matrix whose rows are the unguarded case labels. The columns of the
//! matrix are split by the leaves of the column type's
//! [jpat_types::space::TypeSpace]: the permitted subtypes of sealed types
//! (transitively), the constants of enums, `true` and `false`, and records,
//! which are further decomposed into their components. For example, with
//! ```ignore
//! sealed interface S permits A, B {}
//! record R(S s) {}
//!
//! switch (r) {
//!     case R(A a) -> 0;
//! }
//! ```
//! the value `lib.R(lib.B _)` is not covered, which is what the checker
//! reports.
//!
//! The search is bounded by [ExhaustivenessSettings::max_base_checks]. When
//! the bound is exceeded the switch is conservatively considered to not be
//! exhaustive.
pub mod construct;
pub mod deconstruct;
pub mod diagnostics;
pub mod dominance;
pub mod fields;
pub mod labels;
pub mod lower;
pub mod matrix;
pub mod pats;
pub mod stack;
pub mod storage;
pub mod usefulness;
pub mod wildcard;
pub mod witness;

use derive_more::Deref;
use diagnostics::{ExhaustivenessDiagnostics, ExhaustivenessError, ExhaustivenessWarning};
use jpat_reporting::diagnostic::Diagnostics;
use jpat_types::hierarchy::TypeHierarchy;
use jpat_utils::{indexmap::IndexSet, log};
use labels::LabelId;
use matrix::Matrix;
use pats::{CaseLabel, Switch, SwitchKind};
use stack::PatStack;
use storage::ExhaustivenessCtx;

/// The analysis exceeded [ExhaustivenessSettings::max_base_checks].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooComplex;

/// Settings of the exhaustiveness checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustivenessSettings {
    /// The number of base checks after which the analysis of a switch gives
    /// up and considers the switch not exhaustive.
    pub max_base_checks: usize,

    /// The number of uncovered patterns that a report lists.
    pub witness_limit: usize,
}

impl ExhaustivenessSettings {
    pub const DEFAULT_MAX_BASE_CHECKS: usize = 1_000_000;
    pub const DEFAULT_WITNESS_LIMIT: usize = 3;
}

impl Default for ExhaustivenessSettings {
    fn default() -> Self {
        Self { max_base_checks: Self::DEFAULT_MAX_BASE_CHECKS, witness_limit: Self::DEFAULT_WITNESS_LIMIT }
    }
}

/// The result of checking a single switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    /// Whether the labels cover every value of the selector.
    pub exhaustive: bool,

    /// Whether the switch is required to be exhaustive: switch expressions,
    /// and switch statements that use patterns or a selector type that
    /// could not be switched on before patterns.
    pub requires_exhaustiveness: bool,

    /// The analysis gave up, `exhaustive` is a conservative `false`.
    pub too_complex: bool,

    /// Patterns describing values that are not covered, e.g.
    /// `lib.R(lib.B _)`, without duplicates.
    pub uncovered: Vec<String>,

    /// Labels that are dominated by an earlier label.
    pub dominated: Vec<LabelId>,

    /// Labels that the switch dispatches on: well formed, not dominated and
    /// not under a constant `false` guard, in source order.
    pub accepted: Vec<LabelId>,
}

#[derive(Deref)]
pub struct ExhaustivenessChecker<'env, H> {
    /// Patterns and caches of the checker.
    ecx: ExhaustivenessCtx,

    settings: ExhaustivenessSettings,

    /// Any diagnostics that are generated while checking switches are
    /// stored here.
    diagnostics: ExhaustivenessDiagnostics,

    /// The types that switches are checked against.
    #[deref]
    hierarchy: &'env H,
}

impl<'env, H: TypeHierarchy> ExhaustivenessChecker<'env, H> {
    /// Create a new checker.
    pub fn new(hierarchy: &'env H, settings: ExhaustivenessSettings) -> Self {
        Self { ecx: ExhaustivenessCtx::new(), settings, diagnostics: ExhaustivenessDiagnostics::new(), hierarchy }
    }

    pub fn settings(&self) -> &ExhaustivenessSettings {
        &self.settings
    }

    pub fn diagnostics(&self) -> &ExhaustivenessDiagnostics {
        &self.diagnostics
    }

    /// Convert the [ExhaustivenessChecker] into its
    /// [ExhaustivenessDiagnostics].
    pub fn into_diagnostics(self) -> ExhaustivenessDiagnostics {
        self.diagnostics
    }

    /// Check a switch: its labels, their dominance, and whether they are
    /// exhaustive. Diagnostics are added to the checker.
    pub fn check_switch(&mut self, switch: &Switch) -> SwitchReport {
        self.ecx.reset();

        let labels = self.check_labels(switch);
        let dominated = self.check_dominance(switch, &labels);
        let selector = switch.selector.primary();

        // Only unguarded labels narrow the values that reach later cases.
        let mut matrix = Matrix::empty();
        for id in &labels.live {
            let case = &switch.cases[id.case];

            if case.guard.is_unconditional() {
                if let Some(pat) = self.lower_label(id.get(switch), selector, case.span) {
                    matrix.push(PatStack::singleton(pat));
                }
            }
        }

        let mut exhaustive = labels.default.is_some() || labels.unconditional.is_some();
        let mut too_complex = false;
        let mut uncovered = IndexSet::new();

        if !exhaustive {
            let mut first_witnesses = None;

            // An intersection selector is covered if any of its bounds is.
            // Every bound gets the whole base-check budget.
            for &component in &switch.selector.components {
                self.ecx.base_checks = 0;

                match self.compute_switch_witnesses(&matrix, component) {
                    Ok(witnesses) if witnesses.is_empty() => {
                        exhaustive = true;
                        break;
                    }
                    Ok(witnesses) => {
                        first_witnesses.get_or_insert(witnesses);
                    }
                    Err(TooComplex) => {
                        too_complex = true;
                        break;
                    }
                }
            }

            if !exhaustive && !too_complex {
                for witness in first_witnesses.unwrap_or_default() {
                    uncovered.insert(self.fmt_witness(&witness).to_string());
                }
            }
        }

        let requires_exhaustiveness = match switch.kind {
            SwitchKind::Expression => true,
            SwitchKind::Statement => {
                let has_pattern = switch
                    .cases
                    .iter()
                    .flat_map(|case| &case.labels)
                    .any(|label| matches!(label, CaseLabel::Pattern(_)));

                has_pattern || switch.selector.components.len() > 1 || !self.is_legacy_switch_ty(selector)
            }
        };

        if too_complex {
            log::warn!(
                "exhaustiveness analysis of the switch at {} exceeded {} base checks",
                switch.span,
                self.settings.max_base_checks
            );

            self.diagnostics.add_warning(ExhaustivenessWarning::AnalysisGaveUp {
                location: switch.span,
                max_base_checks: self.settings.max_base_checks,
            });
        }

        let uncovered: Vec<_> = uncovered.into_iter().collect();

        if requires_exhaustiveness && !exhaustive {
            self.diagnostics.add_error(ExhaustivenessError::NonExhaustive {
                kind: switch.kind,
                location: switch.span,
                uncovered_pats: uncovered.clone(),
                limit: self.settings.witness_limit,
            });
        }

        log::debug!(
            "switch at {}: exhaustive={exhaustive}, {} uncovered pattern(s), {} base checks",
            switch.span,
            uncovered.len(),
            self.ecx.base_checks
        );

        let accepted = labels.live.iter().copied().filter(|id| !dominated.contains(id)).collect();

        SwitchReport { exhaustive, requires_exhaustiveness, too_complex, uncovered, dominated, accepted }
    }
}
