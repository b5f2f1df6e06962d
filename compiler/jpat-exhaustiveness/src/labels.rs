//! Checks over the case labels of a switch that do not need the usefulness
//! algorithm: malformed labels, constant guards, duplicate labels and
//! duplicate defaults.
use jpat_reporting::diagnostic::Diagnostics;
use jpat_types::{hierarchy::TypeHierarchy, ty::TyId};
use jpat_utils::{fxhash::FxHashSet, log};

use crate::{
    diagnostics::ExhaustivenessError,
    pats::{CaseLabel, Guard, Pattern, Switch, WithHierarchy},
    ExhaustivenessChecker,
};

/// Identifies a label of a switch by the index of its case and its index
/// within the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId {
    pub case: usize,
    pub label: usize,
}

impl LabelId {
    pub fn new(case: usize, label: usize) -> Self {
        Self { case, label }
    }

    pub fn get<'s>(&self, switch: &'s Switch) -> &'s CaseLabel {
        &switch.cases[self.case].labels[self.label]
    }
}

/// The outcome of checking the labels of a switch.
#[derive(Debug, Default)]
pub(crate) struct CheckedLabels {
    /// Well-formed labels whose case can match, in source order.
    pub(crate) live: Vec<LabelId>,

    /// The first `default` label.
    pub(crate) default: Option<LabelId>,

    /// The first pattern label that matches every value of the selector
    /// without a guard.
    pub(crate) unconditional: Option<LabelId>,
}

/// A label constant that may only appear once in a switch.
#[derive(Debug, PartialEq, Eq, Hash)]
enum ConstantKey<'s> {
    Enum(TyId, &'s str),
    Boolean(bool),
    Text(&'s str),
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// Whether a pattern matches every value of the selector.
    pub(crate) fn is_unconditional(&self, pat: &Pattern, selector: &[TyId]) -> bool {
        match pat {
            Pattern::Binding { ty, .. } => selector.iter().any(|component| self.pattern_covers(*component, *ty)),
            Pattern::Any | Pattern::Record { .. } => false,
        }
    }

    pub(crate) fn check_labels(&mut self, switch: &Switch) -> CheckedLabels {
        let selector = switch.selector.primary();
        let mut checked = CheckedLabels::default();
        let mut constants = FxHashSet::default();

        for (case_index, case) in switch.cases.iter().enumerate() {
            if case.guard == Guard::Constant(false) {
                log::debug!("case at {} has a constant `false` guard", case.span);
                self.diagnostics.add_error(ExhaustivenessError::GuardConstantFalse { location: case.span });
            }

            for (label_index, label) in case.labels.iter().enumerate() {
                let id = LabelId::new(case_index, label_index);

                if let Err(message) = self.validate_label(label, selector) {
                    self.diagnostics.add_error(ExhaustivenessError::InvalidPattern { location: case.span, message });
                    continue;
                }

                let key = match label {
                    CaseLabel::EnumConstant { ty, name } => Some(ConstantKey::Enum(*ty, name)),
                    CaseLabel::Boolean(value) => Some(ConstantKey::Boolean(*value)),
                    CaseLabel::Constant(text) => Some(ConstantKey::Text(text)),
                    CaseLabel::Pattern(_) | CaseLabel::Default => None,
                };

                if let Some(key) = key {
                    if !constants.insert(key) {
                        self.diagnostics.add_error(ExhaustivenessError::DuplicateCaseLabel {
                            location: case.span,
                            label: WithHierarchy::new(label, self.hierarchy).to_string(),
                        });
                    }
                }

                match label {
                    CaseLabel::Default if checked.default.is_some() => {
                        self.diagnostics
                            .add_error(ExhaustivenessError::DuplicateDefaultLabel { location: case.span });
                    }
                    CaseLabel::Default => checked.default = Some(id),
                    CaseLabel::Pattern(pat)
                        if checked.unconditional.is_none()
                            && case.guard.is_unconditional()
                            && self.is_unconditional(pat, &switch.selector.components) =>
                    {
                        checked.unconditional = Some(id);
                    }
                    _ => {}
                }

                if case.guard != Guard::Constant(false) {
                    checked.live.push(id);
                }
            }
        }

        if let (Some(default), Some(unconditional)) = (checked.default, checked.unconditional) {
            let later = default.max(unconditional);
            let pattern = WithHierarchy::new(unconditional.get(switch), self.hierarchy).to_string();

            self.diagnostics.add_error(ExhaustivenessError::UnconditionalPatternAndDefault {
                location: switch.cases[later.case].span,
                pattern,
            });
        }

        checked
    }
}
