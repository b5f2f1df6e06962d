//! Validation of case labels and their lowering into [DeconstructedPat]s.
use jpat_source::location::Span;
use jpat_types::{hierarchy::TypeHierarchy, ty::TyId};
use jpat_utils::pluralise;

use crate::{
    deconstruct::{DeconstructedPat, PatHead},
    fields::Fields,
    pats::{CaseLabel, Pattern, WithHierarchy},
    storage::DeconstructedPatId,
    ExhaustivenessChecker,
};

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// Check that a label fits the types it refers to, returning a message
    /// describing the problem if it doesn't.
    pub(crate) fn validate_label(&self, label: &CaseLabel, selector: TyId) -> Result<(), String> {
        match label {
            CaseLabel::Pattern(Pattern::Any) => {
                Err("the unnamed pattern `_` is not allowed as a top-level pattern".to_string())
            }
            CaseLabel::Pattern(pat) => self.validate_pattern(pat),
            CaseLabel::EnumConstant { ty, name } => match self.enum_constants(*ty) {
                None => Err(format!("`{}` is not an enum", self.name(*ty))),
                Some(constants) if !constants.contains(name) => {
                    Err(format!("enum `{}` has no constant named `{name}`", self.name(*ty)))
                }
                Some(_) => Ok(()),
            },
            CaseLabel::Boolean(value) if !self.is_boolean(selector) => Err(format!(
                "constant label `{value}` does not fit the selector type `{}`",
                self.name(selector)
            )),
            CaseLabel::Boolean(_) | CaseLabel::Constant(_) | CaseLabel::Default => Ok(()),
        }
    }

    fn validate_pattern(&self, pat: &Pattern) -> Result<(), String> {
        let Pattern::Record { ty, nested } = pat else {
            return Ok(());
        };

        let Some(components) = self.record_components(*ty) else {
            return Err(format!(
                "`{}` is not a record and cannot be used in a record pattern",
                self.name(*ty)
            ));
        };

        if components.len() != nested.len() {
            return Err(format!(
                "incorrect number of nested patterns in `{}`: the record has {} component{}, found {}",
                WithHierarchy::new(pat, self.hierarchy),
                components.len(),
                pluralise!(components.len()),
                nested.len()
            ));
        }

        nested.iter().try_for_each(|nested| self.validate_pattern(nested))
    }

    /// Lower a pattern that appears in a position of type `ty`. The pattern
    /// must have been validated.
    pub(crate) fn lower_pattern(&mut self, pat: &Pattern, ty: TyId, span: Option<Span>) -> DeconstructedPatId {
        match pat {
            Pattern::Any => self.wildcard_pat(ty),
            Pattern::Binding { ty: pat_ty, .. } => {
                self.make_pat(DeconstructedPat::new(PatHead::Binding(*pat_ty), Fields::empty(), span))
            }
            Pattern::Record { ty: record_ty, nested } => {
                let component_tys: Vec<_> = self
                    .record_components(*record_ty)
                    .map(|components| components.iter().map(|component| component.ty).collect())
                    .unwrap_or_default();

                let fields = nested
                    .iter()
                    .zip(component_tys)
                    .map(|(nested, component_ty)| self.lower_pattern(nested, component_ty, span))
                    .collect();

                self.make_pat(DeconstructedPat::new(PatHead::Record(*record_ty), fields, span))
            }
        }
    }

    /// Lower a validated case label into a row head. Labels that never
    /// contribute to coverage give `None`.
    pub(crate) fn lower_label(&mut self, label: &CaseLabel, selector: TyId, span: Span) -> Option<DeconstructedPatId> {
        let head = match label {
            CaseLabel::Pattern(pat) => return Some(self.lower_pattern(pat, selector, Some(span))),
            CaseLabel::EnumConstant { ty, name } => {
                let index = self.enum_constants(*ty)?.iter().position(|constant| constant == name)?;
                PatHead::EnumConstant(*ty, index)
            }
            CaseLabel::Boolean(value) => PatHead::Boolean(*value),
            CaseLabel::Constant(_) | CaseLabel::Default => return None,
        };

        Some(self.make_pat(DeconstructedPat::new(head, Fields::empty(), Some(span))))
    }
}
