//! Dominance of case labels.
//!
//! A label is dominated when an earlier label matches every value that it
//! matches, so it can never be selected:
//!
//! - a type pattern of type `T` dominates a pattern whose type `T` is
//!   unconditional for,
//! - a record pattern dominates a record pattern of the same record type
//!   when each of its nested patterns dominates the corresponding nested
//!   pattern,
//! - a record pattern never dominates a type pattern.
//!
//! Only labels of cases without a guard (or with a constant `true` guard)
//! dominate pattern labels. Constant labels are dominated by any earlier
//! type pattern that covers their type, guarded or not. An enum constant has
//! its enum type, `true` and `false` are `java.lang.Boolean`, and any other
//! constant has the selector type, boxed if it is primitive.
use jpat_reporting::diagnostic::Diagnostics;
use jpat_types::{
    hierarchy::TypeHierarchy,
    ty::{PrimitiveTy, TyId},
};
use jpat_utils::log;

use crate::{
    diagnostics::ExhaustivenessError,
    labels::{CheckedLabels, LabelId},
    pats::{CaseLabel, Pattern, Switch, WithHierarchy},
    ExhaustivenessChecker,
};

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// Whether the pattern `dominating` matches every value that `pat`
    /// matches, where both appear in a position of type `ty`.
    pub fn pattern_dominates(&self, dominating: &Pattern, pat: &Pattern, ty: TyId) -> bool {
        match (dominating, pat) {
            (Pattern::Record { ty: lhs, nested: lhs_nested }, Pattern::Record { ty: rhs, nested: rhs_nested }) => {
                if lhs != rhs {
                    return false;
                }

                let Some(components) = self.record_components(*lhs) else {
                    return false;
                };

                lhs_nested
                    .iter()
                    .zip(rhs_nested)
                    .zip(components)
                    .all(|((lhs, rhs), component)| self.pattern_dominates(lhs, rhs, component.ty))
            }
            (Pattern::Record { .. }, _) => false,
            (Pattern::Binding { ty: dominating_ty, .. }, pat) => {
                self.pattern_covers(pat.ty().unwrap_or(ty), *dominating_ty)
            }
            (Pattern::Any, pat) => self.pattern_covers(pat.ty().unwrap_or(ty), ty),
        }
    }

    /// Whether the pattern label `dominating` dominates the constant label
    /// `label` of a switch over `selector`.
    fn dominates_constant(&self, dominating: &Pattern, label: &CaseLabel, selector: TyId) -> bool {
        let Pattern::Binding { ty: dominating_ty, .. } = dominating else {
            return false;
        };

        let constant_ty = match label {
            CaseLabel::EnumConstant { ty, .. } => *ty,
            CaseLabel::Boolean(_) => self.boxed(PrimitiveTy::Boolean),
            CaseLabel::Constant(_) => self.primitive(selector).map_or(selector, |primitive| self.boxed(primitive)),
            CaseLabel::Pattern(_) | CaseLabel::Default => return false,
        };

        self.pattern_covers(constant_ty, *dominating_ty)
    }

    /// Report every live label that is dominated by an earlier live label of
    /// an earlier case, and return the dominated labels.
    pub(crate) fn check_dominance(&mut self, switch: &Switch, labels: &CheckedLabels) -> Vec<LabelId> {
        let selector = switch.selector.primary();
        let mut dominated = vec![];

        for (index, later) in labels.live.iter().enumerate() {
            let label = later.get(switch);

            let dominator = labels.live[..index].iter().find(|earlier| {
                if earlier.case == later.case {
                    return false;
                }

                let CaseLabel::Pattern(dominating) = earlier.get(switch) else {
                    return false;
                };

                match label {
                    CaseLabel::Pattern(pat) => {
                        switch.cases[earlier.case].guard.is_unconditional()
                            && self.pattern_dominates(dominating, pat, selector)
                    }
                    label => self.dominates_constant(dominating, label, selector),
                }
            });

            if let Some(earlier) = dominator {
                let label = WithHierarchy::new(label, self.hierarchy).to_string();
                let dominating_label = WithHierarchy::new(earlier.get(switch), self.hierarchy).to_string();

                log::debug!("`{label}` is dominated by `{dominating_label}`");

                self.diagnostics.add_error(ExhaustivenessError::PatternDominated {
                    location: switch.cases[later.case].span,
                    label,
                    dominating_location: switch.cases[earlier.case].span,
                    dominating_label,
                });

                dominated.push(*later);
            }
        }

        dominated
    }
}

#[cfg(test)]
mod test_super {
    use jpat_types::store::{TyDecl, TyStore};

    use super::*;
    use crate::ExhaustivenessSettings;

    fn store() -> TyStore {
        TyStore::from_decls([
            TyDecl::interface("lib.S").permits(["lib.A", "lib.B"]),
            TyDecl::class("lib.A").implements(["lib.S"]),
            TyDecl::class("lib.B").implements(["lib.S"]),
            TyDecl::record("lib.R", [("s", "lib.S"), ("t", "lib.S")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_type_pattern_dominance() {
        let store = store();
        let checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());
        let ty = |name| store.lookup(name).unwrap();

        let object = Pattern::binding(store.object());
        let s = Pattern::binding(ty("lib.S"));
        let a = Pattern::binding(ty("lib.A"));
        let r = Pattern::record(ty("lib.R"), [Pattern::Any, Pattern::binding(ty("lib.A"))]);

        assert!(checker.pattern_dominates(&object, &s, store.object()));
        assert!(checker.pattern_dominates(&s, &a, store.object()));
        assert!(!checker.pattern_dominates(&a, &s, store.object()));
        assert!(checker.pattern_dominates(&object, &r, store.object()));
        assert!(!checker.pattern_dominates(&r, &Pattern::binding(ty("lib.R")), store.object()));
    }

    #[test]
    fn test_record_pattern_dominance() {
        let store = store();
        let checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());
        let ty = |name| store.lookup(name).unwrap();

        let wide = Pattern::record(ty("lib.R"), [Pattern::Any, Pattern::binding(ty("lib.S"))]);
        let narrow = Pattern::record(ty("lib.R"), [Pattern::binding(ty("lib.B")), Pattern::binding(ty("lib.A"))]);

        assert!(checker.pattern_dominates(&wide, &narrow, ty("lib.R")));
        assert!(!checker.pattern_dominates(&narrow, &wide, ty("lib.R")));
    }

    #[test]
    fn test_constant_dominance() {
        let store = store();
        let checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());
        let string = store.lookup("java.lang.String").unwrap();
        let int = store.primitive_ty(PrimitiveTy::Int);
        let integer = store.boxed(PrimitiveTy::Int);
        let constant = CaseLabel::Constant("1".to_string());

        assert!(checker.dominates_constant(&Pattern::binding(string), &constant, string));
        assert!(checker.dominates_constant(&Pattern::binding(store.object()), &constant, string));
        assert!(checker.dominates_constant(&Pattern::binding(integer), &constant, int));
        assert!(checker.dominates_constant(&Pattern::binding(int), &constant, integer));
        assert!(!checker.dominates_constant(&Pattern::binding(store.lookup("lib.A").unwrap()), &constant, string));
        assert!(!checker.dominates_constant(&Pattern::Any, &constant, string));
    }
}
