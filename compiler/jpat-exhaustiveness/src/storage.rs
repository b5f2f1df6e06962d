//! Stores [DeconstructedPat]s and the per-check caches of the checker.
use std::rc::Rc;

use jpat_types::{hierarchy::TypeHierarchy, space::TypeSpace, ty::TyId};
use jpat_utils::{
    fxhash::FxHashMap,
    index_vec::{define_index_type, IndexVec},
};

use crate::{deconstruct::DeconstructedPat, ExhaustivenessChecker, TooComplex};

define_index_type! {
    /// Id of a [DeconstructedPat] in the [ExhaustivenessCtx].
    pub struct DeconstructedPatId = u32;

    MAX_INDEX = i32::MAX as usize;
    DISABLE_MAX_INDEX_CHECK = cfg!(not(debug_assertions));
}

pub type DeconstructedPatStore = IndexVec<DeconstructedPatId, DeconstructedPat>;

/// Intermediate data of the checker. Patterns and the base-check counter
/// belong to the switch being checked, type spaces are kept for the
/// lifetime of the checker.
#[derive(Debug, Default)]
pub(crate) struct ExhaustivenessCtx {
    /// The [DeconstructedPat] store.
    pub(crate) dp: DeconstructedPatStore,

    /// Shallow type spaces of column types.
    pub(crate) spaces: FxHashMap<TyId, Rc<TypeSpace>>,

    /// A wildcard pattern per column type, shared between the rows that
    /// need one.
    pub(crate) wildcards: FxHashMap<TyId, DeconstructedPatId>,

    /// The number of base checks made for the current selector component.
    pub(crate) base_checks: usize,
}

impl ExhaustivenessCtx {
    /// Create a new [ExhaustivenessCtx].
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the patterns of the previous switch.
    pub(crate) fn reset(&mut self) {
        self.dp.clear();
        self.wildcards.clear();
        self.base_checks = 0;
    }
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    pub(crate) fn get_pat(&self, id: DeconstructedPatId) -> &DeconstructedPat {
        &self.ecx.dp[id]
    }

    pub(crate) fn pats(&self) -> &DeconstructedPatStore {
        &self.ecx.dp
    }

    pub(crate) fn make_pat(&mut self, deconstructed_pat: DeconstructedPat) -> DeconstructedPatId {
        self.ecx.dp.push(deconstructed_pat)
    }

    /// The shared wildcard pattern of a column type.
    pub(crate) fn wildcard_pat(&mut self, ty: TyId) -> DeconstructedPatId {
        if let Some(pat) = self.ecx.wildcards.get(&ty) {
            return *pat;
        }

        let pat = self.make_pat(DeconstructedPat::wildcard(ty));
        self.ecx.wildcards.insert(ty, pat);
        pat
    }

    /// The shallow type space of a column type.
    pub(crate) fn space_of(&mut self, ty: TyId) -> Rc<TypeSpace> {
        let hierarchy = self.hierarchy;
        self.ecx.spaces.entry(ty).or_insert_with(|| Rc::new(TypeSpace::of_shallow(hierarchy, ty))).clone()
    }

    /// Count a base check against the configured ceiling.
    pub(crate) fn base_check(&mut self, count: usize) -> Result<(), TooComplex> {
        self.ecx.base_checks = self.ecx.base_checks.saturating_add(count);

        if self.ecx.base_checks > self.settings.max_base_checks {
            return Err(TooComplex);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test_super {
    use jpat_source::location::Span;
    use jpat_types::store::{TyDecl, TyStore};

    use super::*;
    use crate::{
        pats::{CaseLabel, Pattern, Selector, Switch, SwitchCase, SwitchKind},
        ExhaustivenessSettings,
    };

    #[test]
    fn test_patterns_are_dropped_between_switches() {
        let store = TyStore::from_decls([
            TyDecl::interface("lib.S").permits(["lib.A", "lib.B"]),
            TyDecl::class("lib.A").implements(["lib.S"]),
            TyDecl::class("lib.B").implements(["lib.S"]),
        ])
        .unwrap();

        let case = |name: &str| {
            SwitchCase::new(vec![CaseLabel::Pattern(Pattern::binding(store.lookup(name).unwrap()))], Span::new(1, 2))
        };
        let switch = Switch {
            selector: Selector::new(store.lookup("lib.S").unwrap()),
            kind: SwitchKind::Expression,
            cases: vec![case("lib.A"), case("lib.B")],
            span: Span::new(0, 10),
        };

        let mut checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());
        let first = checker.check_switch(&switch);
        let pats = checker.pats().len();
        let second = checker.check_switch(&switch);

        assert_eq!(first, second);
        assert_eq!(checker.pats().len(), pats);
    }
}
