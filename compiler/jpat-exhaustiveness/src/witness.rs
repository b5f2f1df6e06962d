//! Witnesses of non-exhaustiveness: patterns describing values that no case
//! label matches, e.g. `lib.R(lib.B _)`.
use std::fmt;

use jpat_types::{hierarchy::TypeHierarchy, space::TypeSpace, ty::TyId};
use jpat_utils::{fxhash::FxHashSet, itertools::Itertools};

use crate::{construct::DeconstructedCtor, pats::WithHierarchy, ExhaustivenessChecker};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WitnessPat {
    /// Any value of the type, `T _`.
    Wild(TyId),

    /// A record with witnesses for its components.
    Record(TyId, Vec<WitnessPat>),

    EnumConstant(TyId, usize),

    Boolean(bool),
}

/// A row of witness patterns, one per column of the matrix it was computed
/// for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness(pub Vec<WitnessPat>);

impl Witness {
    /// A witness of wildcards for the given column types.
    pub fn wildcards(tys: &[TyId]) -> Self {
        Witness(tys.iter().map(|ty| WitnessPat::Wild(*ty)).collect())
    }

    /// Prepend a pattern for a new first column.
    pub fn with_head(&self, head: WitnessPat) -> Self {
        Witness(std::iter::once(head).chain(self.0.iter().cloned()).collect())
    }

    /// The pattern of a witness that has exactly one column.
    pub fn single_pat(self) -> Option<WitnessPat> {
        self.0.into_iter().exactly_one().ok()
    }
}

impl<H: TypeHierarchy + ?Sized> fmt::Display for WithHierarchy<'_, &WitnessPat, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.hierarchy;

        match self.item {
            WitnessPat::Wild(ty) => write!(f, "{} _", h.name(*ty)),
            WitnessPat::Record(ty, fields) => {
                write!(f, "{}({})", h.name(*ty), fields.iter().map(|field| self.with(field)).format(", "))
            }
            WitnessPat::EnumConstant(ty, index) => {
                let name = h.enum_constants(*ty).and_then(|constants| constants.get(*index));
                write!(f, "{}.{}", h.name(*ty), name.map_or("?", String::as_str))
            }
            WitnessPat::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// Describe a set of constructors of a column with as few patterns as
    /// possible. A node of the column's type space whose constructors are
    /// all in the set is described by a single wildcard of its type, and a
    /// constructor that is reachable through several sealed parents is only
    /// described once. A pattern whose constructors are all described by
    /// another pattern is dropped, so the result does not depend on the
    /// order of `permits` clauses.
    pub(crate) fn collapse_ctors(&mut self, ty: TyId, ctors: &[DeconstructedCtor]) -> Vec<WitnessPat> {
        let space = self.space_of(ty);
        let set: FxHashSet<_> = ctors.iter().copied().collect();

        let mut described = FxHashSet::default();
        let mut described_by = vec![];
        self.collapse_space(&space, &set, &mut described, &mut described_by);

        let subsumed = |index: usize| {
            let (_, ctors) = &described_by[index];

            described_by.iter().enumerate().any(|(other, (_, other_ctors))| {
                other != index
                    && ctors.is_subset(other_ctors)
                    && (ctors.len() < other_ctors.len() || other < index)
            })
        };

        (0..described_by.len())
            .filter(|index| !subsumed(*index))
            .map(|index| described_by[index].0.clone())
            .collect()
    }

    fn collapse_space(
        &self,
        space: &TypeSpace,
        set: &FxHashSet<DeconstructedCtor>,
        described: &mut FxHashSet<DeconstructedCtor>,
        described_by: &mut Vec<(WitnessPat, FxHashSet<DeconstructedCtor>)>,
    ) {
        let below = self.space_ctors(space);

        if below.iter().all(|ctor| described.contains(ctor)) {
            return;
        }

        // The node is wholly in the set.
        if below.iter().all(|ctor| set.contains(ctor)) {
            described.extend(below.iter().copied());
            described_by.push((WitnessPat::Wild(space.ty()), below.into_iter().collect()));
            return;
        }

        match space {
            TypeSpace::Sealed { variants, .. } => {
                for variant in variants {
                    self.collapse_space(variant, set, described, described_by);
                }
            }
            _ => {
                for ctor in below {
                    if set.contains(&ctor) && described.insert(ctor) {
                        described_by.push((self.ctor_witness(ctor), FxHashSet::from_iter([ctor])));
                    }
                }
            }
        }
    }

    /// The witness pattern for a single constructor without any detail
    /// about its fields.
    fn ctor_witness(&self, ctor: DeconstructedCtor) -> WitnessPat {
        match ctor {
            DeconstructedCtor::Record(ty) | DeconstructedCtor::Opaque(ty) => WitnessPat::Wild(ty),
            DeconstructedCtor::EnumConstant(ty, index) => WitnessPat::EnumConstant(ty, index),
            DeconstructedCtor::Boolean(_, value) => WitnessPat::Boolean(value),
        }
    }

    /// Rebuild a witness for the matrix before it was specialised by `ctor`:
    /// the first `arity` patterns become the fields of the constructor.
    pub(crate) fn apply_ctor(&self, ctor: DeconstructedCtor, witness: &Witness) -> Witness {
        let arity = self.ctor_arity(ctor);
        let (fields, rest) = witness.0.split_at(arity.min(witness.0.len()));

        let head = match ctor {
            DeconstructedCtor::Record(ty) => WitnessPat::Record(ty, fields.to_vec()),
            _ => self.ctor_witness(ctor),
        };

        Witness(std::iter::once(head).chain(rest.iter().cloned()).collect())
    }

    /// Get a printable view of a witness pattern.
    pub fn fmt_witness<'a>(&'a self, pat: &'a WitnessPat) -> WithHierarchy<'a, &'a WitnessPat, H> {
        WithHierarchy::new(pat, self.hierarchy)
    }
}
