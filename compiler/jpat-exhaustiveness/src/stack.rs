//! Exhaustiveness stack data structure, which is used to represent
//! [super::matrix::Matrix] rows.
use jpat_types::hierarchy::TypeHierarchy;
use jpat_utils::smallvec::{smallvec, SmallVec};

use crate::{
    construct::DeconstructedCtor, deconstruct::PatHead, storage::DeconstructedPatId, ExhaustivenessChecker,
};

/// A row of a [super::matrix::Matrix]. Rows of len 1 are very common, which is
/// why `SmallVec[_; 2]` works well.
#[derive(Clone, Debug)]
pub struct PatStack {
    /// The stored patterns in the row.
    pub pats: SmallVec<[DeconstructedPatId; 2]>,
}

impl PatStack {
    /// Construct a [PatStack] with a single pattern.
    pub fn singleton(pat: DeconstructedPatId) -> Self {
        Self::from_vec(smallvec![pat])
    }

    /// Construct a [PatStack] from a [SmallVec].
    pub fn from_vec(vec: SmallVec<[DeconstructedPatId; 2]>) -> Self {
        PatStack { pats: vec }
    }

    /// Get the head of the current [PatStack]
    pub fn head(&self) -> DeconstructedPatId {
        self.pats[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeconstructedPatId> {
        self.pats.iter()
    }
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// The sub-patterns that a pattern contributes when it is specialised
    /// by a constructor that it covers. A record pattern gives its nested
    /// patterns, a type pattern gives a wildcard per record component.
    fn specialise(&mut self, pat: DeconstructedPatId, ctor: DeconstructedCtor) -> SmallVec<[DeconstructedPatId; 2]> {
        let pat = self.get_pat(pat);

        match (pat.head, ctor) {
            (PatHead::Record(_), DeconstructedCtor::Record(_)) => pat.fields.iter_patterns().collect(),
            (_, DeconstructedCtor::Record(_)) => {
                let field_tys = self.ctor_field_tys(ctor);
                field_tys.into_iter().map(|ty| self.wildcard_pat(ty)).collect()
            }
            _ => smallvec![],
        }
    }

    /// This computes `S(ctor, stack)`: replace the head of the [PatStack] by
    /// the result of specialising it with `ctor`, keeping the rest of the
    /// row.
    pub(crate) fn pop_head_ctor(&mut self, stack: &PatStack, ctor: DeconstructedCtor) -> PatStack {
        let mut new_fields = self.specialise(stack.head(), ctor);
        new_fields.extend_from_slice(&stack.pats[1..]);

        PatStack::from_vec(new_fields)
    }
}
