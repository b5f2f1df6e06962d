//! Constructors: the values that a column of the pattern matrix is split
//! into. They are the leaves of the column type's
//! [jpat_types::space::TypeSpace].
use jpat_types::{hierarchy::TypeHierarchy, ty::TyId};

use crate::{deconstruct::PatHead, ExhaustivenessChecker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeconstructedCtor {
    /// A record, with a field per component.
    Record(TyId),

    /// A type whose values are not decomposed any further.
    Opaque(TyId),

    /// The constant of an enum, by declaration index.
    EnumConstant(TyId, usize),

    /// `true` or `false` of a `boolean` or `java.lang.Boolean` column.
    Boolean(TyId, bool),
}

impl DeconstructedCtor {
    /// The type of the values that the constructor stands for.
    pub fn ty(&self) -> TyId {
        match self {
            DeconstructedCtor::Record(ty)
            | DeconstructedCtor::Opaque(ty)
            | DeconstructedCtor::EnumConstant(ty, _)
            | DeconstructedCtor::Boolean(ty, _) => *ty,
        }
    }
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// The number of fields of a constructor.
    pub(crate) fn ctor_arity(&self, ctor: DeconstructedCtor) -> usize {
        match ctor {
            DeconstructedCtor::Record(ty) => self.record_components(ty).map_or(0, |components| components.len()),
            _ => 0,
        }
    }

    /// The types of the fields of a constructor.
    pub(crate) fn ctor_field_tys(&self, ctor: DeconstructedCtor) -> Vec<TyId> {
        match ctor {
            DeconstructedCtor::Record(ty) => self
                .record_components(ty)
                .map(|components| components.iter().map(|component| component.ty).collect())
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    /// Whether a pattern with the given head matches every value that the
    /// constructor stands for.
    pub(crate) fn is_ctor_covered_by(&self, ctor: DeconstructedCtor, head: PatHead) -> bool {
        match (head, ctor) {
            (PatHead::Binding(pat_ty), ctor) => self.pattern_covers(ctor.ty(), pat_ty),
            (PatHead::Record(pat_ty), DeconstructedCtor::Record(ty)) => pat_ty == ty,
            (PatHead::EnumConstant(pat_ty, pat_index), DeconstructedCtor::EnumConstant(ty, index)) => {
                pat_ty == ty && pat_index == index
            }
            (PatHead::Boolean(pat_value), DeconstructedCtor::Boolean(_, value)) => pat_value == value,
            _ => false,
        }
    }
}
