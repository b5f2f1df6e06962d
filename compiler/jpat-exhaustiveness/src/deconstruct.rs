//! Patterns as the usefulness algorithm sees them.
use std::fmt;

use jpat_source::location::Span;
use jpat_types::{hierarchy::TypeHierarchy, ty::TyId};

use crate::{
    fields::Fields,
    pats::WithHierarchy,
    storage::{DeconstructedPatId, DeconstructedPatStore},
    ExhaustivenessChecker,
};

/// What a [DeconstructedPat] tests at its own level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatHead {
    /// A type test. A type pattern whose type covers its column is a
    /// wildcard.
    Binding(TyId),

    /// A record deconstruction; the sub-patterns are the fields.
    Record(TyId),

    EnumConstant(TyId, usize),

    Boolean(bool),
}

/// A pattern lowered into a head and the patterns of its fields.
#[derive(Debug, Clone)]
pub struct DeconstructedPat {
    pub head: PatHead,
    pub fields: Fields,

    /// The span of the case that the pattern comes from, if the pattern was
    /// written by the user.
    pub span: Option<Span>,
}

impl DeconstructedPat {
    pub fn new(head: PatHead, fields: Fields, span: Option<Span>) -> Self {
        Self { head, fields, span }
    }

    /// A type pattern for the given type, without any sub-patterns.
    pub fn wildcard(ty: TyId) -> Self {
        Self::new(PatHead::Binding(ty), Fields::empty(), None)
    }
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// Get a printable view of a stored pattern.
    pub(crate) fn fmt_pat(&self, pat: DeconstructedPatId) -> WithHierarchy<'_, DeconstructedPatRef<'_>, H> {
        WithHierarchy::new(DeconstructedPatRef { id: pat, store: self.pats() }, self.hierarchy)
    }
}

/// A reference to a stored [DeconstructedPat] along with the store, used for
/// printing.
#[derive(Clone, Copy)]
pub struct DeconstructedPatRef<'a> {
    id: DeconstructedPatId,
    store: &'a DeconstructedPatStore,
}

impl<H: TypeHierarchy + ?Sized> fmt::Debug for WithHierarchy<'_, DeconstructedPatRef<'_>, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.item.store;
        let pat = &store[self.item.id];

        match pat.head {
            PatHead::Binding(ty) => write!(f, "{} _", self.hierarchy.name(ty)),
            PatHead::EnumConstant(ty, index) => {
                let name = self.hierarchy.enum_constants(ty).and_then(|constants| constants.get(index));
                write!(f, "{}.{}", self.hierarchy.name(ty), name.map_or("?", String::as_str))
            }
            PatHead::Boolean(value) => write!(f, "{value}"),
            PatHead::Record(ty) => {
                write!(f, "{}(", self.hierarchy.name(ty))?;

                for (index, field) in pat.fields.iter_patterns().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{:?}", self.with(DeconstructedPatRef { id: field, store }))?;
                }

                write!(f, ")")
            }
        }
    }
}
