//! The type-hierarchy oracle.
use jpat_utils::fxhash::FxHashSet;

use crate::ty::{PrimitiveTy, RecordComponent, Sealing, TyDef, TyId, TyKind};

/// Queries over a closed world of erased types. Implementors provide the
/// definitions, everything else is derived from them.
pub trait TypeHierarchy {
    /// Get the definition of a type.
    fn get(&self, ty: TyId) -> &TyDef;

    /// The type `java.lang.Object`.
    fn object(&self) -> TyId;

    /// The box class of a primitive type, e.g. `java.lang.Integer`.
    fn boxed(&self, primitive: PrimitiveTy) -> TyId;

    /// Look up a type by its fully-qualified name.
    fn lookup(&self, name: &str) -> Option<TyId>;

    fn name(&self, ty: TyId) -> &str {
        &self.get(ty).name
    }

    fn primitive(&self, ty: TyId) -> Option<PrimitiveTy> {
        match self.get(ty).kind {
            TyKind::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    /// The primitive type that a box class unboxes to.
    fn unboxed(&self, ty: TyId) -> Option<PrimitiveTy> {
        PrimitiveTy::ALL.into_iter().find(|primitive| self.boxed(*primitive) == ty)
    }

    fn is_sealed(&self, ty: TyId) -> bool {
        matches!(self.get(ty).sealing, Sealing::Sealed { .. })
    }

    /// Whether the type can have no instances of its own: interfaces and
    /// abstract classes.
    fn is_abstract(&self, ty: TyId) -> bool {
        matches!(self.get(ty).kind, TyKind::Interface | TyKind::Class { is_abstract: true })
    }

    fn is_record(&self, ty: TyId) -> bool {
        matches!(self.get(ty).kind, TyKind::Record { .. })
    }

    /// Whether the type is `boolean` or `java.lang.Boolean`.
    fn is_boolean(&self, ty: TyId) -> bool {
        self.primitive(ty) == Some(PrimitiveTy::Boolean) || self.unboxed(ty) == Some(PrimitiveTy::Boolean)
    }

    /// The permitted direct subtypes of a sealed type, empty otherwise.
    fn permitted_subtypes(&self, ty: TyId) -> &[TyId] {
        match &self.get(ty).sealing {
            Sealing::Sealed { permits } => permits,
            _ => &[],
        }
    }

    fn record_components(&self, ty: TyId) -> Option<&[RecordComponent]> {
        match &self.get(ty).kind {
            TyKind::Record { components } => Some(components),
            _ => None,
        }
    }

    fn enum_constants(&self, ty: TyId) -> Option<&[String]> {
        match &self.get(ty).kind {
            TyKind::Enum { constants } => Some(constants),
            _ => None,
        }
    }

    /// Whether `sub` is a subtype of `sup`. Subtyping is reflexive, and every
    /// reference type is a subtype of `java.lang.Object`. Primitive types are
    /// only subtypes of themselves.
    fn is_subtype(&self, sub: TyId, sup: TyId) -> bool {
        if sub == sup {
            return true;
        }

        if self.get(sub).is_primitive() || self.get(sup).is_primitive() {
            return false;
        }

        if sup == self.object() {
            return true;
        }

        let mut visited = FxHashSet::default();
        let mut queue = vec![sub];

        while let Some(current) = queue.pop() {
            if !visited.insert(current) {
                continue;
            }

            for &parent in &self.get(current).supertypes {
                if parent == sup {
                    return true;
                }

                queue.push(parent);
            }
        }

        false
    }

    /// Whether a type pattern of type `pat` matches every (non-null) value of
    /// static type `selector`.
    ///
    /// Reference types are related by subtyping. A primitive selector is
    /// covered by a primitive pattern it converts to exactly, or by a
    /// reference pattern that its box class is a subtype of. A boxed
    /// selector is covered by a primitive pattern that its unboxed type
    /// converts to exactly.
    fn pattern_covers(&self, selector: TyId, pat: TyId) -> bool {
        match (self.primitive(selector), self.primitive(pat)) {
            (Some(from), Some(to)) => from.is_unconditionally_exact(to),
            (Some(from), None) => self.is_subtype(self.boxed(from), pat),
            (None, Some(to)) => self.unboxed(selector).is_some_and(|from| from.is_unconditionally_exact(to)),
            (None, None) => self.is_subtype(selector, pat),
        }
    }

    /// Whether a switch over the type could be written before patterns were
    /// added to the language: `char`, `byte`, `short`, `int`, their boxes,
    /// `java.lang.String` and enums.
    fn is_legacy_switch_ty(&self, ty: TyId) -> bool {
        let is_legacy_primitive = |primitive: PrimitiveTy| {
            matches!(primitive, PrimitiveTy::Char | PrimitiveTy::Byte | PrimitiveTy::Short | PrimitiveTy::Int)
        };

        match &self.get(ty).kind {
            TyKind::Primitive(primitive) => is_legacy_primitive(*primitive),
            TyKind::Enum { .. } => true,
            _ => {
                self.get(ty).name == "java.lang.String"
                    || self.unboxed(ty).is_some_and(is_legacy_primitive)
            }
        }
    }
}
