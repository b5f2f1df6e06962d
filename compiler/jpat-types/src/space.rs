//! Type spaces: the shape of the set of values that a type can take.
use jpat_utils::{fxhash::FxHashSet, indexmap::IndexSet};

use crate::{hierarchy::TypeHierarchy, ty::TyId};

/// The decomposition of a type into the values it can take.
///
/// A sealed type is the union of the spaces of its permitted subtypes, a
/// record is the cross-product of the spaces of its components. Types that
/// cannot be decomposed any further are [TypeSpace::Unknown].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpace {
    /// An opaque type. A sealed class that is not abstract also appears as
    /// an opaque variant of itself, standing for its direct instances.
    Unknown(TyId),

    /// A sealed type, with one variant per permitted direct subtype.
    Sealed { ty: TyId, variants: Vec<TypeSpace> },

    /// A record, with one space per component in declaration order.
    Record { ty: TyId, components: Vec<TypeSpace> },

    /// An enum, partitioned by its constants.
    Enum { ty: TyId, constants: usize },

    /// `boolean` or `java.lang.Boolean`.
    Boolean(TyId),

    /// A type that is already being decomposed further up, reached again
    /// through a record component or a cyclic permits clause.
    Recursive(TyId),
}

impl TypeSpace {
    /// Decompose a type completely.
    pub fn of<H: TypeHierarchy + ?Sized>(hierarchy: &H, ty: TyId) -> Self {
        SpaceBuilder { hierarchy, decompose_records: true, path: FxHashSet::default() }.build(ty)
    }

    /// Decompose a type without descending into record components: every
    /// record component becomes [TypeSpace::Unknown] of its declared type.
    pub fn of_shallow<H: TypeHierarchy + ?Sized>(hierarchy: &H, ty: TyId) -> Self {
        SpaceBuilder { hierarchy, decompose_records: false, path: FxHashSet::default() }.build(ty)
    }

    /// The type that the space describes.
    pub fn ty(&self) -> TyId {
        match self {
            TypeSpace::Unknown(ty) | TypeSpace::Boolean(ty) | TypeSpace::Recursive(ty) => *ty,
            TypeSpace::Sealed { ty, .. } | TypeSpace::Record { ty, .. } | TypeSpace::Enum { ty, .. } => *ty,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, TypeSpace::Sealed { .. })
    }

    /// The distinct leaves of the space, in the order they are first
    /// reached. A type reachable through several sealed parents is only
    /// listed once.
    pub fn leaves(&self) -> Vec<&TypeSpace> {
        fn collect<'s>(space: &'s TypeSpace, seen: &mut IndexSet<TyId>, leaves: &mut Vec<&'s TypeSpace>) {
            match space {
                TypeSpace::Sealed { variants, .. } => {
                    for variant in variants {
                        collect(variant, seen, leaves);
                    }
                }
                leaf => {
                    if seen.insert(leaf.ty()) {
                        leaves.push(leaf);
                    }
                }
            }
        }

        let mut leaves = vec![];
        collect(self, &mut IndexSet::new(), &mut leaves);
        leaves
    }

    /// The types of the distinct leaves of the space.
    pub fn leaf_tys(&self) -> Vec<TyId> {
        self.leaves().into_iter().map(TypeSpace::ty).collect()
    }
}

struct SpaceBuilder<'h, H: ?Sized> {
    hierarchy: &'h H,
    decompose_records: bool,
    path: FxHashSet<TyId>,
}

impl<H: TypeHierarchy + ?Sized> SpaceBuilder<'_, H> {
    fn build(&mut self, ty: TyId) -> TypeSpace {
        if self.path.contains(&ty) {
            return TypeSpace::Recursive(ty);
        }

        let h = self.hierarchy;

        if h.is_boolean(ty) {
            return TypeSpace::Boolean(ty);
        }

        if let Some(constants) = h.enum_constants(ty) {
            return TypeSpace::Enum { ty, constants: constants.len() };
        }

        if let Some(components) = h.record_components(ty) {
            if !self.decompose_records {
                let components = components.iter().map(|component| TypeSpace::Unknown(component.ty)).collect();
                return TypeSpace::Record { ty, components };
            }

            self.path.insert(ty);
            let components = components.iter().map(|component| self.build(component.ty)).collect();
            self.path.remove(&ty);

            return TypeSpace::Record { ty, components };
        }

        if h.is_sealed(ty) {
            self.path.insert(ty);
            let mut variants: Vec<_> = h.permitted_subtypes(ty).iter().map(|sub| self.build(*sub)).collect();
            self.path.remove(&ty);

            if !h.is_abstract(ty) {
                variants.push(TypeSpace::Unknown(ty));
            }

            return TypeSpace::Sealed { ty, variants };
        }

        TypeSpace::Unknown(ty)
    }
}

#[cfg(test)]
mod test_super {
    use super::*;
    use crate::store::{TyDecl, TyStore};

    fn names(store: &TyStore, tys: &[TyId]) -> Vec<String> {
        tys.iter().map(|ty| store.name(*ty).to_string()).collect()
    }

    #[test]
    fn test_transitive_sealed_leaves() {
        let store = TyStore::from_decls([
            TyDecl::interface("lib.S").permits(["lib.A", "lib.T"]),
            TyDecl::class("lib.A").implements(["lib.S"]),
            TyDecl::interface("lib.T").implements(["lib.S"]).permits(["lib.B", "lib.C"]),
            TyDecl::class("lib.B").implements(["lib.T"]),
            TyDecl::record("lib.C", [("x", "int")]).implements(["lib.T"]),
        ])
        .unwrap();

        let space = TypeSpace::of(&store, store.lookup("lib.S").unwrap());
        assert_eq!(names(&store, &space.leaf_tys()), ["lib.A", "lib.B", "lib.C"]);
    }

    #[test]
    fn test_diamond_leaves_are_shared() {
        let store = TyStore::from_decls([
            TyDecl::interface("lib.I").permits(["lib.I1", "lib.I2", "lib.I3"]),
            TyDecl::interface("lib.I1").implements(["lib.I"]).sealed(),
            TyDecl::interface("lib.I2").implements(["lib.I"]).sealed(),
            TyDecl::interface("lib.I3").implements(["lib.I"]).sealed(),
            TyDecl::class("lib.C1").implements(["lib.I1", "lib.I2"]),
            TyDecl::class("lib.C2").implements(["lib.I3"]),
        ])
        .unwrap();

        let space = TypeSpace::of(&store, store.lookup("lib.I").unwrap());
        assert_eq!(names(&store, &space.leaf_tys()), ["lib.C1", "lib.C2"]);
    }

    #[test]
    fn test_sealed_concrete_class_is_its_own_variant() {
        let store = TyStore::from_decls([
            TyDecl::class("lib.P").sealed(),
            TyDecl::class("lib.Q").extends("lib.P"),
        ])
        .unwrap();

        let space = TypeSpace::of(&store, store.lookup("lib.P").unwrap());
        assert_eq!(names(&store, &space.leaf_tys()), ["lib.Q", "lib.P"]);
    }

    #[test]
    fn test_recursive_records() {
        let store = TyStore::from_decls([TyDecl::record(
            "lib.R",
            [("r1", "lib.R"), ("r2", "lib.R"), ("o", "java.lang.Object")],
        )])
        .unwrap();

        let r = store.lookup("lib.R").unwrap();
        let space = TypeSpace::of(&store, r);

        assert_eq!(
            space,
            TypeSpace::Record {
                ty: r,
                components: vec![
                    TypeSpace::Recursive(r),
                    TypeSpace::Recursive(r),
                    TypeSpace::Unknown(store.object()),
                ]
            }
        );
    }

    #[test]
    fn test_shallow_records() {
        let store = TyStore::from_decls([
            TyDecl::interface("lib.S").sealed(),
            TyDecl::class("lib.A").implements(["lib.S"]),
            TyDecl::record("lib.R", [("s", "lib.S")]),
        ])
        .unwrap();

        let r = store.lookup("lib.R").unwrap();
        let s = store.lookup("lib.S").unwrap();

        assert_eq!(
            TypeSpace::of_shallow(&store, r),
            TypeSpace::Record { ty: r, components: vec![TypeSpace::Unknown(s)] }
        );
        assert!(matches!(
            TypeSpace::of(&store, r),
            TypeSpace::Record { components, .. } if matches!(components[0], TypeSpace::Sealed { .. })
        ));
    }
}
