//! In-memory storage for type definitions.
use derive_more::Display;
use jpat_utils::{
    fxhash::FxHashMap,
    index_vec::IndexVec,
    indexmap::IndexSet,
};

use crate::{
    hierarchy::TypeHierarchy,
    ty::{PrimitiveTy, RecordComponent, Sealing, TyDef, TyId, TyKind},
};

/// Errors that occur while building a [TyStore].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TyStoreError {
    #[display("type `{name}` is defined more than once")]
    Duplicate { name: String },

    #[display("cannot find type `{name}`")]
    Undefined { name: String },

    #[display("`{permitted}` is listed in the permits clause of `{sealed}` but does not directly extend it")]
    PermittedNotSubtype { sealed: String, permitted: String },

    #[display("`{subtype}` extends sealed type `{sealed}` but is not listed in its permits clause")]
    SubtypeNotPermitted { sealed: String, subtype: String },

    #[display("`{name}` cannot extend {kind} `{supertype}`")]
    InvalidSupertype { name: String, supertype: String, kind: &'static str },
}

impl TyStoreError {
    /// The name of the type that the error is about.
    pub fn subject(&self) -> &str {
        match self {
            TyStoreError::Duplicate { name }
            | TyStoreError::Undefined { name }
            | TyStoreError::InvalidSupertype { name, .. } => name,
            TyStoreError::PermittedNotSubtype { sealed, .. }
            | TyStoreError::SubtypeNotPermitted { sealed, .. } => sealed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TyDeclKind {
    Class { is_abstract: bool },
    Interface,
    /// Component names and type names, in declaration order.
    Record(Vec<(String, String)>),
    Enum(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SealingDecl {
    #[default]
    Open,
    /// A sealed type, with an explicit permits clause or none.
    Sealed(Option<Vec<String>>),
    NonSealed,
}

/// The declaration of a type, referring to other types by name. Names may
/// refer to types that are declared later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyDecl {
    pub name: String,
    pub kind: TyDeclKind,
    pub supertypes: Vec<String>,
    pub sealing: SealingDecl,
}

impl TyDecl {
    pub fn new(name: impl Into<String>, kind: TyDeclKind) -> Self {
        Self { name: name.into(), kind, supertypes: vec![], sealing: SealingDecl::Open }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TyDeclKind::Class { is_abstract: false })
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::new(name, TyDeclKind::Class { is_abstract: true })
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TyDeclKind::Interface)
    }

    pub fn record<N: Into<String>, T: Into<String>>(
        name: impl Into<String>,
        components: impl IntoIterator<Item = (N, T)>,
    ) -> Self {
        let components = components.into_iter().map(|(name, ty)| (name.into(), ty.into())).collect();
        Self::new(name, TyDeclKind::Record(components))
    }

    pub fn enumeration<C: Into<String>>(name: impl Into<String>, constants: impl IntoIterator<Item = C>) -> Self {
        Self::new(name, TyDeclKind::Enum(constants.into_iter().map(Into::into).collect()))
    }

    /// Add direct supertypes.
    pub fn implements<S: Into<String>>(mut self, supertypes: impl IntoIterator<Item = S>) -> Self {
        self.supertypes.extend(supertypes.into_iter().map(Into::into));
        self
    }

    /// Add a direct superclass.
    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Mark the type as sealed, permitting every type that directly extends
    /// it.
    pub fn sealed(mut self) -> Self {
        self.sealing = SealingDecl::Sealed(None);
        self
    }

    /// Mark the type as sealed with an explicit permits clause.
    pub fn permits<S: Into<String>>(mut self, permits: impl IntoIterator<Item = S>) -> Self {
        self.sealing = SealingDecl::Sealed(Some(permits.into_iter().map(Into::into).collect()));
        self
    }

    pub fn non_sealed(mut self) -> Self {
        self.sealing = SealingDecl::NonSealed;
        self
    }
}

/// Stores every type of a closed world. The `java.lang` types that switches
/// commonly use, the primitive types and their boxes are always present.
#[derive(Debug, Clone)]
pub struct TyStore {
    defs: IndexVec<TyId, TyDef>,
    names: FxHashMap<String, TyId>,

    /// Types that have been referred to but not yet defined.
    pending: IndexSet<TyId>,

    /// Sealed types whose permits clause is derived from their subtypes.
    inferred_permits: Vec<TyId>,

    object: TyId,
    primitives: [TyId; 8],
    boxes: [TyId; 8],
}

impl Default for TyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TyStore {
    pub fn new() -> Self {
        let mut store = Self {
            defs: IndexVec::new(),
            names: FxHashMap::default(),
            pending: IndexSet::new(),
            inferred_permits: vec![],
            object: TyId::from_raw(0),
            primitives: [TyId::from_raw(0); 8],
            boxes: [TyId::from_raw(0); 8],
        };

        let class = TyKind::Class { is_abstract: false };
        store.object = store.define_builtin("java.lang.Object", class.clone(), vec![]);
        store.define_builtin("java.lang.String", class.clone(), vec![]);
        let number = store.define_builtin("java.lang.Number", TyKind::Class { is_abstract: true }, vec![]);

        for (index, primitive) in PrimitiveTy::ALL.into_iter().enumerate() {
            store.primitives[index] = store.define_builtin(primitive.name(), TyKind::Primitive(primitive), vec![]);

            let supertypes = if primitive.is_numeric() { vec![number] } else { vec![] };
            store.boxes[index] = store.define_builtin(primitive.box_name(), class.clone(), supertypes);
        }

        store
    }

    /// Build a store from a list of declarations.
    pub fn from_decls(decls: impl IntoIterator<Item = TyDecl>) -> Result<Self, Vec<TyStoreError>> {
        let mut store = Self::new();
        let mut errors = vec![];

        for decl in decls {
            if let Err(err) = store.add(decl) {
                errors.push(err);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        store.finish()?;
        Ok(store)
    }

    fn define_builtin(&mut self, name: &str, kind: TyKind, supertypes: Vec<TyId>) -> TyId {
        let id = self.defs.push(TyDef { name: name.to_string(), kind, supertypes, sealing: Sealing::Open });
        self.names.insert(name.to_string(), id);
        id
    }

    /// Get the [TyId] for a name, creating an undefined placeholder if the
    /// name has not been seen yet.
    pub fn reserve(&mut self, name: &str) -> TyId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }

        let id = self.defs.push(TyDef {
            name: name.to_string(),
            kind: TyKind::Class { is_abstract: false },
            supertypes: vec![],
            sealing: Sealing::Open,
        });

        self.names.insert(name.to_string(), id);
        self.pending.insert(id);
        id
    }

    /// Define a type.
    pub fn add(&mut self, decl: TyDecl) -> Result<TyId, TyStoreError> {
        let id = self.reserve(&decl.name);

        if !self.pending.shift_remove(&id) {
            return Err(TyStoreError::Duplicate { name: decl.name });
        }

        let kind = match decl.kind {
            TyDeclKind::Class { is_abstract } => TyKind::Class { is_abstract },
            TyDeclKind::Interface => TyKind::Interface,
            TyDeclKind::Record(components) => TyKind::Record {
                components: components
                    .into_iter()
                    .map(|(name, ty)| RecordComponent { ty: self.reserve(&ty), name })
                    .collect(),
            },
            TyDeclKind::Enum(constants) => TyKind::Enum { constants },
        };

        let supertypes = decl.supertypes.iter().map(|name| self.reserve(name)).collect();

        let sealing = match decl.sealing {
            SealingDecl::Open => Sealing::Open,
            SealingDecl::NonSealed => Sealing::NonSealed,
            SealingDecl::Sealed(Some(permits)) => {
                Sealing::Sealed { permits: permits.iter().map(|name| self.reserve(name)).collect() }
            }
            SealingDecl::Sealed(None) => {
                self.inferred_permits.push(id);
                Sealing::Sealed { permits: vec![] }
            }
        };

        self.defs[id] = TyDef { name: decl.name, kind, supertypes, sealing };
        Ok(id)
    }

    /// Complete the store once every declaration has been added: fill in
    /// inferred permits clauses and check that the hierarchy is well formed.
    pub fn finish(&mut self) -> Result<(), Vec<TyStoreError>> {
        let mut errors: Vec<_> = self
            .pending
            .iter()
            .map(|id| TyStoreError::Undefined { name: self.defs[*id].name.clone() })
            .collect();

        for sealed in std::mem::take(&mut self.inferred_permits) {
            let permits = self.defs.indices().filter(|id| self.defs[*id].supertypes.contains(&sealed)).collect();
            self.defs[sealed].sealing = Sealing::Sealed { permits };
        }

        for (id, def) in self.defs.iter_enumerated() {
            for &supertype in &def.supertypes {
                let super_def = &self.defs[supertype];

                if !matches!(super_def.kind, TyKind::Class { .. } | TyKind::Interface) {
                    errors.push(TyStoreError::InvalidSupertype {
                        name: def.name.clone(),
                        supertype: super_def.name.clone(),
                        kind: super_def.kind.describe(),
                    });
                }

                if let Sealing::Sealed { permits } = &super_def.sealing {
                    if !permits.contains(&id) {
                        errors.push(TyStoreError::SubtypeNotPermitted {
                            sealed: super_def.name.clone(),
                            subtype: def.name.clone(),
                        });
                    }
                }
            }

            if let Sealing::Sealed { permits } = &def.sealing {
                for &permitted in permits {
                    if !self.defs[permitted].supertypes.contains(&id) {
                        errors.push(TyStoreError::PermittedNotSubtype {
                            sealed: def.name.clone(),
                            permitted: self.defs[permitted].name.clone(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn primitive_ty(&self, primitive: PrimitiveTy) -> TyId {
        self.primitives[primitive as usize]
    }

    /// Iterate over every defined type.
    pub fn iter(&self) -> impl Iterator<Item = (TyId, &TyDef)> + '_ {
        self.defs.iter_enumerated()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl TypeHierarchy for TyStore {
    fn get(&self, ty: TyId) -> &TyDef {
        &self.defs[ty]
    }

    fn object(&self) -> TyId {
        self.object
    }

    fn boxed(&self, primitive: PrimitiveTy) -> TyId {
        self.boxes[primitive as usize]
    }

    fn lookup(&self, name: &str) -> Option<TyId> {
        self.names.get(name).copied()
    }
}

#[cfg(test)]
mod test_super {
    use super::*;

    fn store() -> TyStore {
        TyStore::from_decls([
            TyDecl::interface("lib.S").permits(["lib.A", "lib.B"]),
            TyDecl::class("lib.A").implements(["lib.S"]),
            TyDecl::abstract_class("lib.B").implements(["lib.S"]).sealed(),
            TyDecl::class("lib.B1").extends("lib.B"),
            TyDecl::class("lib.B2").extends("lib.B"),
            TyDecl::record("lib.R", [("s", "lib.S"), ("i", "int")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_subtyping() {
        let store = store();
        let s = store.lookup("lib.S").unwrap();
        let b1 = store.lookup("lib.B1").unwrap();
        let a = store.lookup("lib.A").unwrap();

        assert!(store.is_subtype(b1, s));
        assert!(store.is_subtype(a, a));
        assert!(store.is_subtype(s, store.object()));
        assert!(!store.is_subtype(a, b1));
        assert!(!store.is_subtype(store.primitive_ty(PrimitiveTy::Int), store.object()));
    }

    #[test]
    fn test_inferred_permits() {
        let store = store();
        let b = store.lookup("lib.B").unwrap();
        let names: Vec<_> = store.permitted_subtypes(b).iter().map(|ty| store.name(*ty)).collect();

        assert_eq!(names, ["lib.B1", "lib.B2"]);
    }

    #[test]
    fn test_record_components() {
        let store = store();
        let r = store.lookup("lib.R").unwrap();
        let components = store.record_components(r).unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(store.name(components[0].ty), "lib.S");
        assert_eq!(store.primitive(components[1].ty), Some(PrimitiveTy::Int));
    }

    #[test]
    fn test_primitive_coverage() {
        let store = TyStore::new();
        let int = store.primitive_ty(PrimitiveTy::Int);
        let long = store.primitive_ty(PrimitiveTy::Long);
        let float = store.primitive_ty(PrimitiveTy::Float);
        let integer = store.boxed(PrimitiveTy::Int);
        let number = store.lookup("java.lang.Number").unwrap();

        assert!(store.pattern_covers(int, long));
        assert!(!store.pattern_covers(int, float));
        assert!(!store.pattern_covers(long, int));
        assert!(store.pattern_covers(int, integer));
        assert!(store.pattern_covers(int, number));
        assert!(store.pattern_covers(int, store.object()));
        assert!(store.pattern_covers(integer, int));
        assert!(store.pattern_covers(integer, long));
        assert!(!store.pattern_covers(number, int));
    }

    #[test]
    fn test_legacy_switch_types() {
        let store = TyStore::new();

        assert!(store.is_legacy_switch_ty(store.primitive_ty(PrimitiveTy::Char)));
        assert!(store.is_legacy_switch_ty(store.boxed(PrimitiveTy::Short)));
        assert!(store.is_legacy_switch_ty(store.lookup("java.lang.String").unwrap()));
        assert!(!store.is_legacy_switch_ty(store.primitive_ty(PrimitiveTy::Long)));
        assert!(!store.is_legacy_switch_ty(store.primitive_ty(PrimitiveTy::Boolean)));
        assert!(!store.is_legacy_switch_ty(store.object()));
    }

    #[test]
    fn test_store_errors() {
        let errors = TyStore::from_decls([
            TyDecl::interface("lib.S").permits(["lib.A"]),
            TyDecl::class("lib.A"),
            TyDecl::class("lib.C").implements(["lib.S"]),
            TyDecl::class("lib.C"),
            TyDecl::record("lib.R", [("x", "lib.Missing")]),
        ])
        .unwrap_err();

        assert_eq!(errors, vec![TyStoreError::Duplicate { name: "lib.C".to_string() }]);

        let errors = TyStore::from_decls([
            TyDecl::interface("lib.S").permits(["lib.A"]),
            TyDecl::class("lib.A"),
            TyDecl::class("lib.C").implements(["lib.S"]),
            TyDecl::record("lib.R", [("x", "lib.Missing")]),
        ])
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                TyStoreError::Undefined { name: "lib.Missing".to_string() },
                TyStoreError::PermittedNotSubtype {
                    sealed: "lib.S".to_string(),
                    permitted: "lib.A".to_string()
                },
                TyStoreError::SubtypeNotPermitted {
                    sealed: "lib.S".to_string(),
                    subtype: "lib.C".to_string()
                },
            ]
        );
    }
}
