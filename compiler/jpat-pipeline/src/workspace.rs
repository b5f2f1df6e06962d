//! JSON workspaces: a closed world of type declarations and the switches
//! that are checked against it.
//!
//! ```json
//! {
//!     "types": [
//!         { "name": "lib.S", "kind": "interface", "permits": ["lib.A", "lib.B"] },
//!         { "name": "lib.A", "kind": "record", "supertypes": ["lib.S"] },
//!         { "name": "lib.B", "kind": "record", "supertypes": ["lib.S"] },
//!         { "name": "lib.R", "kind": "record", "components": [{ "name": "s", "type": "lib.S" }] }
//!     ],
//!     "switches": [
//!         {
//!             "name": "partial",
//!             "selector": "lib.R",
//!             "cases": [{ "labels": [{ "pattern": { "record": "lib.R", "nested": [{ "binding": "lib.A" }] } }] }]
//!         }
//!     ]
//! }
//! ```
//!
//! Types are referred to by their fully qualified name, `java.lang.Object`,
//! `java.lang.String`, `java.lang.Number`, the primitive types and their
//! boxes are always available. Spans are optional, a switch defaults to
//! `0:0` and its `n`-th case to `n:n`.
use std::path::Path;

use jpat_exhaustiveness::pats::{CaseLabel, Guard, Pattern, Selector, Switch, SwitchCase, SwitchKind};
use jpat_source::location::Span;
use jpat_types::{
    hierarchy::TypeHierarchy,
    store::{SealingDecl, TyDecl, TyDeclKind, TyStore},
    ty::TyId,
};
use serde::Deserialize;

use crate::error::PipelineError;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceDecl {
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    #[serde(default)]
    pub switches: Vec<SwitchDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKindDecl {
    Class,
    AbstractClass,
    Interface,
    Record,
    Enum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKindDecl,

    /// Direct supertypes: the superclass and the implemented interfaces.
    #[serde(default)]
    pub supertypes: Vec<String>,

    /// A sealed type without a permits clause permits its direct subtypes.
    #[serde(default)]
    pub sealed: bool,

    /// The permits clause, implies `sealed`.
    #[serde(default)]
    pub permits: Option<Vec<String>>,

    #[serde(default)]
    pub non_sealed: bool,

    /// Record components.
    #[serde(default)]
    pub components: Vec<ComponentDecl>,

    /// Enum constants.
    #[serde(default)]
    pub constants: Vec<String>,
}

impl From<TypeDecl> for TyDecl {
    fn from(decl: TypeDecl) -> Self {
        let kind = match decl.kind {
            TypeKindDecl::Class => TyDeclKind::Class { is_abstract: false },
            TypeKindDecl::AbstractClass => TyDeclKind::Class { is_abstract: true },
            TypeKindDecl::Interface => TyDeclKind::Interface,
            TypeKindDecl::Record => {
                TyDeclKind::Record(decl.components.into_iter().map(|component| (component.name, component.ty)).collect())
            }
            TypeKindDecl::Enum => TyDeclKind::Enum(decl.constants),
        };

        let sealing = if decl.non_sealed {
            SealingDecl::NonSealed
        } else if decl.sealed || decl.permits.is_some() {
            SealingDecl::Sealed(decl.permits)
        } else {
            SealingDecl::Open
        };

        TyDecl { name: decl.name, kind, supertypes: decl.supertypes, sealing }
    }
}

/// `"any"`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnyDecl {
    Any,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternDecl {
    Any(AnyDecl),

    /// `{"binding": "lib.A", "name": "a"}`
    Binding {
        binding: String,
        #[serde(default)]
        name: Option<String>,
    },

    /// `{"record": "lib.R", "nested": [...]}`
    Record {
        record: String,
        #[serde(default)]
        nested: Vec<PatternDecl>,
    },
}

/// `"default"`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultDecl {
    Default,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelDecl {
    Default(DefaultDecl),

    Pattern {
        pattern: PatternDecl,
    },

    /// `{"enum": ["lib.E", "X"]}`
    Enum {
        #[serde(rename = "enum")]
        constant: (String, String),
    },

    Boolean {
        boolean: bool,
    },

    /// Any other constant, `{"constant": 1}` or `{"constant": "text"}`.
    Constant {
        constant: serde_json::Value,
    },
}

/// `"opaque"`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpaqueDecl {
    Opaque,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum GuardDecl {
    Constant(bool),
    Opaque(OpaqueDecl),
}

impl From<GuardDecl> for Guard {
    fn from(guard: GuardDecl) -> Self {
        match guard {
            GuardDecl::Constant(value) => Guard::Constant(value),
            GuardDecl::Opaque(_) => Guard::Opaque,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseDecl {
    pub labels: Vec<LabelDecl>,

    #[serde(default)]
    pub guard: Option<GuardDecl>,

    #[serde(default)]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchKindDecl {
    #[default]
    Expression,
    Statement,
}

impl From<SwitchKindDecl> for SwitchKind {
    fn from(kind: SwitchKindDecl) -> Self {
        match kind {
            SwitchKindDecl::Expression => SwitchKind::Expression,
            SwitchKindDecl::Statement => SwitchKind::Statement,
        }
    }
}

/// A selector type, or the bounds of an intersection type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectorDecl {
    Single(String),
    Intersection(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchDecl {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub kind: SwitchKindDecl,

    pub selector: SelectorDecl,
    pub cases: Vec<CaseDecl>,

    #[serde(default)]
    pub span: Option<Span>,
}

/// A switch of a [Workspace], with the name that reports refer to it by.
#[derive(Debug, Clone)]
pub struct NamedSwitch {
    pub name: String,
    pub switch: Switch,
}

/// A resolved workspace.
#[derive(Debug)]
pub struct Workspace {
    pub store: TyStore,
    pub switches: Vec<NamedSwitch>,
}

impl Workspace {
    /// Read and resolve the workspace at the given path.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|error| PipelineError::ReadWorkspace { path: path.to_path_buf(), error })?;

        let decl = serde_json::from_str(&contents)
            .map_err(|error| PipelineError::MalformedWorkspace { path: path.to_path_buf(), error })?;

        Self::resolve(decl)
    }

    /// Resolve the names of a workspace declaration.
    pub fn resolve(decl: WorkspaceDecl) -> Result<Self, PipelineError> {
        let store = TyStore::from_decls(decl.types.into_iter().map(TyDecl::from)).map_err(PipelineError::Types)?;

        let switches = decl
            .switches
            .into_iter()
            .enumerate()
            .map(|(index, switch)| SwitchResolver::new(&store, index, &switch).resolve(switch))
            .collect::<Result<_, _>>()?;

        Ok(Self { store, switches })
    }
}

/// Resolves the type names of a single switch.
struct SwitchResolver<'s> {
    store: &'s TyStore,
    name: String,
}

impl<'s> SwitchResolver<'s> {
    fn new(store: &'s TyStore, index: usize, switch: &SwitchDecl) -> Self {
        let name = switch.name.clone().unwrap_or_else(|| format!("#{index}"));
        Self { store, name }
    }

    fn ty(&self, name: &str) -> Result<TyId, PipelineError> {
        self.store
            .lookup(name)
            .ok_or_else(|| PipelineError::UnknownType { name: name.to_string(), switch: self.name.clone() })
    }

    fn resolve(self, decl: SwitchDecl) -> Result<NamedSwitch, PipelineError> {
        let selector = match &decl.selector {
            SelectorDecl::Single(name) => Selector::new(self.ty(name)?),
            SelectorDecl::Intersection(names) if !names.is_empty() => {
                Selector::intersection(names.iter().map(|name| self.ty(name)).collect::<Result<Vec<_>, _>>()?)
            }
            // An empty intersection is unbounded.
            SelectorDecl::Intersection(_) => Selector::new(self.store.object()),
        };

        let mut cases = Vec::with_capacity(decl.cases.len());
        for (index, case) in decl.cases.into_iter().enumerate() {
            let labels = case.labels.iter().map(|label| self.label(label)).collect::<Result<Vec<_>, _>>()?;

            let ordinal = index as u32 + 1;
            let span = case.span.unwrap_or_else(|| Span::new(ordinal, ordinal));
            let guard = case.guard.map(Guard::from).unwrap_or_default();

            cases.push(SwitchCase::new(labels, span).with_guard(guard));
        }

        let switch = Switch { selector, kind: decl.kind.into(), cases, span: decl.span.unwrap_or_default() };
        Ok(NamedSwitch { name: self.name, switch })
    }

    fn label(&self, label: &LabelDecl) -> Result<CaseLabel, PipelineError> {
        Ok(match label {
            LabelDecl::Default(_) => CaseLabel::Default,
            LabelDecl::Pattern { pattern } => CaseLabel::Pattern(self.pattern(pattern)?),
            LabelDecl::Enum { constant: (ty, name) } => CaseLabel::EnumConstant { ty: self.ty(ty)?, name: name.clone() },
            LabelDecl::Boolean { boolean } => CaseLabel::Boolean(*boolean),
            LabelDecl::Constant { constant } => CaseLabel::Constant(match constant {
                serde_json::Value::String(text) => format!("{text:?}"),
                other => other.to_string(),
            }),
        })
    }

    fn pattern(&self, pattern: &PatternDecl) -> Result<Pattern, PipelineError> {
        Ok(match pattern {
            PatternDecl::Any(_) => Pattern::Any,
            PatternDecl::Binding { binding, name } => Pattern::Binding { ty: self.ty(binding)?, name: name.clone() },
            PatternDecl::Record { record, nested } => Pattern::Record {
                ty: self.ty(record)?,
                nested: nested.iter().map(|pattern| self.pattern(pattern)).collect::<Result<_, _>>()?,
            },
        })
    }
}

#[cfg(test)]
mod test_super {
    use jpat_exhaustiveness::pats::{CaseLabel, Guard, Pattern, SwitchKind};
    use jpat_source::location::Span;
    use jpat_types::hierarchy::TypeHierarchy;

    use super::*;

    fn resolve(source: &str) -> Result<Workspace, PipelineError> {
        Workspace::resolve(serde_json::from_str(source).unwrap())
    }

    #[test]
    fn test_resolve_workspace() {
        let workspace = resolve(
            r#"{
                "types": [
                    { "name": "lib.S", "kind": "interface", "sealed": true },
                    { "name": "lib.A", "kind": "record", "supertypes": ["lib.S"] },
                    { "name": "lib.B", "kind": "record", "supertypes": ["lib.S"] },
                    { "name": "lib.R", "kind": "record", "components": [{ "name": "s", "type": "lib.S" }] },
                    { "name": "lib.E", "kind": "enum", "constants": ["X", "Y"] }
                ],
                "switches": [
                    {
                        "name": "records",
                        "selector": "lib.R",
                        "cases": [
                            { "labels": [{ "pattern": { "record": "lib.R", "nested": ["any"] } }], "guard": "opaque" },
                            { "labels": [{ "pattern": { "binding": "lib.R", "name": "r" } }], "span": [10, 14] }
                        ]
                    },
                    {
                        "kind": "statement",
                        "selector": ["lib.E"],
                        "span": [3, 40],
                        "cases": [
                            { "labels": [{ "enum": ["lib.E", "X"] }, { "constant": 1 }, { "constant": "a" }] },
                            { "labels": [{ "boolean": false }, "default"], "guard": false }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let store = &workspace.store;
        let r = store.lookup("lib.R").unwrap();
        let e = store.lookup("lib.E").unwrap();

        assert_eq!(store.permitted_subtypes(store.lookup("lib.S").unwrap()).len(), 2);
        assert_eq!(workspace.switches.len(), 2);

        let records = &workspace.switches[0];
        assert_eq!(records.name, "records");
        assert_eq!(records.switch.kind, SwitchKind::Expression);
        assert_eq!(records.switch.span, Span::default());
        assert_eq!(records.switch.cases[0].guard, Guard::Opaque);
        assert_eq!(records.switch.cases[0].span, Span::new(1, 1));
        assert_eq!(records.switch.cases[0].labels, vec![CaseLabel::Pattern(Pattern::record(r, [Pattern::Any]))]);
        assert_eq!(records.switch.cases[1].labels, vec![CaseLabel::Pattern(Pattern::named(r, "r"))]);
        assert_eq!(records.switch.cases[1].span, Span::new(10, 14));

        let enums = &workspace.switches[1];
        assert_eq!(enums.name, "#1");
        assert_eq!(enums.switch.kind, SwitchKind::Statement);
        assert_eq!(enums.switch.selector.components.as_slice(), &[e]);
        assert_eq!(enums.switch.span, Span::new(3, 40));
        assert_eq!(
            enums.switch.cases[0].labels,
            vec![
                CaseLabel::EnumConstant { ty: e, name: "X".to_string() },
                CaseLabel::Constant("1".to_string()),
                CaseLabel::Constant("\"a\"".to_string()),
            ]
        );
        assert_eq!(enums.switch.cases[1].labels, vec![CaseLabel::Boolean(false), CaseLabel::Default]);
        assert_eq!(enums.switch.cases[1].guard, Guard::Constant(false));
    }

    #[test]
    fn test_resolve_unknown_type() {
        let result = resolve(
            r#"{ "switches": [{ "name": "s", "selector": "java.lang.Object", "cases": [
                { "labels": [{ "pattern": { "binding": "lib.Missing" } }] }
            ] }] }"#,
        );

        assert!(matches!(
            result,
            Err(PipelineError::UnknownType { name, switch }) if name == "lib.Missing" && switch == "s"
        ));
    }

    #[test]
    fn test_resolve_invalid_hierarchy() {
        let result = resolve(
            r#"{ "types": [
                { "name": "lib.S", "kind": "interface", "permits": ["lib.A"] },
                { "name": "lib.A", "kind": "class" },
                { "name": "lib.A", "kind": "class" }
            ] }"#,
        );

        let Err(PipelineError::Types(errors)) = result else { panic!("expected type errors") };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].subject(), "lib.A");
    }
}
