//! The switches that are checked: a selector, and case labels in source
//! order with their guards.
use std::fmt;

use jpat_source::location::Span;
use jpat_types::{hierarchy::TypeHierarchy, ty::TyId};
use jpat_utils::smallvec::{smallvec, SmallVec};

/// A pattern as written in a case label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A type pattern `T t`. Without a name it is the unnamed pattern `T _`.
    Binding { ty: TyId, name: Option<String> },

    /// The unnamed pattern `_`, whose type is that of its context. It may
    /// only appear nested in a record pattern.
    Any,

    /// A record pattern `R(p1, p2, ...)`.
    Record { ty: TyId, nested: Vec<Pattern> },
}

impl Pattern {
    pub fn binding(ty: TyId) -> Self {
        Pattern::Binding { ty, name: None }
    }

    pub fn named(ty: TyId, name: impl Into<String>) -> Self {
        Pattern::Binding { ty, name: Some(name.into()) }
    }

    pub fn record(ty: TyId, nested: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Record { ty, nested: nested.into_iter().collect() }
    }

    /// The type that the pattern tests for, `None` for [Pattern::Any].
    pub fn ty(&self) -> Option<TyId> {
        match self {
            Pattern::Binding { ty, .. } | Pattern::Record { ty, .. } => Some(*ty),
            Pattern::Any => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseLabel {
    Pattern(Pattern),

    /// An enum constant `case NAME`.
    EnumConstant { ty: TyId, name: String },

    /// `case true` or `case false`.
    Boolean(bool),

    /// Any other constant, e.g. an int or string literal. Such labels never
    /// contribute to exhaustiveness.
    Constant(String),

    Default,
}

/// The guard of a case, `case P when <guard>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Guard {
    #[default]
    None,

    /// A guard that is a constant expression.
    Constant(bool),

    /// Any other guard, which the analysis cannot see through.
    Opaque,
}

impl Guard {
    /// Whether the case only matches what its labels match.
    pub fn is_unconditional(&self) -> bool {
        matches!(self, Guard::None | Guard::Constant(true))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    pub labels: Vec<CaseLabel>,
    pub guard: Guard,
    pub span: Span,
}

impl SwitchCase {
    pub fn new(labels: impl IntoIterator<Item = CaseLabel>, span: Span) -> Self {
        Self { labels: labels.into_iter().collect(), guard: Guard::None, span }
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    Expression,
    Statement,
}

/// The erased static type of a switch selector. A type variable with an
/// intersection bound `Z extends I1 & I2` has a component per bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub components: SmallVec<[TyId; 1]>,
}

impl Selector {
    pub fn new(ty: TyId) -> Self {
        Self { components: smallvec![ty] }
    }

    pub fn intersection(components: impl IntoIterator<Item = TyId>) -> Self {
        Self { components: components.into_iter().collect() }
    }

    /// The first component of the selector, used when a single type is
    /// needed.
    pub fn primary(&self) -> TyId {
        self.components[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub selector: Selector,
    pub kind: SwitchKind,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

/// Wraps an item with the [TypeHierarchy] that its types belong to, so that
/// it can be printed.
pub struct WithHierarchy<'h, T, H: ?Sized> {
    pub item: T,
    pub hierarchy: &'h H,
}

impl<'h, T, H: ?Sized> WithHierarchy<'h, T, H> {
    pub fn new(item: T, hierarchy: &'h H) -> Self {
        Self { item, hierarchy }
    }

    pub fn with<U>(&self, item: U) -> WithHierarchy<'h, U, H> {
        WithHierarchy::new(item, self.hierarchy)
    }
}

impl<H: TypeHierarchy + ?Sized> fmt::Display for WithHierarchy<'_, &Pattern, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item {
            Pattern::Binding { ty, name } => {
                write!(f, "{} {}", self.hierarchy.name(*ty), name.as_deref().unwrap_or("_"))
            }
            Pattern::Any => write!(f, "_"),
            Pattern::Record { ty, nested } => {
                write!(f, "{}(", self.hierarchy.name(*ty))?;

                for (index, pat) in nested.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{}", self.with(pat))?;
                }

                write!(f, ")")
            }
        }
    }
}

impl<H: TypeHierarchy + ?Sized> fmt::Display for WithHierarchy<'_, &CaseLabel, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item {
            CaseLabel::Pattern(pat) => write!(f, "{}", self.with(pat)),
            CaseLabel::EnumConstant { ty, name } => write!(f, "{}.{name}", self.hierarchy.name(*ty)),
            CaseLabel::Boolean(value) => write!(f, "{value}"),
            CaseLabel::Constant(text) => write!(f, "{text}"),
            CaseLabel::Default => write!(f, "default"),
        }
    }
}
