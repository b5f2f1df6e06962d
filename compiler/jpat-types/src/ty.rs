//! Type definitions.
use std::fmt;

use jpat_utils::index_vec::define_index_type;

define_index_type! {
    /// The index of a type within a [crate::store::TyStore].
    pub struct TyId = u32;

    MAX_INDEX = i32::MAX as usize;
    DISABLE_MAX_INDEX_CHECK = cfg!(not(debug_assertions));

    DEBUG_FORMAT = "ty#{}";
}

/// The eight primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTy {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveTy {
    pub const ALL: [PrimitiveTy; 8] = [
        PrimitiveTy::Boolean,
        PrimitiveTy::Byte,
        PrimitiveTy::Char,
        PrimitiveTy::Short,
        PrimitiveTy::Int,
        PrimitiveTy::Long,
        PrimitiveTy::Float,
        PrimitiveTy::Double,
    ];

    /// The keyword of the primitive type.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveTy::Boolean => "boolean",
            PrimitiveTy::Byte => "byte",
            PrimitiveTy::Char => "char",
            PrimitiveTy::Short => "short",
            PrimitiveTy::Int => "int",
            PrimitiveTy::Long => "long",
            PrimitiveTy::Float => "float",
            PrimitiveTy::Double => "double",
        }
    }

    /// The fully-qualified name of the box class of the primitive type.
    pub fn box_name(self) -> &'static str {
        match self {
            PrimitiveTy::Boolean => "java.lang.Boolean",
            PrimitiveTy::Byte => "java.lang.Byte",
            PrimitiveTy::Char => "java.lang.Character",
            PrimitiveTy::Short => "java.lang.Short",
            PrimitiveTy::Int => "java.lang.Integer",
            PrimitiveTy::Long => "java.lang.Long",
            PrimitiveTy::Float => "java.lang.Float",
            PrimitiveTy::Double => "java.lang.Double",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveTy::Boolean | PrimitiveTy::Char)
    }

    /// Whether every value of `self` converts to `target` without loss of
    /// information (identity or an unconditionally exact widening
    /// conversion).
    pub fn is_unconditionally_exact(self, target: PrimitiveTy) -> bool {
        use PrimitiveTy::*;

        self == target
            || matches!(
                (self, target),
                (Byte, Short | Int | Long | Float | Double)
                    | (Short | Char, Int | Long | Float | Double)
                    | (Int, Long | Double)
                    | (Float, Double)
            )
    }
}

impl fmt::Display for PrimitiveTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A component of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordComponent {
    pub name: String,
    pub ty: TyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TyKind {
    Class { is_abstract: bool },
    Interface,
    Record { components: Vec<RecordComponent> },
    Enum { constants: Vec<String> },
    Primitive(PrimitiveTy),
}

impl TyKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TyKind::Class { is_abstract: true } => "abstract class",
            TyKind::Class { is_abstract: false } => "class",
            TyKind::Interface => "interface",
            TyKind::Record { .. } => "record",
            TyKind::Enum { .. } => "enum",
            TyKind::Primitive(_) => "primitive type",
        }
    }
}

/// Whether the direct subtypes of a type are restricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Sealing {
    #[default]
    Open,

    /// A `sealed` type and its permitted direct subtypes, in the order of its
    /// `permits` clause (or declaration order when the clause is inferred).
    Sealed { permits: Vec<TyId> },

    /// A `non-sealed` subtype of a sealed type.
    NonSealed,
}

/// An erased type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyDef {
    /// The fully-qualified name, e.g. `lib.R`.
    pub name: String,
    pub kind: TyKind,

    /// Direct supertypes. `java.lang.Object` is implied for every reference
    /// type and not listed.
    pub supertypes: Vec<TyId>,
    pub sealing: Sealing,
}

impl TyDef {
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TyKind::Primitive(_))
    }
}
