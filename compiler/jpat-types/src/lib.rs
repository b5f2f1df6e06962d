//! The type model that switches are checked against.
//!
//! Types are erased: a [ty::TyDef] records a fully-qualified name, what kind
//! of type it is, its direct supertypes and whether it is sealed. The
//! [hierarchy::TypeHierarchy] trait is the query interface that the rest of
//! the checker uses, and [store::TyStore] is the in-memory implementation.
//! [space::TypeSpace] decomposes a type into the space of values it can take.
pub mod hierarchy;
pub mod space;
pub mod store;
pub mod ty;
