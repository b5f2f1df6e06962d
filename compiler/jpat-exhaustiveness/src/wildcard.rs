//! Splitting a column of the matrix into its constructors.
//!
//! Every value of a column type starts with one of the constructors listed
//! by [ExhaustivenessChecker::column_ctors]. For each constructor, the rows
//! whose head covers it are recorded in a bit set. Constructors that no row
//! covers form the *missing* group: whatever follows them, they are not
//! matched, so they are reported directly.
//!
//! A record constructor is only expanded into its fields when some row
//! deconstructs it with a record pattern. Otherwise every covering row has a
//! type pattern at its head, whose fields would all be wildcards, and the
//! constructor is treated like one without fields. This is what makes the
//! splitting terminate on recursive records. Constructors that are not
//! expanded and that are covered by exactly the same rows specialise the
//! matrix identically, so they are grouped and the group is only evaluated
//! once.
use jpat_types::{hierarchy::TypeHierarchy, space::TypeSpace, ty::TyId};
use jpat_utils::{fixedbitset::FixedBitSet, fxhash::FxHashMap, smallvec::SmallVec};

use crate::{
    construct::DeconstructedCtor, deconstruct::PatHead, matrix::Matrix, ExhaustivenessChecker, TooComplex,
};

/// Constructors that are covered by the same set of rows.
#[derive(Debug)]
pub struct CtorGroup {
    pub ctors: SmallVec<[DeconstructedCtor; 2]>,

    /// Whether the (single) constructor of the group is expanded into its
    /// fields when the matrix is specialised.
    pub expand: bool,

    /// The rows of the matrix that cover every constructor in the group.
    pub rows: FixedBitSet,
}

/// A column of the matrix split into its constructors.
#[derive(Debug, Default)]
pub struct SplitColumn {
    /// Constructors that no row covers.
    pub missing: Vec<DeconstructedCtor>,

    /// Constructors that some row covers, grouped.
    pub groups: Vec<CtorGroup>,
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// All the constructors of a column type, one per leaf of its type space.
    /// Enum leaves contribute one constructor per constant and boolean
    /// leaves contribute `true` and `false`.
    pub(crate) fn column_ctors(&mut self, ty: TyId) -> Vec<DeconstructedCtor> {
        let space = self.space_of(ty);
        self.space_ctors(&space)
    }

    /// The constructors below a node of a type space, in the order they are
    /// first reached.
    pub(crate) fn space_ctors(&self, space: &TypeSpace) -> Vec<DeconstructedCtor> {
        space
            .leaves()
            .into_iter()
            .flat_map(|leaf| -> SmallVec<[DeconstructedCtor; 2]> {
                match *leaf {
                    TypeSpace::Enum { ty, constants } => {
                        (0..constants).map(|index| DeconstructedCtor::EnumConstant(ty, index)).collect()
                    }
                    TypeSpace::Boolean(ty) => {
                        [true, false].into_iter().map(|value| DeconstructedCtor::Boolean(ty, value)).collect()
                    }
                    ref leaf => {
                        let ty = leaf.ty();

                        if self.is_record(ty) {
                            SmallVec::from_elem(DeconstructedCtor::Record(ty), 1)
                        } else {
                            SmallVec::from_elem(DeconstructedCtor::Opaque(ty), 1)
                        }
                    }
                }
            })
            .collect()
    }

    /// Split the head column of a non-empty matrix.
    pub(crate) fn split_column(&mut self, ty: TyId, matrix: &Matrix) -> Result<SplitColumn, TooComplex> {
        let ctors = self.column_ctors(ty);
        let heads: Vec<_> = matrix.heads().map(|head| self.get_pat(head).head).collect();

        let mut split = SplitColumn::default();
        let mut group_of_rows: FxHashMap<FixedBitSet, usize> = FxHashMap::default();

        for ctor in ctors {
            self.base_check(heads.len())?;

            let mut rows = FixedBitSet::with_capacity(heads.len());
            for (index, head) in heads.iter().enumerate() {
                if self.is_ctor_covered_by(ctor, *head) {
                    rows.insert(index);
                }
            }

            if rows.is_clear() {
                split.missing.push(ctor);
                continue;
            }

            let expand = self.ctor_arity(ctor) > 0
                && rows.ones().any(|index| matches!(heads[index], PatHead::Record(ty) if ty == ctor.ty()));

            if expand {
                split.groups.push(CtorGroup { ctors: SmallVec::from_elem(ctor, 1), expand, rows });
                continue;
            }

            match group_of_rows.get(&rows) {
                Some(group) => split.groups[*group].ctors.push(ctor),
                None => {
                    group_of_rows.insert(rows.clone(), split.groups.len());
                    split.groups.push(CtorGroup { ctors: SmallVec::from_elem(ctor, 1), expand, rows });
                }
            }
        }

        Ok(split)
    }
}

#[cfg(test)]
mod test_super {
    use jpat_types::store::{TyDecl, TyStore};

    use super::*;
    use crate::{deconstruct::DeconstructedPat, fields::Fields, stack::PatStack, ExhaustivenessSettings};

    fn store() -> TyStore {
        TyStore::from_decls([
            TyDecl::interface("lib.T").permits(["lib.L", "lib.N"]),
            TyDecl::record("lib.L", Vec::<(&str, &str)>::new()).implements(["lib.T"]),
            TyDecl::record("lib.N", [("left", "lib.T"), ("right", "lib.T")]).implements(["lib.T"]),
            TyDecl::enumeration("lib.E", ["X", "Y", "Z"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_type_patterns_do_not_expand_records() {
        let store = store();
        let t = store.lookup("lib.T").unwrap();
        let mut checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());

        let mut matrix = Matrix::empty();
        let wildcard = checker.wildcard_pat(t);
        matrix.push(PatStack::singleton(wildcard));

        let split = checker.split_column(t, &matrix).unwrap();

        assert!(split.missing.is_empty());
        assert_eq!(split.groups.len(), 1);
        assert!(!split.groups[0].expand);
        assert_eq!(split.groups[0].ctors.len(), 2);
    }

    #[test]
    fn test_record_patterns_expand_records() {
        let store = store();
        let t = store.lookup("lib.T").unwrap();
        let n = store.lookup("lib.N").unwrap();
        let mut checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());

        let left = checker.wildcard_pat(t);
        let right = checker.wildcard_pat(t);
        let fields: Fields = [left, right].into_iter().collect();
        let record = checker.make_pat(DeconstructedPat::new(PatHead::Record(n), fields, None));

        let mut matrix = Matrix::empty();
        matrix.push(PatStack::singleton(record));

        let split = checker.split_column(t, &matrix).unwrap();

        assert_eq!(split.missing, [DeconstructedCtor::Record(store.lookup("lib.L").unwrap())]);
        assert_eq!(split.groups.len(), 1);
        assert!(split.groups[0].expand);
        assert_eq!(split.groups[0].ctors.as_slice(), &[DeconstructedCtor::Record(n)]);
    }

    #[test]
    fn test_constants_with_the_same_rows_are_grouped() {
        let store = store();
        let e = store.lookup("lib.E").unwrap();
        let mut checker = ExhaustivenessChecker::new(&store, ExhaustivenessSettings::default());

        let x = checker.make_pat(DeconstructedPat::new(PatHead::EnumConstant(e, 0), Fields::empty(), None));
        let wildcard = checker.wildcard_pat(e);

        let mut matrix = Matrix::empty();
        matrix.push(PatStack::singleton(x));
        matrix.push(PatStack::singleton(wildcard));

        let split = checker.split_column(e, &matrix).unwrap();

        assert!(split.missing.is_empty());
        assert_eq!(split.groups.len(), 2);
        assert_eq!(split.groups[0].ctors.as_slice(), &[DeconstructedCtor::EnumConstant(e, 0)]);
        assert_eq!(
            split.groups[1].ctors.as_slice(),
            &[DeconstructedCtor::EnumConstant(e, 1), DeconstructedCtor::EnumConstant(e, 2)]
        );
    }
}
