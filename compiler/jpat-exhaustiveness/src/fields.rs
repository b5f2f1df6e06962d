//! The sub-patterns of a [crate::deconstruct::DeconstructedPat].
use jpat_utils::smallvec::SmallVec;

use crate::storage::DeconstructedPatId;

/// The fields of a record pattern, one per record component. Patterns
/// without sub-patterns have no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    fields: SmallVec<[DeconstructedPatId; 2]>,
}

impl Fields {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter_patterns(&self) -> impl Iterator<Item = DeconstructedPatId> + '_ {
        self.fields.iter().copied()
    }
}

impl FromIterator<DeconstructedPatId> for Fields {
    fn from_iter<T: IntoIterator<Item = DeconstructedPatId>>(iter: T) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}
