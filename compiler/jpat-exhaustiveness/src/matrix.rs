//! The pattern matrix that usefulness is computed over. Each row starts out
//! as the pattern of a case label, most rows are produced by specialising
//! the rows above them.
use std::fmt::Write;

use jpat_types::hierarchy::TypeHierarchy;
use jpat_utils::fixedbitset::FixedBitSet;

use crate::{construct::DeconstructedCtor, stack::PatStack, storage::DeconstructedPatId, ExhaustivenessChecker};

#[derive(Clone, Debug, Default)]
pub struct Matrix {
    /// The inner rows of the [Matrix].
    pub patterns: Vec<PatStack>,
}

impl Matrix {
    /// Create a new [Matrix] with zero rows and columns.
    pub fn empty() -> Self {
        Matrix { patterns: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the first component of each row
    pub fn heads(&self) -> impl Iterator<Item = DeconstructedPatId> + Clone + '_ {
        self.patterns.iter().map(|row| row.head())
    }

    pub fn push(&mut self, row: PatStack) {
        self.patterns.push(row);
    }
}

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// This computes `S(ctor, matrix)` over the rows that are known to cover
    /// `ctor`.
    pub(crate) fn specialise_ctor(&mut self, matrix: &Matrix, ctor: DeconstructedCtor, rows: &FixedBitSet) -> Matrix {
        let mut specialised = Matrix::empty();

        for index in rows.ones() {
            let row = self.pop_head_ctor(&matrix.patterns[index], ctor);
            specialised.push(row);
        }

        specialised
    }

    /// This computes the default matrix over the given rows: the rows
    /// without their head.
    pub(crate) fn specialise_default(&self, matrix: &Matrix, rows: &FixedBitSet) -> Matrix {
        let patterns = rows
            .ones()
            .map(|index| PatStack::from_vec(matrix.patterns[index].pats[1..].iter().copied().collect()))
            .collect();

        Matrix { patterns }
    }

    /// Pretty-print a matrix for trace logging, e.g.
    ///
    /// ```text
    /// | lib.R(lib.A _) | java.lang.Object _ |
    /// | lib.R _ | lib.S _ |
    /// ```
    pub(crate) fn fmt_matrix(&self, matrix: &Matrix) -> String {
        let mut out = String::new();

        for row in &matrix.patterns {
            out.push('|');

            for pat in row.iter() {
                let _ = write!(out, " {:?} |", self.fmt_pat(*pat));
            }

            out.push('\n');
        }

        out
    }
}
