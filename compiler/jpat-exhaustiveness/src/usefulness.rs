//! This module contains the entry point for the witness computation that
//! decides whether the case labels of a switch are exhaustive.
//!
//! The algorithm is the usefulness algorithm from
//! <http://moscova.inria.fr/~maranget/papers/warn/index.html>, asked only
//! whether a row of wildcards is useful with respect to the matrix of case
//! labels. If it is, the values it is useful for are the witnesses of
//! non-exhaustiveness.
use jpat_types::{hierarchy::TypeHierarchy, ty::TyId};
use jpat_utils::{log, stack::ensure_sufficient_stack};

use crate::{
    matrix::Matrix,
    witness::{Witness, WitnessPat},
    ExhaustivenessChecker, TooComplex,
};

impl<H: TypeHierarchy> ExhaustivenessChecker<'_, H> {
    /// Compute the witnesses of values whose columns have the types `tys`
    /// and which no row of the matrix matches.
    ///
    /// The head column is split into its constructors (see
    /// [crate::wildcard]). Constructors that no row covers give witnesses
    /// immediately. Every other group of constructors specialises the
    /// matrix, and the witnesses of the specialised matrix are rebuilt into
    /// witnesses of this one.
    pub(crate) fn compute_witnesses(&mut self, matrix: &Matrix, tys: &[TyId]) -> Result<Vec<Witness>, TooComplex> {
        self.base_check(1)?;

        // The base case, all of the columns have been matched. The values are
        // matched iff there is a row left.
        let Some((&ty, rest)) = tys.split_first() else {
            return Ok(if matrix.is_empty() { vec![Witness(vec![])] } else { vec![] });
        };

        if matrix.is_empty() {
            return Ok(vec![Witness::wildcards(tys)]);
        }

        log::trace!("computing witnesses for `{}`:\n{}", self.name(ty), self.fmt_matrix(matrix));

        let split = self.split_column(ty, matrix)?;
        let mut witnesses = vec![];

        if !split.missing.is_empty() {
            let rest = Witness::wildcards(rest);

            for head in self.collapse_ctors(ty, &split.missing) {
                witnesses.push(rest.with_head(head));
            }
        }

        for group in &split.groups {
            let witnesses_before = witnesses.len();

            if group.expand {
                let ctor = group.ctors[0];
                let specialised = self.specialise_ctor(matrix, ctor, &group.rows);

                let mut sub_tys = self.ctor_field_tys(ctor);
                sub_tys.extend_from_slice(rest);

                let sub_witnesses = ensure_sufficient_stack(|| self.compute_witnesses(&specialised, &sub_tys))?;
                witnesses.extend(sub_witnesses.iter().map(|witness| self.apply_ctor(ctor, witness)));
            } else {
                // None of the constructors are deconstructed by any row, so the
                // column is simply dropped.
                let specialised = self.specialise_default(matrix, &group.rows);
                let sub_witnesses = ensure_sufficient_stack(|| self.compute_witnesses(&specialised, rest))?;

                if !sub_witnesses.is_empty() {
                    let heads = self.collapse_ctors(ty, &group.ctors);

                    for witness in &sub_witnesses {
                        witnesses.extend(heads.iter().map(|head| witness.with_head(head.clone())));
                    }
                }
            }

            self.base_check(witnesses.len() - witnesses_before)?;
        }

        Ok(witnesses)
    }

    /// Compute the witnesses for a single-column matrix of case labels over
    /// the selector type `ty`.
    pub(crate) fn compute_switch_witnesses(&mut self, matrix: &Matrix, ty: TyId) -> Result<Vec<WitnessPat>, TooComplex> {
        let witnesses = self.compute_witnesses(matrix, &[ty])?;
        Ok(witnesses.into_iter().filter_map(Witness::single_pat).collect())
    }
}
