//! Relative homology of the cover
//!
//! The lifted intervals `(sheet, label)` span the homology of the covering
//! surface relative to its singularities. Two matrices cut out absolute
//! homology and its H⁺ part:
//!
//! - the boundary matrix, whose rows are the relations coming from the
//!   sheets (one per copy of the base polygon)
//! - the cycle matrix, a basis of the classes with zero boundary, i.e. the
//!   left null space of the singularity border matrix
//!
//! For a connected cover `rank(cycles) − rank(boundary) = 2g`.

use std::collections::HashMap;

use crate::algebra::{ExactMatrix, Field, Rational};
use crate::permutation::{BasePermutation, Occurrence, Sign};

use super::invariants::CoverCrossing;
use super::model::PermutationCover;

impl<P: BasePermutation> PermutationCover<P> {
    /// Generators `(sheet, label rank)` of the relative homology, in index
    /// order.
    pub fn rel_homology_generator(&self) -> Vec<(usize, usize)> {
        (0..self.degree())
            .flat_map(|sheet| (0..self.len()).map(move |label| (sheet, label)))
            .collect()
    }

    /// Index of the generator `(sheet, label)`.
    #[inline]
    pub fn rel_homology_index(&self, sheet: usize, label: usize) -> usize {
        sheet * self.len() + label
    }

    /// Generator at a given index.
    pub fn rel_homology_element(&self, index: usize) -> (usize, usize) {
        (index / self.len(), index % self.len())
    }

    /// One row per sheet: the boundary of its copy of the base polygon.
    ///
    /// A negative occurrence of `a` on sheet `d` contributes `+(d, a)`; a
    /// positive one is glued to the next sheet and contributes
    /// `−(σ_a(d), a)`.
    pub fn homology_boundary_matrix(&self) -> ExactMatrix<Rational> {
        let one = <Rational as Field>::one();
        let mut b = ExactMatrix::zeros(self.degree(), self.degree() * self.len());
        for sheet in 0..self.degree() {
            for side in 0..2 {
                for (pos, &label) in self.row(side).iter().enumerate() {
                    let occ = Occurrence::new(side, pos);
                    match self.base().sign(occ) {
                        Sign::Negative => {
                            b.add_at(sheet, self.rel_homology_index(sheet, label), &one)
                        }
                        Sign::Positive => {
                            let next = self.monodromy()[label].apply(sheet);
                            b.add_at(sheet, self.rel_homology_index(next, label), &one.negated())
                        }
                    }
                }
            }
        }
        b
    }

    /// Border of each generator in terms of the singularities of the cover:
    /// `+1` at the singularity where the edge starts, `−1` where it ends.
    pub fn singularity_border_matrix(&self) -> ExactMatrix<Rational> {
        let diagram = self.interval_diagram();
        let mut location: HashMap<CoverCrossing, usize> = HashMap::new();
        for (k, orbit) in diagram.iter().enumerate() {
            for &c in orbit {
                location.insert(c, k);
            }
        }
        let find = |label, sign, sheet| {
            *location
                .get(&CoverCrossing { label, sign, sheet })
                .expect("every lifted crossing lies on a singularity")
        };

        let one = <Rational as Field>::one();
        let mut w = ExactMatrix::zeros(self.degree() * self.len(), diagram.len());
        for sheet in 0..self.degree() {
            for label in 0..self.len() {
                let row = self.rel_homology_index(sheet, label);
                w.add_at(row, find(label, Sign::Positive, sheet), &one);
                w.add_at(row, find(label, Sign::Negative, sheet), &one.negated());
            }
        }
        w
    }

    /// Basis of the absolute cycles, as rows over the relative generators.
    pub fn homology_cycle_matrix(&self) -> ExactMatrix<Rational> {
        let h = self.singularity_border_matrix().left_kernel();
        tracing::debug!(cycles = h.nrows(), generators = h.ncols(), "homology cycle matrix");
        h
    }
}
