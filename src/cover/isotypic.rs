//! Isotypic decomposition of the homology of the cover
//!
//! For a real character χ of the deck group G with irreducible constituents
//! of degree f, the operator
//!
//!   M_χ = (f / |G|) Σ_{t ∈ G} χ(t) ρ(t)
//!
//! is the projector onto the χ-isotypic part of the relative homology,
//! where ρ(t) moves the generator `(d, a)` to `(t(d), a)`. The projectors
//! are idempotent, pairwise orthogonal and sum to the identity.

use std::sync::Arc;

use crate::algebra::{rational, Cyclotomic, ExactMatrix, Field, Rational};
use crate::error::{CoverError, CoverResult};
use crate::permutation::BasePermutation;

use super::model::PermutationCover;

impl<P: BasePermutation> PermutationCover<P> {
    /// Projector onto the isotypic component of the `i`-th real character,
    /// acting on row vectors over the relative homology generators.
    pub fn isotypic_projection_matrix(&self, i: usize) -> CoverResult<Arc<ExactMatrix<Cyclotomic>>> {
        if let Some(m) = self.cache.projectors.lock().get(&i) {
            return Ok(Arc::clone(m));
        }
        let table = self.real_characters()?;
        let Some(chi) = table.characters().get(i) else {
            return Err(CoverError::InvalidArgument(format!(
                "character index {i} out of range, the deck group has {} real characters",
                table.len()
            )));
        };

        let order = table.order() as i64;
        let coeff = Cyclotomic::from_rational(rational(chi.degree() as i64, order));
        let size = self.degree() * self.len();
        let mut m = ExactMatrix::zeros(size, size);
        for (t, value) in table.elements().iter().zip(chi.values()) {
            if value.is_zero() {
                continue;
            }
            let entry = coeff.times(value);
            for sheet in 0..self.degree() {
                for label in 0..self.len() {
                    m.add_at(
                        self.rel_homology_index(sheet, label),
                        self.rel_homology_index(t.apply(sheet), label),
                        &entry,
                    );
                }
            }
        }
        tracing::debug!(character = i, size, "isotypic projector");

        let m = Arc::new(m);
        let mut cache = self.cache.projectors.lock();
        Ok(Arc::clone(cache.entry(i).or_insert(m)))
    }

    /// Dimension of the H⁺ part of the `i`-th isotypic component,
    /// `(rank(H·M) − rank(B·M)) / 2`.
    pub fn isotypic_dimension(&self, i: usize) -> CoverResult<usize> {
        let m = self.isotypic_projection_matrix(i)?;
        let (h, b) = self.lifted_homology();
        let cycles = h.mul(&m).rank();
        let boundaries = b.mul(&m).rank();
        assert!(
            cycles >= boundaries && (cycles - boundaries) % 2 == 0,
            "isotypic component {i}: cycle rank {cycles} and boundary rank {boundaries} \
             do not differ by an even number"
        );
        Ok((cycles - boundaries) / 2)
    }

    /// Cycle and boundary matrices over the cyclotomic field, computed once
    /// per cover.
    fn lifted_homology(&self) -> (&ExactMatrix<Cyclotomic>, &ExactMatrix<Cyclotomic>) {
        let lift = |q: &Rational| Cyclotomic::from_rational(q.clone());
        let h = self
            .cache
            .cycles
            .get_or_init(|| self.homology_cycle_matrix().map(lift));
        let b = self
            .cache
            .boundaries
            .get_or_init(|| self.homology_boundary_matrix().map(lift));
        (h, b)
    }

    /// H⁺ dimensions of all isotypic components, one per real character.
    pub fn isotypic_dimensions(&self) -> CoverResult<Vec<usize>> {
        (0..self.n_characters()?)
            .map(|i| self.isotypic_dimension(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::{LabelledPermutation, Permutation};

    fn cyclic_cover(n: usize, a: usize, b: usize) -> PermutationCover {
        let base = LabelledPermutation::generalized("c a a", "b b c").unwrap();
        PermutationCover::new(
            base,
            n,
            vec![
                Permutation::rotation(n, a + b),
                Permutation::rotation(n, a),
                Permutation::rotation(n, b),
            ],
        )
        .unwrap()
    }

    fn check_projectors(c: &PermutationCover) {
        let n = c.n_characters().unwrap();
        let size = c.degree() * c.len();
        let mut total = ExactMatrix::<Cyclotomic>::zeros(size, size);
        for i in 0..n {
            let m = c.isotypic_projection_matrix(i).unwrap();
            assert_eq!(m.mul(&m), *m, "projector {i} is not idempotent");
            total = total.add(&m);
        }
        assert_eq!(total, ExactMatrix::identity(size));
    }

    #[test]
    fn test_projectors_of_cyclic_cover() {
        let c = cyclic_cover(5, 1, 1);
        check_projectors(&c);
        assert_eq!(c.isotypic_dimensions().unwrap(), vec![0, 2, 2]);
    }

    #[test]
    fn test_isotypic_dimensions_of_small_cyclic_covers() {
        assert_eq!(cyclic_cover(3, 1, 1).isotypic_dimensions().unwrap(), vec![0, 2]);

        // Z/4: the sign character carries one dimension, the pair i, -i two
        let c = cyclic_cover(4, 1, 1);
        let dims = c.isotypic_dimensions().unwrap();
        let table = c.real_characters().unwrap();
        assert_eq!(dims[0], 0);
        for (chi, dim) in table.characters().iter().zip(&dims).skip(1) {
            let expected = if chi.is_paired() { 2 } else { 1 };
            assert_eq!(*dim, expected);
        }
    }

    #[test]
    fn test_dimensions_add_up_to_genus() {
        let p = LabelledPermutation::generalized("e a a", "b b c c d d e").unwrap();
        let c = p.cover(&["()", "(1,2)", "()", "(1,2)", "(1,2)"]).unwrap();
        check_projectors(&c);
        let dims = c.isotypic_dimensions().unwrap();
        assert_eq!(dims, vec![0, 1]);
        assert_eq!(dims.iter().sum::<usize>() as i64, c.genus());
    }

    #[test]
    fn test_pillowcase_double_covers() {
        let q = LabelledPermutation::generalized("a a b", "b c c").unwrap();
        let c = q.cover(&["(1,2)", "()", "(1,2)"]).unwrap();
        assert_eq!(c.isotypic_dimensions().unwrap(), vec![0, 1]);
        let c = q.cover(&["(1,2)", "(1,2)", "(1,2)"]).unwrap();
        assert_eq!(c.isotypic_dimensions().unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_trivial_deck_group_has_one_component() {
        let p = LabelledPermutation::iet("a b c", "c b a").unwrap();
        let c = p.cover(&["(1,2)", "(1,3)", "(2,3)"]).unwrap();
        let m = c.isotypic_projection_matrix(0).unwrap();
        assert_eq!(*m, ExactMatrix::identity(9));
        assert_eq!(c.isotypic_dimensions().unwrap(), vec![2]);
    }

    #[test]
    fn test_torus_cover_with_order_three_deck_group() {
        let p = LabelledPermutation::iet("a b", "b a").unwrap();
        let c = p.cover(&["(1,2,3)", "(1,3,2)"]).unwrap();
        check_projectors(&c);
        assert_eq!(c.isotypic_dimensions().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_projector_is_cached_and_index_checked() {
        let c = cyclic_cover(5, 1, 1);
        let a = c.isotypic_projection_matrix(1).unwrap();
        let b = c.isotypic_projection_matrix(1).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(matches!(
            c.isotypic_projection_matrix(3),
            Err(CoverError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_projectors_of_regular_s3_cover() {
        // left regular action of Sym(3) on six sheets
        let p = LabelledPermutation::iet("a b", "b a").unwrap();
        let c = p.cover(&["(1,3)(2,4)(5,6)", "(1,4,5)(2,3,6)"]).unwrap();
        assert_eq!(c.automorphism_group_order().unwrap(), 6);
        assert_eq!(c.genus(), 3);
        check_projectors(&c);

        let dims = c.isotypic_dimensions().unwrap();
        let table = c.real_characters().unwrap();
        assert_eq!(dims.iter().sum::<usize>() as i64, c.genus());
        assert_eq!(dims[0], 1);
        for (chi, dim) in table.characters().iter().zip(&dims) {
            if chi.degree() == 2 {
                assert_eq!(*dim, 2);
            }
        }
        let mut sorted = dims.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_lifted_homology_is_cached() {
        let c = cyclic_cover(5, 1, 1);
        c.isotypic_dimensions().unwrap();
        let (h, b) = c.lifted_homology();
        assert!(std::ptr::eq(h, c.lifted_homology().0));
        assert!(std::ptr::eq(b, c.lifted_homology().1));
        assert_eq!(h.nrows(), c.homology_cycle_matrix().nrows());
        assert_eq!(b.nrows(), c.degree());
    }
}
