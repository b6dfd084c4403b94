//! The cover itself: a base permutation together with one sheet
//! permutation per interval.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::algebra::{Cyclotomic, ExactMatrix};
use crate::error::{CoverError, CoverResult};
use crate::groups::{GroupTheoryProvider, NativeGroupTheory, PermutationGroup};
use crate::permutation::{BasePermutation, LabelledPermutation, Permutation};

use super::automorphisms::RealCharacterTable;

/// Lazily computed data attached to one cover instance.
#[derive(Debug, Default)]
pub(crate) struct CoverCache {
    pub(crate) automorphism_group: OnceLock<PermutationGroup>,
    pub(crate) characters: OnceLock<Arc<RealCharacterTable>>,
    pub(crate) projectors: Mutex<HashMap<usize, Arc<ExactMatrix<Cyclotomic>>>>,
    /// Cycle and boundary matrices lifted to the cyclotomic field.
    pub(crate) cycles: OnceLock<ExactMatrix<Cyclotomic>>,
    pub(crate) boundaries: OnceLock<ExactMatrix<Cyclotomic>>,
}

/// Degree `d` cover of a base permutation.
///
/// Crossing interval `a` from copy `c` of the base lands in copy
/// `monodromy[a](c)`. The cover is immutable; the deck group, its
/// characters and the isotypic projectors are computed on first request and
/// kept for the lifetime of the instance.
pub struct PermutationCover<P: BasePermutation = LabelledPermutation> {
    base: P,
    degree: usize,
    monodromy: Vec<Permutation>,
    provider: Arc<dyn GroupTheoryProvider>,
    pub(crate) cache: CoverCache,
}

impl<P: BasePermutation> PermutationCover<P> {
    /// Cover with the native group theory provider.
    pub fn new(base: P, degree: usize, monodromy: Vec<Permutation>) -> CoverResult<Self> {
        Self::with_provider(base, degree, monodromy, Arc::new(NativeGroupTheory::default()))
    }

    pub fn with_provider(
        base: P,
        degree: usize,
        monodromy: Vec<Permutation>,
        provider: Arc<dyn GroupTheoryProvider>,
    ) -> CoverResult<Self> {
        if !base.is_irreducible() {
            return Err(CoverError::InvalidCover(format!(
                "the base permutation\n{base}\nis reducible"
            )));
        }
        if degree == 0 {
            return Err(CoverError::InvalidCover("the degree must be at least 1".to_string()));
        }
        if monodromy.len() != base.n_intervals() {
            return Err(CoverError::InvalidCover(format!(
                "{} sheet permutations given for {} intervals",
                monodromy.len(),
                base.n_intervals()
            )));
        }
        for (rank, sigma) in monodromy.iter().enumerate() {
            if sigma.len() != degree {
                return Err(CoverError::InvalidCover(format!(
                    "permutation {sigma} of interval {:?} acts on {} points instead of {degree}",
                    base.alphabet().label(rank),
                    sigma.len()
                )));
            }
        }
        tracing::debug!(degree, intervals = base.n_intervals(), "new cover");
        Ok(Self {
            base,
            degree,
            monodromy,
            provider,
            cache: CoverCache::default(),
        })
    }

    /// Number of sheets.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of intervals of the base.
    pub fn len(&self) -> usize {
        self.base.n_intervals()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    /// Label ranks along one row of the base.
    pub fn row(&self, side: usize) -> &[usize] {
        self.base.row(side)
    }

    pub fn provider(&self) -> &Arc<dyn GroupTheoryProvider> {
        &self.provider
    }

    /// Sheet permutations, indexed by label rank.
    pub fn monodromy(&self) -> &[Permutation] {
        &self.monodromy
    }

    /// Sheet permutation attached to a label.
    pub fn covering_data(&self, label: &str) -> CoverResult<&Permutation> {
        let rank = self.base.alphabet().rank(label).ok_or_else(|| {
            CoverError::InvalidArgument(format!(
                "{label:?} is not in the alphabet {}",
                self.base.alphabet()
            ))
        })?;
        Ok(&self.monodromy[rank])
    }

    /// Zero-indexed images of the sheet permutation attached to a label.
    pub fn covering_list(&self, label: &str) -> CoverResult<&[usize]> {
        Ok(self.covering_data(label)?.images())
    }
}

impl<P: BasePermutation> Clone for PermutationCover<P> {
    /// Copies the data; the clone recomputes its own derived data.
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            degree: self.degree,
            monodromy: self.monodromy.clone(),
            provider: Arc::clone(&self.provider),
            cache: CoverCache::default(),
        }
    }
}

impl<P: BasePermutation> PartialEq for PermutationCover<P> {
    fn eq(&self, other: &Self) -> bool {
        self.degree == other.degree && self.monodromy == other.monodromy && self.base == other.base
    }
}

impl<P: BasePermutation> fmt::Debug for PermutationCover<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermutationCover")
            .field("base", &self.base)
            .field("degree", &self.degree)
            .field("monodromy", &self.monodromy)
            .finish_non_exhaustive()
    }
}

impl<P: BasePermutation> fmt::Display for PermutationCover<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Covering of degree {} of the permutation:\n{}",
            self.degree, self.base
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> LabelledPermutation {
        LabelledPermutation::iet("a b c", "c b a").unwrap()
    }

    #[test]
    fn test_construct_and_display() {
        let c = abc().cover(&["(1,2)", "(1,3)", "(2,3)"]).unwrap();
        assert_eq!(c.degree(), 3);
        assert_eq!(c.len(), 3);
        assert_eq!(c.row(1), &[2, 1, 0]);
        assert_eq!(
            c.to_string(),
            "Covering of degree 3 of the permutation:\na b c\nc b a"
        );
    }

    #[test]
    fn test_covering_data() {
        let c = abc().cover(&["(1,2)", "(1,3)", "(2,3)"]).unwrap();
        assert_eq!(c.covering_data("b").unwrap().to_string(), "(1,3)");
        assert_eq!(c.covering_list("c").unwrap(), &[0, 2, 1]);
        assert!(matches!(
            c.covering_data("z"),
            Err(CoverError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_bad_data() {
        let p = abc();
        let id = Permutation::id(2);
        assert!(matches!(
            PermutationCover::new(p.clone(), 2, vec![id.clone(), id.clone()]),
            Err(CoverError::InvalidCover(_))
        ));
        assert!(matches!(
            PermutationCover::new(p.clone(), 3, vec![id.clone(), id.clone(), id.clone()]),
            Err(CoverError::InvalidCover(_))
        ));
        assert!(matches!(
            PermutationCover::new(p, 0, vec![Permutation::id(0); 3]),
            Err(CoverError::InvalidCover(_))
        ));

        let reducible = LabelledPermutation::iet("a b c", "b a c").unwrap();
        assert!(matches!(
            reducible.cover(&["()", "()", "()"]),
            Err(CoverError::InvalidCover(_))
        ));
    }

    #[test]
    fn test_equality_and_clone() {
        let c = abc().cover(&["(1,2)", "(1,3)", "(2,3)"]).unwrap();
        let d = c.clone();
        assert_eq!(c, d);
        let e = abc().cover(&["(1,2)", "(1,3)", "(1,2)"]).unwrap();
        assert_ne!(c, e);
    }

    #[test]
    fn test_trivial_degree_is_at_least_one() {
        let c = abc().cover(&["()", "()", "()"]).unwrap();
        assert_eq!(c.degree(), 1);
        assert_eq!(c.monodromy()[0], Permutation::id(1));
    }
}
