//! Permutation groups and the group-theory seam.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::CoverResult;
use crate::permutation::Permutation;

use super::dixon::CharacterTable;

/// A permutation group on `0..degree`, given by generators.
///
/// The element list is filled in lazily by whichever provider enumerates
/// it first.
#[derive(Debug, Clone)]
pub struct PermutationGroup {
    degree: usize,
    generators: Vec<Permutation>,
    symmetric: bool,
    elements: OnceLock<Arc<Vec<Permutation>>>,
}

impl PermutationGroup {
    pub fn new(degree: usize, generators: Vec<Permutation>) -> Self {
        Self {
            degree,
            generators,
            symmetric: false,
            elements: OnceLock::new(),
        }
    }

    /// Symmetric group, generated by `(1,2)` and `(1,2,…,d)`.
    pub fn symmetric(degree: usize) -> Self {
        let generators = if degree >= 2 {
            vec![
                Permutation::transposition(degree, 0, 1),
                Permutation::rotation(degree, 1),
            ]
        } else {
            Vec::new()
        };
        Self {
            degree,
            generators,
            symmetric: true,
            elements: OnceLock::new(),
        }
    }

    /// Group whose full element list is already known.
    pub fn from_elements(degree: usize, mut elements: Vec<Permutation>) -> Self {
        elements.sort();
        elements.dedup();
        let generators = elements.iter().filter(|g| !g.is_identity()).cloned().collect();
        let group = Self::new(degree, generators);
        let _ = group.elements.set(Arc::new(elements));
        group
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn generators(&self) -> &[Permutation] {
        &self.generators
    }

    /// Whether this is known to be the full symmetric group.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Cached element list, enumerating with `enumerate` on first use.
    pub fn elements_with(
        &self,
        enumerate: impl FnOnce(&Self) -> CoverResult<Vec<Permutation>>,
    ) -> CoverResult<Arc<Vec<Permutation>>> {
        if let Some(els) = self.elements.get() {
            return Ok(Arc::clone(els));
        }
        let els = Arc::new(enumerate(self)?);
        Ok(Arc::clone(self.elements.get_or_init(|| els)))
    }
}

impl fmt::Display for PermutationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symmetric {
            return write!(f, "Symmetric group of order {}!", self.degree);
        }
        let gens: Vec<String> = self.generators.iter().map(|g| g.to_string()).collect();
        write!(f, "Permutation Group with generators [{}]", gens.join(", "))
    }
}

/// Exact group theory needed to analyse the deck group of a cover.
pub trait GroupTheoryProvider: fmt::Debug + Send + Sync {
    /// Subgroup of `Sym(degree)` generated by `generators`.
    fn group(&self, generators: &[Permutation], degree: usize) -> CoverResult<PermutationGroup>;

    fn symmetric_group(&self, degree: usize) -> PermutationGroup;

    /// Centralizer of `subgroup` inside `ambient`.
    fn centralizer(
        &self,
        ambient: &PermutationGroup,
        subgroup: &PermutationGroup,
    ) -> CoverResult<PermutationGroup>;

    fn order(&self, group: &PermutationGroup) -> CoverResult<usize>;

    /// All elements, identity first.
    fn elements(&self, group: &PermutationGroup) -> CoverResult<Vec<Permutation>>;

    /// Ordinary irreducible characters.
    fn character_table(&self, group: &PermutationGroup) -> CoverResult<CharacterTable>;
}
