//! Deck group of the cover and its real characters
//!
//! A deck transformation permutes the sheets and commutes with every sheet
//! permutation, so the deck group is the centralizer of the monodromy group
//! inside the symmetric group on the sheets. It acts on the relative
//! homology by `(d, a) ↦ (π(d), a)`.
//!
//! Homology is a real representation. Complex irreducible characters that
//! are not real valued only appear together with their conjugate, so they
//! are folded into real characters χ + χ̄.

use std::fmt;
use std::sync::Arc;

use crate::algebra::{Cyclotomic, Field};
use crate::error::CoverResult;
use crate::groups::{CharacterTable, PermutationGroup};
use crate::permutation::{BasePermutation, Permutation};

use super::model::PermutationCover;

/// A real valued character of the deck group.
#[derive(Debug, Clone, PartialEq)]
pub struct RealCharacter {
    values: Vec<Cyclotomic>,
    degree: usize,
    paired: bool,
}

impl RealCharacter {
    /// Values, one per element of the deck group in the order of
    /// [`RealCharacterTable::elements`].
    pub fn values(&self) -> &[Cyclotomic] {
        &self.values
    }

    /// Degree of one irreducible constituent.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether this is the sum of two conjugate irreducible characters.
    pub fn is_paired(&self) -> bool {
        self.paired
    }

    /// Value at the identity, i.e. the dimension of the representation.
    pub fn dimension(&self) -> usize {
        if self.paired {
            2 * self.degree
        } else {
            self.degree
        }
    }
}

impl fmt::Display for RealCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

/// Real characters of a deck group together with its elements.
#[derive(Debug, Clone)]
pub struct RealCharacterTable {
    elements: Vec<Permutation>,
    characters: Vec<RealCharacter>,
}

impl RealCharacterTable {
    /// Fold the ordinary table into real characters. Order follows the
    /// ordinary table, trivial character first.
    pub fn from_table(table: &CharacterTable) -> Self {
        let n = table.n_characters();
        let mut used = vec![false; n];
        let mut characters = Vec::new();
        for i in 0..n {
            if used[i] {
                continue;
            }
            used[i] = true;
            let j = table.conjugate_index(i);
            if j == i {
                characters.push(RealCharacter {
                    values: table.values(i),
                    degree: table.degree(i),
                    paired: false,
                });
            } else {
                used[j] = true;
                let values = table
                    .values(i)
                    .iter()
                    .zip(table.values(j))
                    .map(|(a, b)| a.plus(&b))
                    .collect();
                characters.push(RealCharacter {
                    values,
                    degree: table.degree(i),
                    paired: true,
                });
            }
        }
        Self {
            elements: table.elements().to_vec(),
            characters,
        }
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    /// Deck group elements as permutations of the sheets, identity first.
    pub fn elements(&self) -> &[Permutation] {
        &self.elements
    }

    pub fn characters(&self) -> &[RealCharacter] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl<P: BasePermutation> PermutationCover<P> {
    /// Centralizer of the monodromy group in the symmetric group on the
    /// sheets.
    pub fn automorphism_group(&self) -> CoverResult<&PermutationGroup> {
        if let Some(g) = self.cache.automorphism_group.get() {
            return Ok(g);
        }
        let provider = self.provider();
        let monodromy = provider.group(self.monodromy(), self.degree())?;
        let ambient = provider.symmetric_group(self.degree());
        let deck = provider.centralizer(&ambient, &monodromy)?;
        tracing::debug!(degree = self.degree(), deck = %deck, "automorphism group");
        Ok(self.cache.automorphism_group.get_or_init(|| deck))
    }

    /// Real characters of the deck group, computed once per cover.
    pub fn real_characters(&self) -> CoverResult<Arc<RealCharacterTable>> {
        if let Some(t) = self.cache.characters.get() {
            return Ok(Arc::clone(t));
        }
        let group = self.automorphism_group()?;
        let table = self.provider().character_table(group)?;
        let real = Arc::new(RealCharacterTable::from_table(&table));
        tracing::debug!(
            order = real.order(),
            irreducible = table.n_characters(),
            real = real.len(),
            "deck group characters"
        );
        Ok(Arc::clone(self.cache.characters.get_or_init(|| real)))
    }

    /// Values of each real character, one row per character.
    pub fn character_table(&self) -> CoverResult<Vec<Vec<Cyclotomic>>> {
        Ok(self
            .real_characters()?
            .characters()
            .iter()
            .map(|c| c.values().to_vec())
            .collect())
    }

    /// Degree of an irreducible constituent of each real character.
    pub fn character_degree(&self) -> CoverResult<Vec<usize>> {
        Ok(self
            .real_characters()?
            .characters()
            .iter()
            .map(RealCharacter::degree)
            .collect())
    }

    pub fn automorphism_group_order(&self) -> CoverResult<usize> {
        Ok(self.real_characters()?.order())
    }

    /// Deck transformations as permutations of the sheets, in the order
    /// used by [`Self::character_table`].
    pub fn automorphism_group_permutation(&self) -> CoverResult<Vec<Permutation>> {
        Ok(self.real_characters()?.elements().to_vec())
    }

    /// Number of real characters.
    pub fn n_characters(&self) -> CoverResult<usize> {
        Ok(self.real_characters()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::rational;
    use crate::permutation::LabelledPermutation;

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

    #[test]
    fn test_cyclic_deck_group() {
        let c = cyclic_cover(5, 1, 1);
        assert_eq!(c.automorphism_group_order().unwrap(), 5);
        assert_eq!(c.n_characters().unwrap(), 3);
        assert_eq!(c.character_degree().unwrap(), vec![1, 1, 1]);

        let table = c.character_table().unwrap();
        let two = Cyclotomic::from_rational(rational(2, 1));
        assert!(table[0].iter().all(|x| *x == Cyclotomic::one()));
        assert_eq!(table[1][0], two);
        assert_eq!(table[2][0], two);
        for row in &table {
            assert!(row.iter().all(Cyclotomic::is_real));
        }
        // E(5) + E(5)^4 and E(5)^2 + E(5)^3 add up to -1
        let g = 1;
        assert_eq!(
            table[1][g].plus(&table[2][g]),
            Cyclotomic::from_rational(rational(-1, 1))
        );
    }

    #[test]
    fn test_real_character_counts_of_cyclic_covers() {
        for (n, expected) in [(3, 2), (4, 3), (5, 3), (7, 4)] {
            let c = cyclic_cover(n, 1, 1);
            assert_eq!(c.automorphism_group_order().unwrap(), n);
            assert_eq!(c.n_characters().unwrap(), expected, "degree {n}");
        }
    }

    #[test]
    fn test_trivial_deck_group() {
        let p = LabelledPermutation::iet("a b c", "c b a").unwrap();
        let c = p.cover(&["(1,2)", "(1,3)", "(2,3)"]).unwrap();
        assert_eq!(c.automorphism_group_order().unwrap(), 1);
        assert_eq!(c.n_characters().unwrap(), 1);
        let elements = c.automorphism_group_permutation().unwrap();
        assert!(elements[0].is_identity());
    }

    #[test]
    fn test_deck_group_commutes_with_monodromy() {
        let p = LabelledPermutation::generalized("e a a", "b b c c d d e").unwrap();
        let c = p.cover(&["()", "(1,2)", "()", "(1,2)", "(1,2)"]).unwrap();
        let deck = c.automorphism_group_permutation().unwrap();
        assert_eq!(deck.len(), 2);
        for t in &deck {
            for sigma in c.monodromy() {
                assert_eq!(t.compose(sigma), sigma.compose(t));
            }
        }
    }

    #[test]
    fn test_characters_are_cached_per_instance() {
        let c = cyclic_cover(5, 1, 1);
        let a = c.real_characters().unwrap();
        let b = c.real_characters().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let d = c.clone();
        assert!(!Arc::ptr_eq(&a, &d.real_characters().unwrap()));
    }

    #[test]
    fn test_non_abelian_deck_group() {
        // trivial monodromy on three sheets: the deck group is Sym(3)
        let p = LabelledPermutation::iet("a b", "b a").unwrap();
        let c = PermutationCover::new(p, 3, vec![Permutation::id(3); 2]).unwrap();
        assert_eq!(c.automorphism_group_order().unwrap(), 6);
        assert_eq!(c.character_degree().unwrap(), vec![1, 1, 2]);
        let dims: Vec<usize> = c
            .real_characters()
            .unwrap()
            .characters()
            .iter()
            .map(RealCharacter::dimension)
            .collect();
        assert_eq!(dims, vec![1, 1, 2]);
    }

    #[test]
    fn test_huge_deck_group_is_rejected() {
        // trivial monodromy on ten sheets: the deck group would be Sym(10)
        let p = LabelledPermutation::iet("a b", "b a").unwrap();
        let c = PermutationCover::new(p, 10, vec![Permutation::id(10); 2]).unwrap();
        assert!(matches!(
            c.automorphism_group(),
            Err(crate::error::CoverError::GroupTheory(_))
        ));
    }
}
