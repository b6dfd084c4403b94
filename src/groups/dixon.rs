//! Character tables by the Burnside–Dixon algorithm
//!
//! The class sums C_1, …, C_r of a finite group G span the centre of its
//! group algebra. Each irreducible character χ defines an algebra morphism
//! ω_χ(C_s) = |K_s| χ(g_s) / χ(1), and the vectors (ω_χ(C_s))_s are exactly
//! the common eigenvectors of the class matrices
//!
//!   (A_j)_{s,t} = #{x ∈ K_j : x⁻¹ z_t ∈ K_s},   z_t ∈ K_t.
//!
//! Dixon's improvement works modulo a prime p ≡ 1 (mod e), e the exponent of
//! G, chosen with p > 2√|G|. Eigenvalues are then found by trying every
//! element of GF(p), the degree χ(1) is the unique square root of
//! |G| / Σ_s ω_s ω_{s*} / |K_s| below √|G|, and the exact value χ(g) is
//! recovered from the multiplicities of the eigenvalues of ρ(g), which are
//! small integers determined by their residues.
//!
//! ## Reference
//!
//! Dixon (1967). "High speed computation of group characters".
//! Numerische Mathematik 10, 446–450.

use std::collections::HashMap;

use ndarray::Array2;
use num::integer::lcm;

use crate::algebra::{Cyclotomic, Field, PrimeField, Rational};
use crate::error::{CoverError, CoverResult};
use crate::permutation::Permutation;

/// Ordinary character table of a finite permutation group, with class and
/// element bookkeeping.
#[derive(Debug, Clone)]
pub struct CharacterTable {
    elements: Vec<Permutation>,
    class_of: Vec<usize>,
    classes: Vec<Vec<usize>>,
    inverse_class: Vec<usize>,
    /// `characters[i][k]`: value of χ_i on class k.
    characters: Vec<Vec<Cyclotomic>>,
}

impl CharacterTable {
    /// Table of the group with the given element list.
    pub fn burnside_dixon(mut elements: Vec<Permutation>) -> CoverResult<Self> {
        elements.sort();
        elements.dedup();
        let order = elements.len();
        let Some(first) = elements.first() else {
            return Err(CoverError::GroupTheory("empty group".to_string()));
        };
        if !first.is_identity() {
            return Err(CoverError::GroupTheory(
                "element list does not contain the identity".to_string(),
            ));
        }

        tracing::debug!(order, "Burnside-Dixon character table");

        let index: HashMap<Permutation, usize> = elements
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, g)| (g, i))
            .collect();
        let lookup = |g: &Permutation| -> CoverResult<usize> {
            index.get(g).copied().ok_or_else(|| {
                CoverError::GroupTheory(format!("element list is not closed: {g} is missing"))
            })
        };
        let inverses: Vec<usize> = elements
            .iter()
            .map(|g| lookup(&g.inverse()))
            .collect::<CoverResult<_>>()?;

        // Conjugacy classes, the identity class first
        let mut class_of = vec![usize::MAX; order];
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for i in 0..order {
            if class_of[i] != usize::MAX {
                continue;
            }
            let k = classes.len();
            let mut class = Vec::new();
            for (h, hinv) in elements.iter().zip(&inverses) {
                let c = lookup(&h.compose(&elements[i]).compose(&elements[*hinv]))?;
                if class_of[c] == usize::MAX {
                    class_of[c] = k;
                    class.push(c);
                }
            }
            class.sort_unstable();
            classes.push(class);
        }
        let r = classes.len();
        let inverse_class: Vec<usize> = classes.iter().map(|c| class_of[inverses[c[0]]]).collect();
        let sizes: Vec<u64> = classes.iter().map(|c| c.len() as u64).collect();

        let orders: Vec<usize> = elements.iter().map(Permutation::order).collect();
        let exponent = orders.iter().copied().fold(1, lcm);
        let field = PrimeField::for_group(order, exponent);
        let p = field.modulus();
        let z = field.root_of_unity(exponent as u64);
        tracing::debug!(classes = r, exponent, p, z, "working in GF(p)");

        // Class matrices
        let mut class_matrices: Vec<Array2<u64>> = Vec::with_capacity(r);
        for class in &classes {
            let mut a = Array2::<u64>::zeros((r, r));
            for (t, rep) in classes.iter().map(|c| c[0]).enumerate() {
                for &x in class {
                    let y = lookup(&elements[inverses[x]].compose(&elements[rep]))?;
                    a[[class_of[y], t]] += 1;
                }
            }
            class_matrices.push(a);
        }

        let eigenvectors = split_eigenspaces(&field, &class_matrices)?;
        tracing::debug!(found = eigenvectors.len(), "one-dimensional eigenspaces");

        // Degrees and values modulo p
        let mut characters: Vec<Vec<Cyclotomic>> = Vec::with_capacity(r);
        for v in &eigenvectors {
            if v[0] == 0 {
                return Err(CoverError::GroupTheory(
                    "class eigenvector vanishes on the identity class".to_string(),
                ));
            }
            let norm = field.inv(v[0]);
            let w: Vec<u64> = v.iter().map(|&x| field.mul(x, norm)).collect();
            let d = (0..r).fold(0, |acc, s| {
                let term = field.mul(field.mul(w[s], w[inverse_class[s]]), field.inv(sizes[s]));
                field.add(acc, term)
            });
            let square = field.mul(field.reduce(order as u64), field.inv(d));
            let degree = (1..=(order as f64).sqrt().floor() as u64 + 1)
                .find(|&f| f * f <= order as u64 && field.mul(f, f) == square)
                .ok_or_else(|| {
                    CoverError::GroupTheory(format!(
                        "no character degree squares to {square} modulo {p}"
                    ))
                })?;
            let modular: Vec<u64> = (0..r)
                .map(|s| field.mul(field.mul(degree, w[s]), field.inv(sizes[s])))
                .collect();

            let values = classes
                .iter()
                .map(|class| {
                    let g = &elements[class[0]];
                    let o = orders[class[0]];
                    let zeta = field.pow(z, (exponent / o) as u64);
                    // classes of g^0, …, g^{o-1}
                    let mut power_classes = Vec::with_capacity(o);
                    let mut gl = Permutation::id(g.len());
                    for _ in 0..o {
                        power_classes.push(class_of[lookup(&gl)?]);
                        gl = g.compose(&gl);
                    }
                    let inv_o = field.inv(o as u64);
                    let terms: Vec<(usize, Rational)> = (0..o)
                        .filter_map(|k| {
                            let m = (0..o).fold(0, |acc, l| {
                                let e = ((o - (k * l) % o) % o) as u64;
                                field.add(acc, field.mul(modular[power_classes[l]], field.pow(zeta, e)))
                            });
                            let m = field.mul(m, inv_o);
                            (m != 0).then(|| (k, <Rational as Field>::from_integer(m as i64)))
                        })
                        .collect();
                    Ok(Cyclotomic::from_exponents(o, &terms))
                })
                .collect::<CoverResult<Vec<_>>>()?;
            characters.push(values);
        }

        let mut table = Self {
            elements,
            class_of,
            classes,
            inverse_class,
            characters,
        };
        table.sort_characters();
        Ok(table)
    }

    /// Trivial character first, then by increasing degree.
    fn sort_characters(&mut self) {
        let one = Cyclotomic::one();
        let mut keyed: Vec<(usize, bool, Vec<Cyclotomic>)> = self
            .characters
            .drain(..)
            .map(|chi| {
                let trivial = chi.iter().all(|x| *x == one);
                let degree = chi[0].as_rational().map_or(0, |q| {
                    use num::ToPrimitive;
                    q.to_integer().to_usize().unwrap_or(0)
                });
                (degree, !trivial, chi)
            })
            .collect();
        keyed.sort_by_key(|(degree, nontrivial, _)| (*degree, *nontrivial));
        self.characters = keyed.into_iter().map(|(_, _, chi)| chi).collect();
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn n_characters(&self) -> usize {
        self.characters.len()
    }

    /// Group elements, identity first.
    pub fn elements(&self) -> &[Permutation] {
        &self.elements
    }

    pub fn classes(&self) -> &[Vec<usize>] {
        &self.classes
    }

    /// Class of the element with the given index.
    pub fn class_of(&self, element: usize) -> usize {
        self.class_of[element]
    }

    /// Class containing the inverses of class `k`.
    pub fn inverse_class(&self, k: usize) -> usize {
        self.inverse_class[k]
    }

    /// χ_i(1).
    pub fn degree(&self, i: usize) -> usize {
        use num::ToPrimitive;
        self.characters[i][0]
            .as_rational()
            .and_then(|q| q.to_integer().to_usize())
            .expect("character degrees are positive integers")
    }

    /// Values of χ_i, one per conjugacy class.
    pub fn class_values(&self, i: usize) -> &[Cyclotomic] {
        &self.characters[i]
    }

    /// χ_i at the element with the given index.
    pub fn value(&self, i: usize, element: usize) -> &Cyclotomic {
        &self.characters[i][self.class_of[element]]
    }

    /// Values of χ_i, one per element.
    pub fn values(&self, i: usize) -> Vec<Cyclotomic> {
        (0..self.order()).map(|g| self.value(i, g).clone()).collect()
    }

    /// Index of the complex conjugate character χ̄_i(g) = χ_i(g⁻¹).
    pub fn conjugate_index(&self, i: usize) -> usize {
        let conj: Vec<&Cyclotomic> = (0..self.n_classes())
            .map(|k| &self.characters[i][self.inverse_class[k]])
            .collect();
        (0..self.n_characters())
            .find(|&j| self.characters[j].iter().zip(&conj).all(|(a, b)| a == *b))
            .expect("the conjugate of an irreducible character is irreducible")
    }
}

/// Split GF(p)^r into common one-dimensional eigenspaces of the class
/// matrices.
fn split_eigenspaces(field: &PrimeField, matrices: &[Array2<u64>]) -> CoverResult<Vec<Vec<u64>>> {
    let r = matrices.len();
    let p = field.modulus();
    let standard: Vec<Vec<u64>> = (0..r)
        .map(|i| (0..r).map(|j| u64::from(i == j)).collect())
        .collect();
    let mut spaces: Vec<Vec<Vec<u64>>> = vec![standard];

    for (j, a) in matrices.iter().enumerate().skip(1) {
        if spaces.iter().all(|s| s.len() == 1) {
            break;
        }
        tracing::trace!(class_matrix = j, "splitting degenerate eigenspaces");
        let mut next = Vec::with_capacity(spaces.len());
        for space in spaces {
            if space.len() == 1 {
                next.push(space);
                continue;
            }
            let k = space.len();
            // image of each basis vector under A_j
            let images: Vec<Vec<u64>> = space
                .iter()
                .map(|v| {
                    (0..r)
                        .map(|s| (0..r).fold(0, |acc, t| field.add(acc, field.mul(a[[s, t]] % p, v[t]))))
                        .collect()
                })
                .collect();
            let mut found = 0;
            let mut pieces = Vec::new();
            for lambda in 0..p {
                let m = Array2::from_shape_fn((r, k), |(s, c)| {
                    field.sub(images[c][s], field.mul(lambda, space[c][s]))
                });
                let coefficients = field.nullspace(&m);
                if coefficients.is_empty() {
                    continue;
                }
                found += coefficients.len();
                let sub: Vec<Vec<u64>> = coefficients
                    .iter()
                    .map(|co| {
                        (0..r)
                            .map(|t| (0..k).fold(0, |acc, c| field.add(acc, field.mul(co[c], space[c][t]))))
                            .collect()
                    })
                    .collect();
                pieces.push(sub);
                if found == k {
                    break;
                }
            }
            if found != k {
                return Err(CoverError::GroupTheory(format!(
                    "class matrix {j} is not diagonalisable modulo {p}"
                )));
            }
            next.extend(pieces);
        }
        spaces = next;
    }

    if spaces.iter().any(|s| s.len() != 1) {
        return Err(CoverError::GroupTheory(
            "class matrices exhausted before the eigenspaces were resolved".to_string(),
        ));
    }
    Ok(spaces.into_iter().map(|mut s| s.remove(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::native::enumerate;

    fn cyclic(n: usize) -> Vec<Permutation> {
        enumerate(&[Permutation::rotation(n, 1)], n).unwrap()
    }

    fn symmetric(n: usize) -> Vec<Permutation> {
        enumerate(&[Permutation::transposition(n, 0, 1), Permutation::rotation(n, 1)], n).unwrap()
    }

    fn assert_orthonormal(table: &CharacterTable) {
        let g = table.order();
        for i in 0..table.n_characters() {
            for j in 0..table.n_characters() {
                let mut sum = Cyclotomic::zero();
                for e in 0..g {
                    sum = sum.plus(&table.value(i, e).times(&table.value(j, e).conjugate()));
                }
                let expected = if i == j { g as i64 } else { 0 };
                assert_eq!(sum, Cyclotomic::from_integer(expected), "<χ{i}, χ{j}>");
            }
        }
    }

    #[test]
    fn test_trivial_group() {
        let table = CharacterTable::burnside_dixon(vec![Permutation::id(3)]).unwrap();
        assert_eq!(table.n_characters(), 1);
        assert_eq!(table.degree(0), 1);
    }

    #[test]
    fn test_cyclic_group_of_order_five() {
        let table = CharacterTable::burnside_dixon(cyclic(5)).unwrap();
        assert_eq!(table.n_classes(), 5);
        assert_eq!(table.n_characters(), 5);
        assert!(table.class_values(0).iter().all(|x| *x == Cyclotomic::one()));
        for i in 0..5 {
            assert_eq!(table.degree(i), 1);
        }
        assert_orthonormal(&table);
        // every non-trivial character is non-real
        for i in 1..5 {
            assert_ne!(table.conjugate_index(i), i);
        }
        assert_eq!(table.conjugate_index(0), 0);
    }

    #[test]
    fn test_symmetric_group_s3() {
        let table = CharacterTable::burnside_dixon(symmetric(3)).unwrap();
        assert_eq!(table.order(), 6);
        assert_eq!(table.n_characters(), 3);
        let degrees: Vec<usize> = (0..3).map(|i| table.degree(i)).collect();
        assert_eq!(degrees, vec![1, 1, 2]);
        assert_orthonormal(&table);
        for i in 0..3 {
            assert!(table.class_values(i).iter().all(Cyclotomic::is_rational));
        }
    }

    #[test]
    fn test_symmetric_group_s4() {
        let table = CharacterTable::burnside_dixon(symmetric(4)).unwrap();
        let degrees: Vec<usize> = (0..table.n_characters()).map(|i| table.degree(i)).collect();
        assert_eq!(degrees, vec![1, 1, 2, 3, 3]);
        assert_eq!(degrees.iter().map(|d| d * d).sum::<usize>(), 24);
        assert_orthonormal(&table);
    }

    #[test]
    fn test_quaternion_group() {
        // Q8 acting regularly on 8 points
        let i = Permutation::from_one_line(&[2, 3, 4, 1, 6, 7, 8, 5]).unwrap();
        let j = Permutation::from_one_line(&[5, 8, 7, 6, 3, 2, 1, 4]).unwrap();
        let els = enumerate(&[i, j], 8).unwrap();
        assert_eq!(els.len(), 8);
        let table = CharacterTable::burnside_dixon(els).unwrap();
        let degrees: Vec<usize> = (0..table.n_characters()).map(|i| table.degree(i)).collect();
        assert_eq!(degrees, vec![1, 1, 1, 1, 2]);
        assert_orthonormal(&table);
    }

    #[test]
    fn test_missing_identity_is_an_error() {
        let t = Permutation::transposition(2, 0, 1);
        assert!(CharacterTable::burnside_dixon(vec![t]).is_err());
        assert!(CharacterTable::burnside_dixon(Vec::new()).is_err());
    }
}
