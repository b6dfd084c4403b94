//! Strata of flat surfaces
//!
//! A translation surface lives in an Abelian stratum H(k₁, …, kₘ) where the
//! kᵢ are the orders of the zeros of its holomorphic 1-form, with
//! Σ kᵢ = 2g − 2. A half-translation surface lives in a quadratic stratum
//! Q(k₁, …, kₘ) with Σ kᵢ = 4g − 4 and kᵢ ≥ −1 (poles).
//!
//! Both are recovered from the cone angles: a singularity of angle kπ has
//! order (k − 2)/2 for a 1-form and k − 2 for a quadratic differential.

use std::fmt;

/// Family of a stratum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StratumKind {
    Abelian,
    Quadratic,
}

/// Stratum of a flat surface: kind plus the multiset of singularity orders
/// (non-increasing).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stratum {
    kind: StratumKind,
    zeros: Vec<i64>,
}

impl Stratum {
    pub fn new(kind: StratumKind, mut zeros: Vec<i64>) -> Self {
        zeros.sort_unstable_by(|a, b| b.cmp(a));
        Self { kind, zeros }
    }

    /// Stratum from cone angles in units of π.
    ///
    /// Panics if `kind` is Abelian and an angle is odd, which would mean the
    /// foliation is not orientable.
    pub fn from_profile(kind: StratumKind, profile: &[usize]) -> Self {
        let zeros = profile
            .iter()
            .map(|&k| {
                let k = k as i64;
                match kind {
                    StratumKind::Abelian => {
                        assert!(k % 2 == 0, "odd cone angle {k}π on an orientable surface");
                        (k - 2) / 2
                    }
                    StratumKind::Quadratic => k - 2,
                }
            })
            .collect();
        Self::new(kind, zeros)
    }

    pub fn kind(&self) -> StratumKind {
        self.kind
    }

    pub fn is_abelian(&self) -> bool {
        self.kind == StratumKind::Abelian
    }

    /// Orders of the singularities, largest first.
    pub fn zeros(&self) -> &[i64] {
        &self.zeros
    }

    /// Number of singularities (marked points included).
    pub fn nb_zeros(&self) -> usize {
        self.zeros.len()
    }

    /// Genus from Gauss–Bonnet.
    ///
    /// Panics when the orders do not add up to a connected surface.
    pub fn genus(&self) -> usize {
        let g = self.signed_genus();
        assert!(g >= 0, "negative genus for stratum {self}");
        g as usize
    }

    /// `Σ kᵢ / 2 + 1` or `Σ kᵢ / 4 + 1`, negative for a disjoint union of
    /// spheres.
    pub fn signed_genus(&self) -> i64 {
        let total: i64 = self.zeros.iter().sum();
        match self.kind {
            StratumKind::Abelian => {
                assert!(total % 2 == 0, "Abelian stratum with odd total order {total}");
                total / 2 + 1
            }
            StratumKind::Quadratic => {
                assert!(total % 4 == 0, "quadratic stratum with total order {total} not divisible by 4");
                total / 4 + 1
            }
        }
    }

    /// Euler characteristic 2 − 2g.
    pub fn euler_characteristic(&self) -> i64 {
        2 - 2 * self.signed_genus()
    }
}

impl fmt::Display for Stratum {
    /// `H_2(2)`, `Q_0(0^2, -1^4)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.kind {
            StratumKind::Abelian => 'H',
            StratumKind::Quadratic => 'Q',
        };
        let mut parts: Vec<String> = Vec::new();
        let mut i = 0;
        while i < self.zeros.len() {
            let k = self.zeros[i];
            let mut j = i;
            while j < self.zeros.len() && self.zeros[j] == k {
                j += 1;
            }
            if j - i == 1 {
                parts.push(k.to_string());
            } else {
                parts.push(format!("{}^{}", k, j - i));
            }
            i = j;
        }
        write!(f, "{}_{}({})", letter, self.signed_genus(), parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abelian_from_profile() {
        let s = Stratum::from_profile(StratumKind::Abelian, &[2, 2, 2, 2]);
        assert_eq!(s.zeros(), &[0, 0, 0, 0]);
        assert_eq!(s.genus(), 1);
        assert_eq!(s.to_string(), "H_1(0^4)");

        let s = Stratum::from_profile(StratumKind::Abelian, &[6]);
        assert_eq!(s.to_string(), "H_2(2)");
        assert_eq!(s.euler_characteristic(), -2);
    }

    #[test]
    fn test_quadratic_from_profile() {
        let s = Stratum::from_profile(StratumKind::Quadratic, &[1, 2, 1, 1, 2, 1]);
        assert_eq!(s.zeros(), &[0, 0, -1, -1, -1, -1]);
        assert_eq!(s.genus(), 0);
        assert_eq!(s.to_string(), "Q_0(0^2, -1^4)");

        let s = Stratum::new(StratumKind::Quadratic, vec![-1, 1, 0, 0, 1, 0, 0, -1]);
        assert_eq!(s.to_string(), "Q_1(1^2, 0^4, -1^2)");
        assert_eq!(s.nb_zeros(), 8);
    }

    #[test]
    fn test_disconnected_stratum_has_negative_genus() {
        let s = Stratum::from_profile(StratumKind::Quadratic, &[1; 8]);
        assert_eq!(s.signed_genus(), -1);
        assert_eq!(s.to_string(), "Q_-1(-1^8)");
        assert_eq!(s.euler_characteristic(), 4);
    }

    #[test]
    #[should_panic]
    fn test_odd_angle_is_not_abelian() {
        Stratum::from_profile(StratumKind::Abelian, &[3, 1]);
    }
}
