//! Topological invariants of the covering surface
//!
//! Every singularity of the base lifts to one or several singularities of
//! the cover. Turning once around a base singularity permutes the sheets by
//! the product of the sheet permutations met along the way; a cycle of
//! length ℓ of that product is a single singularity upstairs whose angle is
//! ℓ times the angle downstairs.

use std::collections::BTreeSet;

use crate::permutation::{BasePermutation, PermutationKind, Permutation, Sign};
use crate::surface::{Stratum, StratumKind};

use super::model::PermutationCover;

/// One crossing of an interval of a given sheet while turning around a
/// singularity of the cover.
///
/// `sheet` is the copy the crossed edge belongs to in the relative homology
/// basis: the sheet reached after a positive crossing, the sheet left by a
/// negative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoverCrossing {
    pub label: usize,
    pub sign: Sign,
    pub sheet: usize,
}

/// Cyclic sequence of crossings around one singularity of the cover.
pub type SingularityOrbit = Vec<CoverCrossing>;

impl<P: BasePermutation> PermutationCover<P> {
    /// Crossing for the positive occurrence moves sheet `c` to `σ_a(c)`,
    /// the negative one moves it back.
    fn cross(&self, label: usize, sign: Sign, sheet: usize) -> usize {
        match sign {
            Sign::Positive => self.monodromy()[label].apply(sheet),
            Sign::Negative => self.monodromy()[label].apply_inv(sheet),
        }
    }

    /// Signed interval diagram of the cover: one orbit per singularity.
    pub fn interval_diagram(&self) -> Vec<SingularityOrbit> {
        let mut orbits = Vec::new();
        for base_orbit in self.base().interval_diagram(false) {
            let crossings: Vec<_> = base_orbit
                .iter()
                .flat_map(|entry| entry.crossings().iter().copied())
                .collect();
            let mut pending: BTreeSet<usize> = (0..self.degree()).collect();
            while let Some(start) = pending.pop_first() {
                let mut orbit = Vec::new();
                let mut sheet = start;
                loop {
                    for c in &crossings {
                        let next = self.cross(c.label, c.sign, sheet);
                        let named = match c.sign {
                            Sign::Positive => next,
                            Sign::Negative => sheet,
                        };
                        orbit.push(CoverCrossing {
                            label: c.label,
                            sign: c.sign,
                            sheet: named,
                        });
                        sheet = next;
                    }
                    if sheet == start {
                        break;
                    }
                    assert!(
                        pending.remove(&sheet),
                        "sheet {sheet} visited twice around one singularity"
                    );
                }
                orbits.push(orbit);
            }
        }
        orbits
    }

    /// Cone angles of the cover in units of π, largest first.
    pub fn profile(&self) -> Vec<usize> {
        let mut profile = Vec::new();
        for base_orbit in self.base().interval_diagram(true) {
            let angle = base_orbit.len();
            let turn = base_orbit
                .iter()
                .flat_map(|entry| entry.crossings().iter())
                .fold(Permutation::id(self.degree()), |acc, c| {
                    let sigma = &self.monodromy()[c.label];
                    match c.sign {
                        Sign::Positive => sigma.compose(&acc),
                        Sign::Negative => sigma.inverse().compose(&acc),
                    }
                });
            profile.extend(turn.cycle_type().into_iter().map(|l| l * angle));
        }
        profile.sort_unstable_by(|a, b| b.cmp(a));
        profile
    }

    /// Whether the vertical foliation of the cover is orientable.
    ///
    /// Sheets get an orientation sign; crossing a label whose two
    /// occurrences sit on the same row flips it, any other label keeps it.
    pub fn is_orientable(&self) -> bool {
        if self.base().kind() == PermutationKind::Orientable {
            return true;
        }
        if self.profile().iter().any(|k| k % 2 == 1) {
            return false;
        }
        let top: BTreeSet<usize> = self.row(0).iter().copied().collect();
        let bottom: BTreeSet<usize> = self.row(1).iter().copied().collect();
        let flips: Vec<bool> = (0..self.len())
            .map(|a| top.contains(&a) != bottom.contains(&a))
            .collect();

        let mut signs: Vec<Option<bool>> = vec![None; self.degree()];
        for root in 0..self.degree() {
            if signs[root].is_some() {
                continue;
            }
            signs[root] = Some(true);
            let mut todo = vec![root];
            while let Some(c) = todo.pop() {
                let Some(s) = signs[c] else { continue };
                for (a, sigma) in self.monodromy().iter().enumerate() {
                    let image = sigma.apply(c);
                    let want = s != flips[a];
                    match signs[image] {
                        None => {
                            signs[image] = Some(want);
                            todo.push(image);
                        }
                        Some(t) if t != want => return false,
                        Some(_) => {}
                    }
                }
            }
        }
        true
    }

    pub fn stratum(&self) -> Stratum {
        let kind = if self.is_orientable() {
            StratumKind::Abelian
        } else {
            StratumKind::Quadratic
        };
        Stratum::from_profile(kind, &self.profile())
    }

    /// Genus of the covering surface, from `Σ angles − 2·#singularities =
    /// 4g − 4`. A disconnected cover reports the sum over its components
    /// of `g − 1`, plus one.
    pub fn genus(&self) -> i64 {
        let profile = self.profile();
        let total: usize = profile.iter().sum();
        let t = total as i64 - 2 * profile.len() as i64;
        assert!(t % 4 == 0, "angle sum {total} of {} singularities is not a surface", profile.len());
        t / 4 + 1
    }

    pub fn base_stratum(&self) -> Stratum {
        self.base().stratum()
    }

    pub fn base_genus(&self) -> usize {
        self.base().genus()
    }
}
