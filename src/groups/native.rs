//! Native group theory for small permutation groups
//!
//! Groups are enumerated by closure under the generators. Centralizers in a
//! symmetric group are found by backtracking: an element commuting with the
//! generators is determined on each orbit by the image of one point, so
//! only one choice per orbit has to be tried.

use std::collections::{HashSet, VecDeque};

use crate::error::{CoverError, CoverResult};
use crate::permutation::Permutation;

use super::dixon::CharacterTable;
use super::group::{GroupTheoryProvider, PermutationGroup};

/// Largest group the native provider agrees to enumerate.
pub const DEFAULT_MAX_ORDER: usize = 100_000;

/// All elements of the group generated by `generators` on `0..degree`,
/// identity first.
pub fn enumerate(generators: &[Permutation], degree: usize) -> CoverResult<Vec<Permutation>> {
    enumerate_bounded(generators, degree, DEFAULT_MAX_ORDER)
}

fn enumerate_bounded(
    generators: &[Permutation],
    degree: usize,
    max_order: usize,
) -> CoverResult<Vec<Permutation>> {
    if let Some(g) = generators.iter().find(|g| g.len() != degree) {
        return Err(CoverError::GroupTheory(format!(
            "generator {g} does not act on {degree} points"
        )));
    }
    let identity = Permutation::id(degree);
    let mut seen: HashSet<Permutation> = HashSet::new();
    seen.insert(identity.clone());
    let mut all = vec![identity];
    let mut i = 0;
    while i < all.len() {
        for s in generators {
            let h = s.compose(&all[i]);
            if seen.insert(h.clone()) {
                if all.len() == max_order {
                    return Err(CoverError::GroupTheory(format!(
                        "group has more than {max_order} elements"
                    )));
                }
                all.push(h);
            }
        }
        i += 1;
    }
    Ok(all)
}

/// Orbits of the group generated by `generators`.
fn orbits(generators: &[Permutation], degree: usize) -> Vec<Vec<usize>> {
    let mut seen = vec![false; degree];
    let mut out = Vec::new();
    for start in 0..degree {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut orbit = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(x) = queue.pop_front() {
            for g in generators {
                let y = g.apply(x);
                if !seen[y] {
                    seen[y] = true;
                    orbit.push(y);
                    queue.push_back(y);
                }
            }
        }
        out.push(orbit);
    }
    out
}

/// Extend a partial commuting map over the orbit of `start`, after setting
/// `start ↦ target`. Returns false on a conflict.
fn propagate(
    generators: &[Permutation],
    image: &mut [Option<usize>],
    used: &mut [bool],
    start: usize,
    target: usize,
) -> bool {
    image[start] = Some(target);
    used[target] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(x) = queue.pop_front() {
        let Some(cx) = image[x] else { continue };
        for g in generators {
            let gx = g.apply(x);
            let want = g.apply(cx);
            match image[gx] {
                Some(existing) if existing != want => return false,
                Some(_) => {}
                None => {
                    if used[want] {
                        return false;
                    }
                    image[gx] = Some(want);
                    used[want] = true;
                    queue.push_back(gx);
                }
            }
        }
    }
    true
}

/// Elements of the centralizer of `generators` in Sym(degree), or `None`
/// as soon as more than `limit` of them have been found.
fn centralizer_in_symmetric(
    generators: &[Permutation],
    degree: usize,
    limit: usize,
) -> Option<Vec<Permutation>> {
    let orbits = orbits(generators, degree);
    let mut found = Vec::new();
    let mut image = vec![None; degree];
    let mut used = vec![false; degree];
    backtrack(generators, &orbits, 0, &mut image, &mut used, &mut found, limit).then_some(found)
}

/// Returns false once `found` outgrows `limit`.
fn backtrack(
    generators: &[Permutation],
    orbits: &[Vec<usize>],
    depth: usize,
    image: &mut Vec<Option<usize>>,
    used: &mut Vec<bool>,
    found: &mut Vec<Permutation>,
    limit: usize,
) -> bool {
    if depth == orbits.len() {
        let map: Vec<usize> = image.iter().map(|x| x.unwrap_or(usize::MAX)).collect();
        if let Ok(c) = Permutation::try_from_map(map) {
            found.push(c);
        }
        return found.len() <= limit;
    }
    let rep = orbits[depth][0];
    let size = orbits[depth].len();
    for target in 0..image.len() {
        if used[target] {
            continue;
        }
        // the orbit must land on an orbit of the same size
        if !orbits.iter().any(|o| o.len() == size && o.contains(&target)) {
            continue;
        }
        let mut trial_image = image.clone();
        let mut trial_used = used.clone();
        if propagate(generators, &mut trial_image, &mut trial_used, rep, target)
            && !backtrack(
                generators,
                orbits,
                depth + 1,
                &mut trial_image,
                &mut trial_used,
                found,
                limit,
            )
        {
            return false;
        }
    }
    true
}

/// Group theory by enumeration, suitable for the small deck groups of
/// finite covers.
#[derive(Debug, Clone, Copy)]
pub struct NativeGroupTheory {
    pub max_order: usize,
}

impl Default for NativeGroupTheory {
    fn default() -> Self {
        Self {
            max_order: DEFAULT_MAX_ORDER,
        }
    }
}

impl GroupTheoryProvider for NativeGroupTheory {
    fn group(&self, generators: &[Permutation], degree: usize) -> CoverResult<PermutationGroup> {
        if let Some(g) = generators.iter().find(|g| g.len() != degree) {
            return Err(CoverError::GroupTheory(format!(
                "generator {g} does not act on {degree} points"
            )));
        }
        Ok(PermutationGroup::new(degree, generators.to_vec()))
    }

    fn symmetric_group(&self, degree: usize) -> PermutationGroup {
        PermutationGroup::symmetric(degree)
    }

    fn centralizer(
        &self,
        ambient: &PermutationGroup,
        subgroup: &PermutationGroup,
    ) -> CoverResult<PermutationGroup> {
        let degree = ambient.degree();
        if subgroup.degree() != degree {
            return Err(CoverError::GroupTheory(format!(
                "cannot centralize a group on {} points inside one on {degree} points",
                subgroup.degree()
            )));
        }
        let gens = subgroup.generators();
        let too_large = || {
            CoverError::GroupTheory(format!(
                "centralizer has more than {} elements",
                self.max_order
            ))
        };
        let elements: Vec<Permutation> = if ambient.is_symmetric() {
            centralizer_in_symmetric(gens, degree, self.max_order).ok_or_else(too_large)?
        } else {
            self.elements(ambient)?
                .into_iter()
                .filter(|c| gens.iter().all(|g| c.compose(g) == g.compose(c)))
                .collect()
        };
        tracing::debug!(order = elements.len(), "centralizer");
        if elements.len() > self.max_order {
            return Err(too_large());
        }
        Ok(PermutationGroup::from_elements(degree, elements))
    }

    fn order(&self, group: &PermutationGroup) -> CoverResult<usize> {
        if group.is_symmetric() {
            return (1..=group.degree())
                .try_fold(1usize, |acc, k| acc.checked_mul(k))
                .ok_or_else(|| CoverError::GroupTheory("group order overflows".to_string()));
        }
        Ok(self.elements(group)?.len())
    }

    fn elements(&self, group: &PermutationGroup) -> CoverResult<Vec<Permutation>> {
        let els = group.elements_with(|g| {
            enumerate_bounded(g.generators(), g.degree(), self.max_order)
        })?;
        Ok(els.as_ref().clone())
    }

    fn character_table(&self, group: &PermutationGroup) -> CoverResult<CharacterTable> {
        CharacterTable::burnside_dixon(self.elements(group)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str, n: usize) -> Permutation {
        Permutation::parse_cycles(s, n).unwrap()
    }

    #[test]
    fn test_enumerate() {
        let els = enumerate(&[p("(1,2)", 3), p("(1,2,3)", 3)], 3).unwrap();
        assert_eq!(els.len(), 6);
        assert!(els[0].is_identity());
        assert_eq!(enumerate(&[], 4).unwrap().len(), 1);
        assert!(enumerate(&[p("(1,2)", 2)], 3).is_err());
    }

    #[test]
    fn test_enumeration_bound() {
        let provider = NativeGroupTheory { max_order: 10 };
        let s4 = provider.symmetric_group(4);
        assert_eq!(provider.order(&s4).unwrap(), 24);
        let g = provider.group(s4.generators(), 4).unwrap();
        assert!(provider.elements(&g).is_err());
    }

    #[test]
    fn test_centralizer_of_regular_cyclic_group() {
        let provider = NativeGroupTheory::default();
        let h = provider.group(&[Permutation::rotation(5, 1)], 5).unwrap();
        let c = provider.centralizer(&provider.symmetric_group(5), &h).unwrap();
        assert_eq!(provider.order(&c).unwrap(), 5);
        let els = provider.elements(&c).unwrap();
        assert!(els.iter().all(|g| g.pow(5).is_identity()));
    }

    #[test]
    fn test_centralizer_of_transitive_s3_is_trivial() {
        let provider = NativeGroupTheory::default();
        let h = provider.group(&[p("(1,2)", 3), p("(1,3)", 3)], 3).unwrap();
        let c = provider.centralizer(&provider.symmetric_group(3), &h).unwrap();
        assert_eq!(provider.order(&c).unwrap(), 1);
    }

    #[test]
    fn test_centralizer_of_trivial_group_is_everything() {
        let provider = NativeGroupTheory::default();
        let h = provider.group(&[], 4).unwrap();
        let c = provider.centralizer(&provider.symmetric_group(4), &h).unwrap();
        assert_eq!(provider.order(&c).unwrap(), 24);
    }

    #[test]
    fn test_centralizer_with_fixed_points() {
        // <(1,2)> on 4 points: centralizer is <(1,2)> x Sym{3,4}
        let provider = NativeGroupTheory::default();
        let h = provider.group(&[p("(1,2)", 4)], 4).unwrap();
        let c = provider.centralizer(&provider.symmetric_group(4), &h).unwrap();
        assert_eq!(provider.order(&c).unwrap(), 4);
    }

    #[test]
    fn test_centralizer_inside_subgroup() {
        let provider = NativeGroupTheory::default();
        let s3 = provider.group(&[p("(1,2)", 3), p("(1,2,3)", 3)], 3).unwrap();
        let h = provider.group(&[p("(1,2,3)", 3)], 3).unwrap();
        let c = provider.centralizer(&s3, &h).unwrap();
        assert_eq!(provider.order(&c).unwrap(), 3);
    }

    #[test]
    fn test_centralizer_bound_stops_search_early() {
        let provider = NativeGroupTheory { max_order: 1000 };
        let h = provider.group(&[], 10).unwrap();
        let start = std::time::Instant::now();
        let c = provider.centralizer(&provider.symmetric_group(10), &h);
        assert!(matches!(c, Err(CoverError::GroupTheory(_))));
        assert!(start.elapsed() < std::time::Duration::from_millis(500));
    }

    #[test]
    fn test_centralizer_bound_is_inclusive() {
        let h = NativeGroupTheory::default().group(&[], 4).unwrap();
        let exact = NativeGroupTheory { max_order: 24 };
        let c = exact.centralizer(&exact.symmetric_group(4), &h).unwrap();
        assert_eq!(exact.order(&c).unwrap(), 24);
        let short = NativeGroupTheory { max_order: 23 };
        assert!(short.centralizer(&short.symmetric_group(4), &h).is_err());
    }
}
