//! Permutations of the sheets `0..d` of a cover.
//!
//! A `Permutation` stores its direct mapping (`map[i]` is the image of `i`)
//! together with the inverse mapping, so that both directions of an
//! interval crossing are a single lookup.
//!
//! Textual form follows the usual one-indexed cycle notation: `"(1,2)(3,4)"`,
//! with `"()"` for the identity.

use std::fmt;
use std::str::FromStr;

use num::integer::lcm;

use crate::error::{CoverError, CoverResult};

/// A bijection of `0..n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation {
    map: Vec<usize>,
    inv: Vec<usize>,
}

impl Permutation {
    /// Identity permutation of `0..n`.
    pub fn id(n: usize) -> Self {
        Permutation {
            map: (0..n).collect(),
            inv: (0..n).collect(),
        }
    }

    /// Transposition of `i` and `j` on `0..n`.
    pub fn transposition(n: usize, i: usize, j: usize) -> Self {
        let mut map: Vec<usize> = (0..n).collect();
        map.swap(i, j);
        Permutation {
            inv: map.clone(),
            map,
        }
    }

    /// Cyclic shift `i ↦ i + k (mod n)`.
    pub fn rotation(n: usize, k: usize) -> Self {
        let k = if n == 0 { 0 } else { k % n };
        Permutation {
            map: (0..n).map(|i| (i + k) % n).collect(),
            inv: (0..n).map(|i| (i + n - k) % n).collect(),
        }
    }

    /// Build from a zero-indexed image list, checking that it is a bijection.
    pub fn try_from_map(map: Vec<usize>) -> CoverResult<Self> {
        let n = map.len();
        let mut inv = vec![usize::MAX; n];
        for (i, &j) in map.iter().enumerate() {
            if j >= n {
                return Err(CoverError::InvalidArgument(format!(
                    "image {j} of {i} is out of range for a permutation of {n} points"
                )));
            }
            if inv[j] != usize::MAX {
                return Err(CoverError::InvalidArgument(format!(
                    "{j} is the image of both {} and {i}",
                    inv[j]
                )));
            }
            inv[j] = i;
        }
        Ok(Permutation { map, inv })
    }

    /// Build from a one-indexed image list, `[2, 3, 1]` being the 3-cycle
    /// `(1,2,3)`.
    pub fn from_one_line(images: &[usize]) -> CoverResult<Self> {
        let map = images
            .iter()
            .map(|&x| {
                x.checked_sub(1).ok_or_else(|| {
                    CoverError::InvalidArgument("one-line images start at 1".to_string())
                })
            })
            .collect::<CoverResult<Vec<_>>>()?;
        Self::try_from_map(map)
    }

    /// Build from disjoint zero-indexed cycles on `0..n`.
    pub fn from_cycles(cycles: &[Vec<usize>], n: usize) -> CoverResult<Self> {
        let mut map: Vec<usize> = (0..n).collect();
        let mut seen = vec![false; n];
        for cycle in cycles {
            for (k, &x) in cycle.iter().enumerate() {
                if x >= n {
                    return Err(CoverError::InvalidArgument(format!(
                        "point {} does not fit in a permutation of {n} points",
                        x + 1
                    )));
                }
                if seen[x] {
                    return Err(CoverError::InvalidArgument(format!(
                        "point {} appears twice in the cycle notation",
                        x + 1
                    )));
                }
                seen[x] = true;
                map[x] = cycle[(k + 1) % cycle.len()];
            }
        }
        Self::try_from_map(map)
    }

    /// Parse one-indexed cycle notation on exactly `n` points.
    pub fn parse_cycles(s: &str, n: usize) -> CoverResult<Self> {
        let cycles = parse_cycle_notation(s)?;
        Self::from_cycles(&cycles, n)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Image of `i`.
    #[inline]
    pub fn apply(&self, i: usize) -> usize {
        self.map[i]
    }

    /// Preimage of `i`.
    #[inline]
    pub fn apply_inv(&self, i: usize) -> usize {
        self.inv[i]
    }

    /// Zero-indexed image list.
    pub fn images(&self) -> &[usize] {
        &self.map
    }

    pub fn inverse(&self) -> Self {
        Permutation {
            map: self.inv.clone(),
            inv: self.map.clone(),
        }
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        let map: Vec<usize> = other.map.iter().map(|&i| self.map[i]).collect();
        let mut inv = vec![0; map.len()];
        for (i, &j) in map.iter().enumerate() {
            inv[j] = i;
        }
        Permutation { map, inv }
    }

    pub fn pow(&self, k: usize) -> Self {
        let mut result = Permutation::id(self.len());
        let mut base = self.clone();
        let mut exp = k;
        while exp > 0 {
            if exp % 2 == 1 {
                result = result.compose(&base);
            }
            base = base.compose(&base);
            exp /= 2;
        }
        result
    }

    /// Same permutation acting on `0..n` with `n >= len()`, fixing the new
    /// points.
    pub fn extended(&self, n: usize) -> Self {
        let mut map = self.map.clone();
        map.extend(self.len()..n);
        let mut inv = self.inv.clone();
        inv.extend(self.len()..n);
        Permutation { map, inv }
    }

    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &j)| i == j)
    }

    /// Cycle decomposition, fixed points included, each cycle starting at
    /// its smallest point.
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.len()];
        let mut cycles = Vec::new();
        for i in 0..self.len() {
            if visited[i] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = i;
            while !visited[j] {
                visited[j] = true;
                cycle.push(j);
                j = self.map[j];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Cycle lengths in non-increasing order.
    pub fn cycle_type(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.find_cycles().iter().map(Vec::len).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }

    /// Multiplicative order.
    pub fn order(&self) -> usize {
        self.find_cycles()
            .iter()
            .map(Vec::len)
            .fold(1, lcm)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for cycle in self.find_cycles().into_iter().filter(|c| c.len() > 1) {
            any = true;
            let points: Vec<String> = cycle.iter().map(|x| (x + 1).to_string()).collect();
            write!(f, "({})", points.join(","))?;
        }
        if !any {
            write!(f, "()")?;
        }
        Ok(())
    }
}

/// Parses cycle notation on the smallest number of points it mentions.
impl FromStr for Permutation {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cycles = parse_cycle_notation(s)?;
        let n = cycles.iter().flatten().map(|&x| x + 1).max().unwrap_or(0);
        Self::from_cycles(&cycles, n)
    }
}

/// Splits `"(1,2)(3,4,5)"` into zero-indexed cycles.
pub(crate) fn parse_cycle_notation(s: &str) -> CoverResult<Vec<Vec<usize>>> {
    let mut cycles = Vec::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let body_start = rest
            .strip_prefix('(')
            .ok_or_else(|| CoverError::Parse(format!("expected '(' in cycle notation {s:?}")))?;
        let close = body_start
            .find(')')
            .ok_or_else(|| CoverError::Parse(format!("unbalanced parenthesis in {s:?}")))?;
        let body = &body_start[..close];
        let mut cycle = Vec::new();
        for token in body.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let x: usize = token
                .parse()
                .map_err(|_| CoverError::Parse(format!("{token:?} is not a point in {s:?}")))?;
            if x == 0 {
                return Err(CoverError::Parse(format!(
                    "cycle notation is one-indexed, found 0 in {s:?}"
                )));
            }
            cycle.push(x - 1);
        }
        if !cycle.is_empty() {
            cycles.push(cycle);
        }
        rest = body_start[close + 1..].trim_start();
    }
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let p: Permutation = "(1,2,3)(5,4)".parse().unwrap();
        assert_eq!(p.len(), 5);
        assert_eq!(p.images(), &[1, 2, 0, 4, 3]);
        assert_eq!(p.to_string(), "(1,2,3)(4,5)");

        let id: Permutation = "()".parse().unwrap();
        assert!(id.is_empty());
        assert_eq!(Permutation::id(3).to_string(), "()");
    }

    #[test]
    fn test_parse_errors() {
        assert!("(1,2".parse::<Permutation>().is_err());
        assert!("(0,1)".parse::<Permutation>().is_err());
        assert!("(1,2)(2,3)".parse::<Permutation>().is_err());
        assert!("1,2".parse::<Permutation>().is_err());
        assert!(Permutation::parse_cycles("(1,4)", 3).is_err());
    }

    #[test]
    fn test_try_from_map_rejects_non_bijections() {
        assert!(Permutation::try_from_map(vec![0, 0, 1]).is_err());
        assert!(Permutation::try_from_map(vec![0, 3, 1]).is_err());
        assert!(Permutation::try_from_map(vec![2, 0, 1]).is_ok());
    }

    #[test]
    fn test_compose_applies_right_first() {
        let a = Permutation::parse_cycles("(1,2)", 3).unwrap();
        let b = Permutation::parse_cycles("(2,3)", 3).unwrap();
        let ab = a.compose(&b);
        // 1 -> 1 -> 2, 2 -> 3 -> 3, 3 -> 2 -> 1
        assert_eq!(ab.images(), &[1, 2, 0]);
        assert!(ab.compose(&ab.inverse()).is_identity());
    }

    #[test]
    fn test_order_and_cycle_type() {
        let p = Permutation::parse_cycles("(1,2,3)(4,5)", 6).unwrap();
        assert_eq!(p.order(), 6);
        assert_eq!(p.cycle_type(), vec![3, 2, 1]);
        assert!(p.pow(6).is_identity());
        assert!(!p.pow(3).is_identity());
    }

    #[test]
    fn test_rotation_and_transposition() {
        let r = Permutation::rotation(5, 2);
        assert_eq!(r.images(), &[2, 3, 4, 0, 1]);
        assert!(r.compose(&r.inverse()).is_identity());
        assert_eq!(r.order(), 5);
        let t = Permutation::transposition(3, 0, 2);
        assert_eq!(t.to_string(), "(1,3)");
        assert_eq!(t, t.inverse());
    }

    #[test]
    fn test_one_line_and_extension() {
        let p = Permutation::from_one_line(&[2, 3, 1]).unwrap();
        assert_eq!(p.to_string(), "(1,2,3)");
        let q = p.extended(5);
        assert_eq!(q.images(), &[1, 2, 0, 3, 4]);
        assert_eq!(q.apply_inv(0), 2);
        assert!(Permutation::from_one_line(&[0, 1]).is_err());
    }
}
