//! Labelled two-row permutations
//!
//! An interval exchange permutation has each label once on the top row and
//! once on the bottom row. A generalized permutation (linear involution) has
//! each label exactly twice, possibly both times on the same row.
//!
//! ## Conventions
//!
//! Occurrences are addressed by `(side, position)` with side 0 the top row
//! and side 1 the bottom row. The first occurrence of a label in reading
//! order (top row left to right, then bottom row left to right) carries the
//! positive sign, the second one the negative sign.
//!
//! The singularities of the suspension are traced clockwise. Arriving at top
//! position `j` one next crosses top position `j − 1`; past the left end one
//! crosses bottom position 0. Arriving at bottom position `k` one next
//! crosses bottom position `k + 1`; past the right end one crosses the last
//! top position. Crossing an occurrence means arriving at its twin. Each
//! crossing sweeps an angle π, except the two end turns which sweep 0.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::cover::PermutationCover;
use crate::error::{CoverError, CoverResult};
use crate::surface::{Stratum, StratumKind};

use super::Permutation;

/// Ordered finite set of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    labels: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl Alphabet {
    /// Alphabet with the given order; duplicate labels are rejected.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> CoverResult<Self> {
        let mut ranks = HashMap::new();
        let mut out = Vec::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            let label = label.as_ref().to_string();
            if ranks.insert(label.clone(), i).is_some() {
                return Err(CoverError::Parse(format!("label {label:?} listed twice")));
            }
            out.push(label);
        }
        Ok(Self { labels: out, ranks })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn rank(&self, label: &str) -> Option<usize> {
        self.ranks.get(label).copied()
    }

    pub fn label(&self, rank: usize) -> &str {
        &self.labels[rank]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.labels.join(", "))
    }
}

/// Which family a base permutation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermutationKind {
    /// Interval exchange: orientable foliation.
    Orientable,
    /// Linear involution.
    General,
}

/// Sign of an occurrence: positive for the first occurrence of its label in
/// reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// 0 for positive, 1 for negative.
    pub fn index(self) -> usize {
        match self {
            Sign::Positive => 0,
            Sign::Negative => 1,
        }
    }
}

/// Position of a label on one of the two rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub side: usize,
    pub pos: usize,
}

impl Occurrence {
    pub fn new(side: usize, pos: usize) -> Self {
        Self { side, pos }
    }
}

/// One crossing of an interval while turning around a singularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crossing {
    pub label: usize,
    pub sign: Sign,
}

/// Entry of an interval diagram orbit. With glued ends, crossings made
/// through an end of the interval are merged with the crossing before them,
/// so that every entry sweeps an angle π.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramEntry {
    Single(Crossing),
    Glued(Vec<Crossing>),
}

impl DiagramEntry {
    pub fn crossings(&self) -> &[Crossing] {
        match self {
            DiagramEntry::Single(c) => std::slice::from_ref(c),
            DiagramEntry::Glued(cs) => cs,
        }
    }
}

/// Capabilities a base permutation must provide to be covered.
pub trait BasePermutation: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync {
    fn kind(&self) -> PermutationKind;

    fn alphabet(&self) -> &Alphabet;

    /// Label ranks along row `side` (0 top, 1 bottom).
    fn row(&self, side: usize) -> &[usize];

    /// Other occurrence of the same label.
    fn twin(&self, occ: Occurrence) -> Occurrence;

    fn sign(&self, occ: Occurrence) -> Sign;

    fn is_irreducible(&self) -> bool;

    /// Number of intervals, i.e. size of the alphabet.
    fn n_intervals(&self) -> usize {
        self.alphabet().len()
    }

    /// Signed interval diagram: one orbit of crossings per singularity of
    /// the suspension.
    fn interval_diagram(&self, glue_ends: bool) -> Vec<Vec<DiagramEntry>> {
        trace_orbits(self)
            .into_iter()
            .map(|orbit| {
                let crossing = |occ: Occurrence| Crossing {
                    label: self.row(occ.side)[occ.pos],
                    sign: self.sign(occ),
                };
                if !glue_ends {
                    return orbit
                        .into_iter()
                        .map(|(occ, _)| DiagramEntry::Single(crossing(occ)))
                        .collect();
                }
                let mut entries: Vec<Vec<Crossing>> = Vec::new();
                for (occ, through_end) in orbit {
                    match entries.last_mut() {
                        Some(group) if through_end => group.push(crossing(occ)),
                        _ => entries.push(vec![crossing(occ)]),
                    }
                }
                entries
                    .into_iter()
                    .map(|mut group| {
                        if group.len() == 1 {
                            DiagramEntry::Single(group.remove(0))
                        } else {
                            DiagramEntry::Glued(group)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Cone angles of the suspension in units of π, largest first.
    fn profile(&self) -> Vec<usize> {
        let mut p: Vec<usize> = self.interval_diagram(true).iter().map(Vec::len).collect();
        p.sort_unstable_by(|a, b| b.cmp(a));
        p
    }

    fn stratum(&self) -> Stratum {
        let kind = match self.kind() {
            PermutationKind::Orientable => StratumKind::Abelian,
            PermutationKind::General => StratumKind::Quadratic,
        };
        Stratum::from_profile(kind, &self.profile())
    }

    fn genus(&self) -> usize {
        self.stratum().genus()
    }
}

/// Next crossing after arriving at `occ`, and whether the turn went through
/// an end of the interval.
fn next_crossing<P: BasePermutation + ?Sized>(p: &P, occ: Occurrence) -> (Occurrence, bool) {
    let top = p.row(0).len();
    let bottom = p.row(1).len();
    match (occ.side, occ.pos) {
        (0, 0) => (Occurrence::new(1, 0), true),
        (0, j) => (Occurrence::new(0, j - 1), false),
        (_, k) if k + 1 == bottom => (Occurrence::new(0, top - 1), true),
        (_, k) => (Occurrence::new(1, k + 1), false),
    }
}

/// Orbits of the crossing map over all occurrences. Each orbit is rotated
/// to start with a crossing not reached through an end.
fn trace_orbits<P: BasePermutation + ?Sized>(p: &P) -> Vec<Vec<(Occurrence, bool)>> {
    let mut seen: HashSet<Occurrence> = HashSet::new();
    let mut orbits = Vec::new();
    for side in 0..2 {
        for pos in 0..p.row(side).len() {
            let start = Occurrence::new(side, pos);
            if seen.contains(&start) {
                continue;
            }
            let mut orbit = Vec::new();
            let mut through_end = false;
            let mut occ = start;
            loop {
                let (next, end) = next_crossing(p, p.twin(occ));
                orbit.push((occ, through_end));
                seen.insert(occ);
                through_end = end;
                occ = next;
                if occ == start {
                    break;
                }
            }
            // the start itself was reached from the last element
            orbit[0].1 = through_end;
            if let Some(first) = orbit.iter().position(|&(_, e)| !e) {
                orbit.rotate_left(first);
            }
            orbits.push(orbit);
        }
    }
    orbits
}

/// A concrete base permutation given by its two labelled rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledPermutation {
    kind: PermutationKind,
    alphabet: Alphabet,
    rows: [Vec<usize>; 2],
    twins: [Vec<Occurrence>; 2],
    signs: [Vec<Sign>; 2],
}

impl LabelledPermutation {
    /// Interval exchange permutation from two whitespace separated rows,
    /// e.g. `("a b c", "c b a")`.
    pub fn iet(top: &str, bottom: &str) -> CoverResult<Self> {
        let p = Self::build(PermutationKind::Orientable, top, bottom)?;
        for side in 0..2 {
            for (pos, &twin) in p.twins[side].iter().enumerate() {
                if twin.side == side {
                    return Err(CoverError::Parse(format!(
                        "label {:?} appears twice on the same row of an interval exchange",
                        p.alphabet.label(p.rows[side][pos])
                    )));
                }
            }
        }
        Ok(p)
    }

    /// Generalized permutation (linear involution) from two rows.
    pub fn generalized(top: &str, bottom: &str) -> CoverResult<Self> {
        Self::build(PermutationKind::General, top, bottom)
    }

    fn build(kind: PermutationKind, top: &str, bottom: &str) -> CoverResult<Self> {
        let words: [Vec<&str>; 2] = [
            top.split_whitespace().collect(),
            bottom.split_whitespace().collect(),
        ];
        if words[0].is_empty() || words[1].is_empty() {
            return Err(CoverError::Parse("both rows must be non-empty".to_string()));
        }

        let mut order: Vec<&str> = Vec::new();
        let mut places: HashMap<&str, Vec<Occurrence>> = HashMap::new();
        for (side, row) in words.iter().enumerate() {
            for (pos, &w) in row.iter().enumerate() {
                let entry = places.entry(w).or_default();
                if entry.is_empty() {
                    order.push(w);
                }
                entry.push(Occurrence::new(side, pos));
            }
        }
        for (label, occs) in &places {
            if occs.len() != 2 {
                return Err(CoverError::Parse(format!(
                    "label {label:?} appears {} times instead of twice",
                    occs.len()
                )));
            }
        }

        let alphabet = Alphabet::new(&order)?;
        let rows = [
            words[0].iter().map(|w| alphabet.ranks[*w]).collect::<Vec<_>>(),
            words[1].iter().map(|w| alphabet.ranks[*w]).collect::<Vec<_>>(),
        ];
        let mut twins = [
            vec![Occurrence::new(0, 0); rows[0].len()],
            vec![Occurrence::new(0, 0); rows[1].len()],
        ];
        let mut signs = [
            vec![Sign::Positive; rows[0].len()],
            vec![Sign::Positive; rows[1].len()],
        ];
        for occs in places.values() {
            let (first, second) = (occs[0], occs[1]);
            twins[first.side][first.pos] = second;
            twins[second.side][second.pos] = first;
            signs[second.side][second.pos] = Sign::Negative;
        }

        Ok(Self {
            kind,
            alphabet,
            rows,
            twins,
            signs,
        })
    }

    /// Labels along one row.
    pub fn row_labels(&self, side: usize) -> Vec<&str> {
        self.rows[side].iter().map(|&r| self.alphabet.label(r)).collect()
    }

    /// Cover of this permutation from one-indexed cycle notations, one per
    /// label in alphabet order. The degree is the largest point mentioned.
    pub fn cover<S: AsRef<str>>(&self, permutations: &[S]) -> CoverResult<PermutationCover<Self>> {
        let cycles = permutations
            .iter()
            .map(|s| super::perm::parse_cycle_notation(s.as_ref()))
            .collect::<CoverResult<Vec<_>>>()?;
        let degree = cycles
            .iter()
            .flatten()
            .flatten()
            .map(|&x| x + 1)
            .max()
            .unwrap_or(1);
        let monodromy = cycles
            .iter()
            .map(|c| Permutation::from_cycles(c, degree))
            .collect::<CoverResult<Vec<_>>>()?;
        PermutationCover::new(self.clone(), degree, monodromy)
    }

    /// Orientation double cover of a linear involution: the two sheets are
    /// swapped by every label whose occurrences lie on the same row.
    pub fn orientation_cover(&self) -> CoverResult<PermutationCover<Self>> {
        if self.kind == PermutationKind::Orientable {
            return Err(CoverError::InvalidArgument(
                "an interval exchange already has an orientable foliation".to_string(),
            ));
        }
        let mut monodromy = vec![Permutation::id(2); self.alphabet.len()];
        for side in 0..2 {
            for (pos, &label) in self.rows[side].iter().enumerate() {
                if self.twins[side][pos].side == side {
                    monodromy[label] = Permutation::transposition(2, 0, 1);
                }
            }
        }
        PermutationCover::new(self.clone(), 2, monodromy)
    }

    /// Irreducibility of an interval exchange: no proper prefix of the top
    /// row has the same labels as the prefix of the same length of the
    /// bottom row.
    fn iet_irreducible(&self) -> bool {
        let n = self.rows[0].len();
        let mut top = HashSet::new();
        let mut bottom = HashSet::new();
        for k in 0..n - 1 {
            top.insert(self.rows[0][k]);
            bottom.insert(self.rows[1][k]);
            if top == bottom {
                return false;
            }
        }
        true
    }

    /// Irreducibility of a linear involution.
    ///
    /// Cut a prefix and a suffix off each row, keeping a non-empty middle.
    /// The permutation is reducible when the four corners decompose as
    ///
    /// ```text
    /// A1 ∪ B1 | ... | B1 ∪ C1
    /// A2 ∪ B2 | ... | B2 ∪ C2
    /// ```
    ///
    /// (`A1`/`A2` and `C1`/`C2` holding the same labels, `B1`, `B2` labels
    /// seen once in each corner of their row) and the empty corners are
    /// none, a single left one, or both corners of one side. Since every
    /// label occurs twice this is the multiset identity
    /// `top-left + bottom-right = top-right + bottom-left`.
    fn general_irreducible(&self) -> bool {
        let (l0, l1) = (self.rows[0].len(), self.rows[1].len());
        let mut balance = vec![0i64; self.alphabet.len()];
        for i11 in 0..l0 {
            for i12 in 0..l0 - i11 {
                for i21 in 0..l1 {
                    for i22 in 0..l1 - i21 {
                        let empty = [i11 == 0, i12 == 0, i21 == 0, i22 == 0];
                        let allowed = matches!(
                            empty,
                            [false, false, false, false]
                                | [true, false, false, false]
                                | [false, false, true, false]
                                | [true, false, true, false]
                                | [false, true, false, true]
                        );
                        if !allowed {
                            continue;
                        }
                        balance.iter_mut().for_each(|b| *b = 0);
                        for &label in self.rows[0][..i11].iter().chain(&self.rows[1][l1 - i22..]) {
                            balance[label] += 1;
                        }
                        for &label in self.rows[0][l0 - i12..].iter().chain(&self.rows[1][..i21]) {
                            balance[label] -= 1;
                        }
                        if balance.iter().all(|&b| b == 0) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

impl BasePermutation for LabelledPermutation {
    fn kind(&self) -> PermutationKind {
        self.kind
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn row(&self, side: usize) -> &[usize] {
        &self.rows[side]
    }

    fn twin(&self, occ: Occurrence) -> Occurrence {
        self.twins[occ.side][occ.pos]
    }

    fn sign(&self, occ: Occurrence) -> Sign {
        self.signs[occ.side][occ.pos]
    }

    fn is_irreducible(&self) -> bool {
        match self.kind {
            PermutationKind::Orientable => self.iet_irreducible(),
            PermutationKind::General => self.general_irreducible(),
        }
    }
}

impl fmt::Display for LabelledPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.row_labels(0).join(" "), self.row_labels(1).join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iet() {
        let p = LabelledPermutation::iet("a b c", "c b a").unwrap();
        assert_eq!(p.kind(), PermutationKind::Orientable);
        assert_eq!(p.alphabet().iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(p.row(1), &[2, 1, 0]);
        assert_eq!(p.twin(Occurrence::new(0, 0)), Occurrence::new(1, 2));
        assert_eq!(p.sign(Occurrence::new(0, 0)), Sign::Positive);
        assert_eq!(p.sign(Occurrence::new(1, 2)), Sign::Negative);
        assert_eq!(p.to_string(), "a b c\nc b a");

        assert!(LabelledPermutation::iet("a a", "b b").is_err());
        assert!(LabelledPermutation::iet("a b", "a c").is_err());
        assert!(LabelledPermutation::iet("", "a").is_err());
    }

    #[test]
    fn test_alphabet_is_first_appearance_order() {
        let p = LabelledPermutation::generalized("c a a", "b b c").unwrap();
        assert_eq!(p.alphabet().iter().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(p.alphabet().rank("b"), Some(2));
        assert_eq!(p.alphabet().rank("z"), None);
        assert_eq!(p.n_intervals(), 3);
    }

    #[test]
    fn test_iet_irreducibility() {
        assert!(LabelledPermutation::iet("a b c", "c b a").unwrap().is_irreducible());
        assert!(LabelledPermutation::iet("a b", "b a").unwrap().is_irreducible());
        assert!(!LabelledPermutation::iet("a b c", "a c b").unwrap().is_irreducible());
    }

    #[test]
    fn test_general_irreducibility() {
        for (top, bottom) in [
            ("a a b", "b c c"),
            ("c a a", "b b c"),
            ("e a a", "b b c c d d e"),
        ] {
            let p = LabelledPermutation::generalized(top, bottom).unwrap();
            assert!(p.is_irreducible(), "{top} / {bottom} should be irreducible");
        }
        // a | c over a | c splits off the middle
        let p = LabelledPermutation::generalized("a b b c", "a d d c").unwrap();
        assert!(!p.is_irreducible());
    }

    #[test]
    fn test_rotation_stratum() {
        let p = LabelledPermutation::iet("a b", "b a").unwrap();
        assert_eq!(p.profile(), vec![2]);
        assert_eq!(p.stratum().to_string(), "H_1(0)");
        assert_eq!(p.genus(), 1);
    }

    #[test]
    fn test_pillowcase_diagram() {
        let p = LabelledPermutation::generalized("a a b", "b c c").unwrap();
        let diagram = p.interval_diagram(true);
        assert_eq!(diagram.len(), 4);
        assert!(diagram.iter().all(|orbit| orbit.len() == 1));
        assert_eq!(p.stratum().to_string(), "Q_0(-1^4)");
        assert_eq!(p.genus(), 0);

        let unglued = p.interval_diagram(false);
        let crossings: usize = unglued.iter().map(Vec::len).sum();
        assert_eq!(crossings, 6);
    }

    #[test]
    fn test_every_occurrence_crossed_once() {
        let p = LabelledPermutation::generalized("e a a", "b b c c d d e").unwrap();
        let mut seen = HashSet::new();
        for orbit in p.interval_diagram(false) {
            for entry in orbit {
                for c in entry.crossings() {
                    assert!(seen.insert((c.label, c.sign)));
                }
            }
        }
        assert_eq!(seen.len(), 10);
        assert_eq!(p.stratum().to_string(), "Q_0(1, -1^5)");
    }

    #[test]
    fn test_genus_two_iet() {
        let p = LabelledPermutation::iet("a b c d", "d c b a").unwrap();
        assert_eq!(p.stratum().to_string(), "H_2(2)");
        let p = LabelledPermutation::iet("a b c", "c b a").unwrap();
        assert_eq!(p.stratum().to_string(), "H_1(0^2)");
    }

    #[test]
    fn test_orientation_cover() {
        let p = LabelledPermutation::generalized("a a b", "b c c").unwrap();
        let c = p.orientation_cover().unwrap();
        assert_eq!(c.degree(), 2);
        assert_eq!(c.covering_data("a").unwrap().to_string(), "(1,2)");
        assert_eq!(c.covering_data("b").unwrap().to_string(), "()");
        assert!(c.is_orientable());

        let iet = LabelledPermutation::iet("a b", "b a").unwrap();
        assert!(iet.orientation_cover().is_err());
    }
}
