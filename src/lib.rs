//! # flat-covers
//!
//! Finite Covers of Interval Exchanges and Linear Involutions: Invariants,
//! Homology, Deck Group Characters and Isotypic Lyapunov Spectra
//!
//! ## Framework
//!
//! A two-row labelled permutation describes a flat surface: an interval
//! exchange for a translation surface, a linear involution for a
//! half-translation surface. A degree `d` cover of it is given by one
//! permutation of the sheets `{1, …, d}` per interval, telling which copy
//! of the base one lands in after crossing that interval.
//!
//! ### Pipeline
//!
//! 1. **Cover model**: base permutation plus sheet permutations, checked
//!    for consistency once at construction
//!
//! 2. **Invariants**: singularities of the cover traced from those of the
//!    base, cone angles, orientability of the foliation, stratum and genus
//!
//! 3. **Relative homology**: the lifted intervals `(sheet, label)` with the
//!    boundary relations of each sheet and the cycles with no boundary
//!
//! 4. **Deck group**: centralizer of the monodromy in the symmetric group,
//!    its ordinary character table (Burnside–Dixon) folded into real
//!    characters
//!
//! 5. **Isotypic projectors**: one exact projector per real character and
//!    the H⁺ dimension of each component
//!
//! 6. **Lyapunov orchestration**: flat tables and projectors handed to a
//!    numeric engine, samples turned into exponents per component
//!
//! ## Example
//!
//! ```
//! use flat_covers::LabelledPermutation;
//!
//! let p = LabelledPermutation::generalized("a a b", "b c c").unwrap();
//! let c = p.cover(&["(1,2)", "()", "(1,2)"]).unwrap();
//! assert!(c.is_orientable());
//! assert_eq!(c.stratum().to_string(), "H_1(0^4)");
//! assert_eq!(c.genus(), 1);
//! ```
//!
//! ## References
//!
//! - Eskin, Kontsevich & Zorich, "Lyapunov spectrum of square-tiled cyclic
//!   covers", J. Mod. Dyn. 5 (2011)
//! - Boissy & Lanneau, "Dynamics and geometry of the Rauzy–Veech induction
//!   for quadratic differentials", Ergodic Theory Dynam. Systems 29 (2009)
//! - Dixon, "High speed computation of group characters", Numer. Math. 10
//!   (1967)

pub mod algebra;
pub mod cover;
pub mod error;
pub mod groups;
pub mod lyapunov;
pub mod permutation;
pub mod surface;

// Re-exports from permutation
pub use permutation::{
    Alphabet,
    BasePermutation,
    LabelledPermutation,
    Permutation,
    PermutationKind,
    Sign,
};

// Re-exports from surface
pub use surface::{Stratum, StratumKind};

// Re-exports from algebra
pub use algebra::{Cyclotomic, ExactMatrix, Field, Rational};

// Re-exports from groups
pub use groups::{
    CharacterTable,
    GroupTheoryProvider,
    NativeGroupTheory,
    PermutationGroup,
};

// Re-exports from cover
pub use cover::{
    CoverCrossing,
    PermutationCover,
    RealCharacter,
    RealCharacterTable,
    SingularityOrbit,
};

// Re-exports from lyapunov
pub use lyapunov::{
    lyapunov_exponents_h_plus,
    Estimate,
    Exponents,
    IsotypicExponents,
    LyapunovConfig,
    LyapunovEngine,
    LyapunovReport,
    SyntheticEngine,
};

pub use error::{CoverError, CoverResult};
