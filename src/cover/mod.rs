//! Finite covers of interval exchange and linear involution permutations
//!
//! A cover of degree `d` stacks `d` copies of the base polygon and glues
//! the copies of each interval according to a sheet permutation. From this
//! data alone one gets:
//!
//! - `model.rs`: construction, validation and access to the cover data
//! - `invariants.rs`: singularities, profile, orientability, stratum, genus
//! - `homology.rs`: relative homology basis, boundary and cycle matrices
//! - `automorphisms.rs`: deck group and its real characters
//! - `isotypic.rs`: isotypic projectors and the H⁺ dimension of each
//!   component

mod automorphisms;
mod homology;
mod invariants;
mod isotypic;
mod model;

pub use automorphisms::{RealCharacter, RealCharacterTable};
pub use invariants::{CoverCrossing, SingularityOrbit};
pub use model::PermutationCover;
