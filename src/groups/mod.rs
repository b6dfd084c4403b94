//! Finite permutation groups
//!
//! The deck group of a cover is the centralizer of its monodromy group in
//! the symmetric group on the sheets. Everything the cover needs from group
//! theory goes through the [`GroupTheoryProvider`] trait:
//!
//! - `group.rs`: permutation groups and the provider trait
//! - `native.rs`: enumeration based provider with a backtracking centralizer
//! - `dixon.rs`: character tables by the Burnside-Dixon algorithm

mod dixon;
mod group;
pub mod native;

pub use dixon::CharacterTable;
pub use group::{GroupTheoryProvider, PermutationGroup};
pub use native::NativeGroupTheory;
