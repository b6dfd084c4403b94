//! Permutations
//!
//! Two kinds of permutations appear when covering a flat surface:
//! - sheet permutations (`perm.rs`), one per interval, telling which copy
//!   of the base one lands in after crossing that interval
//! - the labelled two-row base permutation (`labelled.rs`) describing the
//!   interval exchange or linear involution itself

mod labelled;
mod perm;

pub use labelled::{
    Alphabet, BasePermutation, Crossing, DiagramEntry, LabelledPermutation, Occurrence,
    PermutationKind, Sign,
};
pub use perm::Permutation;
