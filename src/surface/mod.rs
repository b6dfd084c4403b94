//! Surface invariants: strata and genus bookkeeping shared by base
//! permutations and their covers.

mod stratum;

pub use stratum::{Stratum, StratumKind};
