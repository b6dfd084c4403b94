//! Exact Algebra
//!
//! Everything the homology and character computations need to stay exact:
//! - `field.rs`: the [`Field`] trait and rationals
//! - `cyclotomic.rs`: the universal cyclotomic field, home of character values
//! - `matrix.rs`: dense matrices with rank, row reduction and kernels
//! - `modular.rs`: GF(p) arithmetic for the Burnside–Dixon algorithm

mod cyclotomic;
mod field;
mod matrix;
mod modular;

pub use cyclotomic::{cyclotomic_polynomial, euler_phi, Cyclotomic};
pub use field::{rational, rational_to_f64, Field, Rational};
pub use matrix::ExactMatrix;
pub use modular::PrimeField;
