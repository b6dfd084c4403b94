//! Exact fields used by the linear algebra.

use std::fmt;

use num::{BigInt, BigRational, One, ToPrimitive, Zero};

/// Rational numbers with arbitrary precision.
pub type Rational = BigRational;

/// Minimal field interface for exact Gaussian elimination.
pub trait Field: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_integer(n: i64) -> Self;
    fn is_zero(&self) -> bool;
    fn plus(&self, other: &Self) -> Self;
    fn minus(&self, other: &Self) -> Self;
    fn times(&self, other: &Self) -> Self;
    fn negated(&self) -> Self;
    /// Multiplicative inverse, `None` for zero.
    fn inverse(&self) -> Option<Self>;
}

impl Field for Rational {
    fn zero() -> Self {
        <Rational as Zero>::zero()
    }

    fn one() -> Self {
        <Rational as One>::one()
    }

    fn from_integer(n: i64) -> Self {
        Rational::from_integer(BigInt::from(n))
    }

    fn is_zero(&self) -> bool {
        <Rational as Zero>::is_zero(self)
    }

    fn plus(&self, other: &Self) -> Self {
        self + other
    }

    fn minus(&self, other: &Self) -> Self {
        self - other
    }

    fn times(&self, other: &Self) -> Self {
        self * other
    }

    fn negated(&self) -> Self {
        -self
    }

    fn inverse(&self) -> Option<Self> {
        if <Rational as Zero>::is_zero(self) {
            None
        } else {
            Some(self.recip())
        }
    }
}

/// Rational from a pair of machine integers.
pub fn rational(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// `x` as a float, going through numerator and denominator.
pub fn rational_to_f64(x: &Rational) -> f64 {
    let n = x.numer().to_f64().unwrap_or(f64::NAN);
    let d = x.denom().to_f64().unwrap_or(f64::NAN);
    n / d
}
