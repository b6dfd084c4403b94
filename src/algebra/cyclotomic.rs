//! Universal cyclotomic field
//!
//! An element of Q(ζ_N) is stored in the power basis 1, ζ_N, …, ζ_N^{φ(N)−1}
//! with rational coefficients, i.e. as a polynomial in ζ_N reduced modulo the
//! cyclotomic polynomial Φ_N. Elements of different conductors are combined
//! in Q(ζ_lcm), where ζ_N = ζ_lcm^{lcm/N}.
//!
//! Character values of finite groups are sums of roots of unity, so this is
//! all the arithmetic the deck group analysis needs.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::sync::{Arc, OnceLock};

use num::integer::{gcd, lcm};
use num::BigInt;
use parking_lot::Mutex;

use super::field::{rational_to_f64, Field, Rational};

fn polynomial_cache() -> &'static Mutex<HashMap<usize, Arc<Vec<BigInt>>>> {
    static CACHE: OnceLock<Mutex<HashMap<usize, Arc<Vec<BigInt>>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Coefficients of Φ_n, constant term first.
pub fn cyclotomic_polynomial(n: usize) -> Arc<Vec<BigInt>> {
    assert!(n >= 1, "cyclotomic polynomials are indexed from 1");
    if let Some(poly) = polynomial_cache().lock().get(&n) {
        return Arc::clone(poly);
    }

    // Φ_n = (x^n − 1) / Π_{d | n, d < n} Φ_d
    let mut poly = vec![BigInt::from(0); n + 1];
    poly[0] = BigInt::from(-1);
    poly[n] = BigInt::from(1);
    for d in (1..n).filter(|d| n % d == 0) {
        poly = divide_monic(&poly, &cyclotomic_polynomial(d));
    }

    let poly = Arc::new(poly);
    polynomial_cache().lock().insert(n, Arc::clone(&poly));
    poly
}

/// Exact quotient of `num` by the monic polynomial `den`.
fn divide_monic(num: &[BigInt], den: &[BigInt]) -> Vec<BigInt> {
    let dd = den.len() - 1;
    let mut rem = num.to_vec();
    let qlen = rem.len() - dd;
    let mut quotient = vec![BigInt::from(0); qlen];
    for i in (0..qlen).rev() {
        let c = rem[i + dd].clone();
        for (j, dj) in den.iter().enumerate() {
            rem[i + j] -= &c * dj;
        }
        quotient[i] = c;
    }
    quotient
}

/// Euler's totient, read off the degree of Φ_n.
pub fn euler_phi(n: usize) -> usize {
    cyclotomic_polynomial(n).len() - 1
}

/// Reduce a polynomial in ζ_n given by its coefficients at exponents
/// `0..n` modulo Φ_n.
fn reduce(n: usize, mut raw: Vec<Rational>) -> Vec<Rational> {
    let phi = cyclotomic_polynomial(n);
    let m = phi.len() - 1;
    for i in (m..raw.len()).rev() {
        if raw[i].is_zero() {
            continue;
        }
        let c = raw[i].clone();
        for (j, pj) in phi.iter().enumerate() {
            let term = c.times(&Rational::from_integer(pj.clone()));
            raw[i - m + j] = raw[i - m + j].minus(&term);
        }
    }
    raw.truncate(m);
    raw
}

/// Element of the universal cyclotomic field.
#[derive(Clone, Debug)]
pub struct Cyclotomic {
    conductor: usize,
    coeffs: Vec<Rational>,
}

impl Cyclotomic {
    pub fn from_rational(q: Rational) -> Self {
        Self {
            conductor: 1,
            coeffs: vec![q],
        }
    }

    /// `E(n)^k`, the primitive root e^{2iπ/n} raised to `k`.
    pub fn root_of_unity(n: usize, k: usize) -> Self {
        Self::from_exponents(n, &[(k, <Rational as Field>::one())])
    }

    /// `Σ c · E(n)^k` over the given `(k, c)` terms.
    pub fn from_exponents(n: usize, terms: &[(usize, Rational)]) -> Self {
        let mut raw = vec![<Rational as Field>::zero(); n];
        for (k, c) in terms {
            raw[k % n] = raw[k % n].plus(c);
        }
        Self {
            conductor: n,
            coeffs: reduce(n, raw),
        }
    }

    pub fn conductor(&self) -> usize {
        self.conductor
    }

    /// Coefficients in the power basis of Q(ζ_conductor).
    pub fn coefficients(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Coefficients in the power basis of Q(ζ_m), `m` a multiple of the
    /// conductor.
    fn lifted(&self, m: usize) -> Vec<Rational> {
        debug_assert!(m % self.conductor == 0);
        if m == self.conductor {
            return self.coeffs.clone();
        }
        let step = m / self.conductor;
        let mut raw = vec![<Rational as Field>::zero(); m];
        for (i, c) in self.coeffs.iter().enumerate() {
            raw[i * step] = c.clone();
        }
        reduce(m, raw)
    }

    /// Image under the Galois automorphism ζ ↦ ζ^k, `k` prime to the
    /// conductor.
    pub fn galois(&self, k: usize) -> Self {
        let n = self.conductor;
        debug_assert!(gcd(k, n) == 1);
        let mut raw = vec![<Rational as Field>::zero(); n];
        for (i, c) in self.coeffs.iter().enumerate() {
            let e = (i * k) % n;
            raw[e] = raw[e].plus(c);
        }
        Self {
            conductor: n,
            coeffs: reduce(n, raw),
        }
    }

    /// Complex conjugate.
    pub fn conjugate(&self) -> Self {
        let n = self.conductor;
        self.galois(if n == 1 { 1 } else { n - 1 })
    }

    pub fn is_real(&self) -> bool {
        *self == self.conjugate()
    }

    pub fn is_rational(&self) -> bool {
        self.coeffs.iter().skip(1).all(|c| c.is_zero())
    }

    pub fn as_rational(&self) -> Option<Rational> {
        if self.is_rational() {
            Some(self.coeffs[0].clone())
        } else {
            None
        }
    }

    /// Real part as a float.
    pub fn real_part(&self) -> f64 {
        let n = self.conductor as f64;
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| rational_to_f64(c) * (2.0 * PI * i as f64 / n).cos())
            .sum()
    }

    /// Imaginary part as a float.
    pub fn imag_part(&self) -> f64 {
        let n = self.conductor as f64;
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| rational_to_f64(c) * (2.0 * PI * i as f64 / n).sin())
            .sum()
    }

    fn binary(&self, other: &Self, op: impl Fn(&Rational, &Rational) -> Rational) -> Self {
        let n = lcm(self.conductor, other.conductor);
        let a = self.lifted(n);
        let b = other.lifted(n);
        Self {
            conductor: n,
            coeffs: a.iter().zip(&b).map(|(x, y)| op(x, y)).collect(),
        }
    }
}

impl PartialEq for Cyclotomic {
    fn eq(&self, other: &Self) -> bool {
        if self.conductor == other.conductor {
            return self.coeffs == other.coeffs;
        }
        let n = lcm(self.conductor, other.conductor);
        self.lifted(n) == other.lifted(n)
    }
}

impl Field for Cyclotomic {
    fn zero() -> Self {
        Self::from_rational(<Rational as Field>::zero())
    }

    fn one() -> Self {
        Self::from_rational(<Rational as Field>::one())
    }

    fn from_integer(n: i64) -> Self {
        Self::from_rational(<Rational as Field>::from_integer(n))
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    fn plus(&self, other: &Self) -> Self {
        self.binary(other, |x, y| x.plus(y))
    }

    fn minus(&self, other: &Self) -> Self {
        self.binary(other, |x, y| x.minus(y))
    }

    fn times(&self, other: &Self) -> Self {
        if self.conductor == 1 {
            let c = &self.coeffs[0];
            return Self {
                conductor: other.conductor,
                coeffs: other.coeffs.iter().map(|x| x.times(c)).collect(),
            };
        }
        if other.conductor == 1 {
            return other.times(self);
        }
        let n = lcm(self.conductor, other.conductor);
        let a = self.lifted(n);
        let b = other.lifted(n);
        let mut raw = vec![<Rational as Field>::zero(); n];
        for (i, x) in a.iter().enumerate().filter(|(_, x)| !x.is_zero()) {
            for (j, y) in b.iter().enumerate().filter(|(_, y)| !y.is_zero()) {
                let e = (i + j) % n;
                raw[e] = raw[e].plus(&x.times(y));
            }
        }
        Self {
            conductor: n,
            coeffs: reduce(n, raw),
        }
    }

    fn negated(&self) -> Self {
        Self {
            conductor: self.conductor,
            coeffs: self.coeffs.iter().map(|c| c.negated()).collect(),
        }
    }

    /// Product of the other Galois conjugates divided by the norm.
    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let n = self.conductor;
        let cofactor = (2..n)
            .filter(|&k| gcd(k, n) == 1)
            .fold(Self::one(), |acc, k| acc.times(&self.galois(k)));
        let norm = self
            .times(&cofactor)
            .as_rational()
            .expect("the norm of a cyclotomic number is rational");
        let inv_norm = norm.inverse()?;
        Some(cofactor.times(&Self::from_rational(inv_norm)))
    }
}

impl fmt::Display for Cyclotomic {
    /// `E(5) + E(5)^4`, `-1/2*E(3)`, `3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let one = <Rational as Field>::one();
        let minus_one = one.negated();
        let mut terms: Vec<String> = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            if i == 0 {
                terms.push(c.to_string());
                continue;
            }
            let root = if i == 1 {
                format!("E({})", self.conductor)
            } else {
                format!("E({})^{}", self.conductor, i)
            };
            if *c == one {
                terms.push(root);
            } else if *c == minus_one {
                terms.push(format!("-{root}"));
            } else {
                terms.push(format!("{c}*{root}"));
            }
        }
        if terms.is_empty() {
            return write!(f, "0");
        }
        let mut out = terms[0].clone();
        for t in &terms[1..] {
            match t.strip_prefix('-') {
                Some(rest) => out.push_str(&format!(" - {rest}")),
                None => out.push_str(&format!(" + {t}")),
            }
        }
        write!(f, "{out}")
    }
}
