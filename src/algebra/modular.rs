//! Arithmetic and linear algebra over a prime field GF(p)
//!
//! Used by the Burnside–Dixon character table computation, where class
//! matrices are diagonalised modulo a prime `p ≡ 1 (mod e)`.

use ndarray::Array2;
use num_modular::{ModularCoreOps, ModularPow, ModularUnaryOps};
use primes::is_prime;

/// The prime field GF(p).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    p: u64,
}

impl PrimeField {
    /// Panics if `p` is not prime.
    pub fn new(p: u64) -> Self {
        assert!(is_prime(p), "{p} is not prime");
        Self { p }
    }

    /// Smallest prime `p = r·e + 1` with `p > 2√order`, starting the search
    /// at `r ≈ 2√order / e`.
    pub fn for_group(order: usize, exponent: usize) -> Self {
        let bound = 2.0 * (order as f64).sqrt();
        let e = exponent as u64;
        let mut r = ((bound / exponent as f64).round() as u64).max(1);
        let mut p = r * e + 1;
        while !is_prime(p) || (p as f64) <= bound {
            tracing::trace!(p, "not a suitable prime");
            r += 1;
            p = r * e + 1;
        }
        Self { p }
    }

    pub fn modulus(&self) -> u64 {
        self.p
    }

    pub fn reduce(&self, x: u64) -> u64 {
        x % self.p
    }

    /// Image of a signed integer.
    pub fn from_i64(&self, x: i64) -> u64 {
        x.rem_euclid(self.p as i64) as u64
    }

    pub fn add(&self, a: u64, b: u64) -> u64 {
        a.addm(b, &self.p)
    }

    pub fn sub(&self, a: u64, b: u64) -> u64 {
        a.subm(b, &self.p)
    }

    pub fn mul(&self, a: u64, b: u64) -> u64 {
        a.mulm(b, &self.p)
    }

    pub fn neg(&self, a: u64) -> u64 {
        a.negm(&self.p)
    }

    /// Panics on zero.
    pub fn inv(&self, a: u64) -> u64 {
        a.invm(&self.p)
            .unwrap_or_else(|| panic!("{a} is not invertible modulo {}", self.p))
    }

    pub fn pow(&self, a: u64, e: u64) -> u64 {
        a.powm(e, &self.p)
    }

    /// A generator of the multiplicative group.
    pub fn primitive_root(&self) -> u64 {
        let phi = self.p - 1;
        let factors: Vec<u64> = prime_factors(phi);
        (2..self.p)
            .find(|&g| factors.iter().all(|&q| self.pow(g, phi / q) != 1))
            .unwrap_or(1)
    }

    /// An element of multiplicative order exactly `m`, `m | p − 1`.
    pub fn root_of_unity(&self, m: u64) -> u64 {
        assert!((self.p - 1) % m == 0, "{m} does not divide {} - 1", self.p);
        self.pow(self.primitive_root(), (self.p - 1) / m)
    }

    /// Basis of the right null space of `m` (one vector per entry).
    pub fn nullspace(&self, m: &Array2<u64>) -> Vec<Vec<u64>> {
        let mut a = m.mapv(|x| self.reduce(x));
        let (rows, cols) = a.dim();
        let mut pivots = Vec::new();
        let mut r = 0;
        for c in 0..cols {
            if r == rows {
                break;
            }
            let Some(pr) = (r..rows).find(|&i| a[[i, c]] != 0) else {
                continue;
            };
            if pr != r {
                for j in 0..cols {
                    a.swap([pr, j], [r, j]);
                }
            }
            let inv = self.inv(a[[r, c]]);
            for j in 0..cols {
                a[[r, j]] = self.mul(a[[r, j]], inv);
            }
            for i in 0..rows {
                let f = a[[i, c]];
                if i == r || f == 0 {
                    continue;
                }
                for j in 0..cols {
                    let t = self.mul(f, a[[r, j]]);
                    a[[i, j]] = self.sub(a[[i, j]], t);
                }
            }
            pivots.push(c);
            r += 1;
        }
        (0..cols)
            .filter(|c| !pivots.contains(c))
            .map(|free| {
                let mut v = vec![0; cols];
                v[free] = 1;
                for (k, &pc) in pivots.iter().enumerate() {
                    v[pc] = self.neg(a[[k, free]]);
                }
                v
            })
            .collect()
    }
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut out = Vec::new();
    let mut q = 2;
    while q * q <= n {
        if n % q == 0 {
            out.push(q);
            while n % q == 0 {
                n /= q;
            }
        }
        q += 1;
    }
    if n > 1 {
        out.push(n);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_prime_choice() {
        // order 5, exponent 5: 6 is not prime, 11 is
        assert_eq!(PrimeField::for_group(5, 5).modulus(), 11);
        assert_eq!(PrimeField::for_group(24, 12).modulus(), 13);
        assert_eq!(PrimeField::for_group(6, 6).modulus(), 7);
        assert_eq!(PrimeField::for_group(1, 1).modulus(), 3);
    }

    #[test]
    fn test_field_ops() {
        let f = PrimeField::new(11);
        assert_eq!(f.add(7, 8), 4);
        assert_eq!(f.sub(3, 5), 9);
        assert_eq!(f.mul(f.inv(7), 7), 1);
        assert_eq!(f.from_i64(-1), 10);
        assert_eq!(f.pow(2, 10), 1);
    }

    #[test]
    fn test_roots_of_unity() {
        let f = PrimeField::new(13);
        let z = f.root_of_unity(12);
        assert_eq!(f.pow(z, 12), 1);
        assert!((1..12).all(|k| f.pow(z, k) != 1));
        let w = f.root_of_unity(3);
        assert_eq!(f.pow(w, 3), 1);
        assert_ne!(w, 1);
    }

    #[test]
    fn test_nullspace() {
        let f = PrimeField::new(7);
        let m = array![[1, 2, 3], [2, 4, 6]];
        let ns = f.nullspace(&m);
        assert_eq!(ns.len(), 2);
        for v in ns {
            let dot = (0..3).fold(0, |acc, j| f.add(acc, f.mul(m[[0, j]], v[j])));
            assert_eq!(dot, 0);
        }
    }
}
