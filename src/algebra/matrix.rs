//! Dense exact matrices
//!
//! Matrices over an exact [`Field`] backed by `ndarray::Array2`. Rank and
//! kernels come from a single reduced row echelon pass, the same row
//! reduction that underlies boundary-matrix homology computations.

use std::fmt;

use ndarray::Array2;

use super::field::Field;
use crate::error::{CoverError, CoverResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ExactMatrix<F: Field> {
    data: Array2<F>,
}

impl<F: Field> ExactMatrix<F> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), F::zero()),
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[[i, i]] = F::one();
        }
        m
    }

    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> F) -> Self {
        Self {
            data: Array2::from_shape_fn((rows, cols), |(i, j)| f(i, j)),
        }
    }

    /// Rows must share one length. `cols` fixes the width of an empty
    /// matrix.
    pub fn from_rows(rows: Vec<Vec<F>>, cols: usize) -> CoverResult<Self> {
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(CoverError::InvalidArgument(format!(
                    "row {i} has {} entries, expected {cols}",
                    row.len()
                )));
            }
            flat.extend(row);
        }
        let data = Array2::from_shape_vec((n, cols), flat)
            .map_err(|e| CoverError::InvalidArgument(e.to_string()))?;
        Ok(Self { data })
    }

    pub fn from_array(data: Array2<F>) -> Self {
        Self { data }
    }

    pub fn as_array(&self) -> &Array2<F> {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, i: usize, j: usize) -> &F {
        &self.data[[i, j]]
    }

    pub fn set(&mut self, i: usize, j: usize, value: F) {
        self.data[[i, j]] = value;
    }

    /// `self[i, j] += value`
    pub fn add_at(&mut self, i: usize, j: usize, value: &F) {
        let cur = &mut self.data[[i, j]];
        *cur = cur.plus(value);
    }

    pub fn row(&self, i: usize) -> Vec<F> {
        self.data.row(i).iter().cloned().collect()
    }

    pub fn rows(&self) -> Vec<Vec<F>> {
        (0..self.nrows()).map(|i| self.row(i)).collect()
    }

    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.t().to_owned(),
        }
    }

    pub fn map<G: Field>(&self, f: impl Fn(&F) -> G) -> ExactMatrix<G> {
        ExactMatrix {
            data: self.data.map(f),
        }
    }

    /// Matrix product. Panics on mismatched shapes.
    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(
            self.ncols(),
            other.nrows(),
            "cannot multiply {}x{} by {}x{}",
            self.nrows(),
            self.ncols(),
            other.nrows(),
            other.ncols()
        );
        let mut out = Self::zeros(self.nrows(), other.ncols());
        for i in 0..self.nrows() {
            for k in 0..self.ncols() {
                let a = &self.data[[i, k]];
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.ncols() {
                    let b = &other.data[[k, j]];
                    if !b.is_zero() {
                        out.add_at(i, j, &a.times(b));
                    }
                }
            }
        }
        out
    }

    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.data.dim(), other.data.dim(), "shape mismatch in addition");
        let mut out = self.clone();
        for ((i, j), b) in other.data.indexed_iter() {
            out.add_at(i, j, b);
        }
        out
    }

    pub fn scale(&self, c: &F) -> Self {
        self.map(|x| x.times(c))
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Field::is_zero)
    }

    /// Reduced row echelon form and the pivot columns.
    pub fn rref(&self) -> (Self, Vec<usize>) {
        let mut m = self.data.clone();
        let (rows, cols) = m.dim();
        let mut pivots = Vec::new();
        let mut r = 0;
        for c in 0..cols {
            if r == rows {
                break;
            }
            let Some(p) = (r..rows).find(|&i| !m[[i, c]].is_zero()) else {
                continue;
            };
            if p != r {
                for j in 0..cols {
                    m.swap([p, j], [r, j]);
                }
            }
            let inv = m[[r, c]]
                .inverse()
                .expect("pivot is non-zero");
            for j in c..cols {
                m[[r, j]] = m[[r, j]].times(&inv);
            }
            for i in 0..rows {
                if i == r || m[[i, c]].is_zero() {
                    continue;
                }
                let factor = m[[i, c]].clone();
                for j in c..cols {
                    let t = factor.times(&m[[r, j]]);
                    m[[i, j]] = m[[i, j]].minus(&t);
                }
            }
            pivots.push(c);
            r += 1;
        }
        (Self { data: m }, pivots)
    }

    pub fn rank(&self) -> usize {
        self.rref().1.len()
    }

    /// Basis of `{x : self · x = 0}`, one vector per row of the result.
    pub fn right_kernel(&self) -> Self {
        let (reduced, pivots) = self.rref();
        let cols = self.ncols();
        let free: Vec<usize> = (0..cols).filter(|c| !pivots.contains(c)).collect();
        let mut basis = Self::zeros(free.len(), cols);
        for (b, &f) in free.iter().enumerate() {
            basis.data[[b, f]] = F::one();
            for (k, &pc) in pivots.iter().enumerate() {
                basis.data[[b, pc]] = reduced.data[[k, f]].negated();
            }
        }
        basis
    }

    /// Basis of `{y : y · self = 0}`, one vector per row of the result.
    pub fn left_kernel(&self) -> Self {
        self.transpose().right_kernel()
    }
}

impl<F: Field> fmt::Display for ExactMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows() {
            let row: Vec<String> = self.data.row(i).iter().map(|x| x.to_string()).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}
