// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! Hypercomplex capability boundary for the zero-divisor transform.
//!
//! The transform engine never multiplies hypercomplex elements; it only
//! reads coefficients and norms.  Those two reads form the
//! [`Hypercomplex`] capability.  The full Cayley-Dickson operation set is
//! declared as a separate trait so that external algebra backends
//! (sedenions, pathions, …) can plug in without this workspace committing
//! to any particular multiplication table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlgebraError {
    #[error("dimension must be a power of two >= 2, got {dim}")]
    InvalidDimension { dim: usize },
    #[error("coefficient index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },
    #[error("basis indices must be distinct, got {index} twice")]
    DuplicateIndex { index: usize },
    #[error("coefficient {index} is not finite")]
    NonFiniteCoefficient { index: usize },
}

pub type AlgebraResult<T> = Result<T, AlgebraError>;

/// Read-only view of a hypercomplex element.
///
/// This is the only capability the transform engine consumes: an ordered
/// coefficient sequence and a non-negative scalar norm.
pub trait Hypercomplex {
    /// Ordered real coefficients of the element.
    fn coefficients(&self) -> &[f64];

    /// Euclidean norm of the coefficient vector.
    fn norm(&self) -> f64 {
        self.coefficients()
            .iter()
            .map(|c| c * c)
            .sum::<f64>()
            .sqrt()
    }

    /// Number of coefficients.
    fn dimension(&self) -> usize {
        self.coefficients().len()
    }
}

/// Full Cayley-Dickson operation set.
///
/// Concrete multiplication, conjugation, and the additive operators are
/// supplied by external algebra backends; nothing in this workspace
/// implements them.
pub trait CayleyDickson: Hypercomplex + Sized {
    fn mul(&self, rhs: &Self) -> Self;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn conjugate(&self) -> Self;
}

/// Immutable dense coefficient vector.
///
/// Used to materialize canonical probes and test vectors; never mutated
/// after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    coefficients: Vec<f64>,
}

fn check_dimension(dim: usize) -> AlgebraResult<()> {
    if dim < 2 || !dim.is_power_of_two() {
        return Err(AlgebraError::InvalidDimension { dim });
    }
    Ok(())
}

impl Element {
    /// The zero element of a `dim`-dimensional algebra.
    pub fn zeros(dim: usize) -> AlgebraResult<Self> {
        check_dimension(dim)?;
        Ok(Self {
            coefficients: vec![0.0; dim],
        })
    }

    /// Build an element from an explicit coefficient vector.
    pub fn from_coefficients(coefficients: Vec<f64>) -> AlgebraResult<Self> {
        check_dimension(coefficients.len())?;
        for (index, c) in coefficients.iter().enumerate() {
            if !c.is_finite() {
                return Err(AlgebraError::NonFiniteCoefficient { index });
            }
        }
        Ok(Self { coefficients })
    }

    /// The sum of two standard basis vectors, `e_a + e_b`.
    ///
    /// This is exactly the shape of a canonical probe: two unit
    /// coefficients at distinct indices, zero elsewhere.
    pub fn basis_pair(dim: usize, a: usize, b: usize) -> AlgebraResult<Self> {
        check_dimension(dim)?;
        for &index in &[a, b] {
            if index >= dim {
                return Err(AlgebraError::IndexOutOfRange { index, dim });
            }
        }
        if a == b {
            return Err(AlgebraError::DuplicateIndex { index: a });
        }
        let mut coefficients = vec![0.0; dim];
        coefficients[a] = 1.0;
        coefficients[b] = 1.0;
        Ok(Self { coefficients })
    }
}

impl Hypercomplex for Element {
    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}
