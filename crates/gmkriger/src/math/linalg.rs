//! Dense linear solves for Kriging systems.
//!
//! ## Purpose
//!
//! This module wraps `nalgebra`'s LU decomposition with partial pivoting for
//! the small, dense and symmetric-indefinite systems produced by ordinary
//! Kriging, adding a relative singularity check.
//!
//! ## Design notes
//!
//! * **Reusable factorization**: One factorization serves many right-hand
//!   sides (one per target site).
//! * **Explicit singularity**: `nalgebra` only flags exact zero pivots; near
//!   zero pivots are reported here as [`KrigerError::SingularSystem`].
//!
//! ## Invariants
//!
//! * A pivot with magnitude at or below `n * eps * max|A|` is singular.
//!
//! ## Non-goals
//!
//! * This module does not exploit symmetry or sparsity.

// External dependencies
use nalgebra::{DMatrix, DVector, Dyn, LU};

// Internal dependencies
use crate::primitives::errors::KrigerError;

// ============================================================================
// Factorization
// ============================================================================

/// LU factorization of a square system checked for singularity.
#[derive(Debug, Clone)]
pub struct Factorization {
    lu: LU<f64, Dyn, Dyn>,
    order: usize,
}

impl Factorization {
    /// Factorize a square matrix with partial pivoting.
    pub fn new(matrix: DMatrix<f64>) -> Result<Self, KrigerError> {
        let order = matrix.nrows();
        let tolerance = order.max(1) as f64 * f64::EPSILON * matrix.amax();

        let lu = matrix.lu();
        let singular = lu
            .u()
            .diagonal()
            .iter()
            .position(|pivot| !(pivot.abs() > tolerance));

        match singular {
            Some(pivot) => Err(KrigerError::SingularSystem { order, pivot }),
            None => Ok(Self { lu, order }),
        }
    }

    /// Order of the factorized system.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Solve `A x = b`.
    pub fn solve(&self, b: &DVector<f64>) -> Result<DVector<f64>, KrigerError> {
        self.lu.solve(b).ok_or(KrigerError::SingularSystem {
            order: self.order,
            pivot: self.order,
        })
    }
}
