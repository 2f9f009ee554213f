//! Spatial correlation models for within-event residuals.
//!
//! ## Purpose
//!
//! This module defines the correlation functions used to build Kriging
//! covariance matrices. The residual catalogue is calibrated with the
//! Euclidean-angular ("E-A") model, which couples the great-circle separation
//! of two sites with the difference in their azimuths from the epicentre.
//!
//! ## Key concepts
//!
//! * **Euclidean kernel**: `k_E(d) = exp(-d / L_E)`.
//! * **Angular kernel**: `k_A(Δ) = (1 + Δ / L_A) (1 - Δ / 180)^(180 / L_A)`,
//!   compactly supported on [0, 180] degrees.
//! * **E-A model**: `rho = k_E (gamma_E + (1 - gamma_E) k_A)`.
//!
//! ## Invariants
//!
//! * `rho(0, 0) = 1` and `0 <= rho <= 1`.
//! * `rho` is non-increasing in both distance and angle.
//!
//! ## Non-goals
//!
//! * This module does not estimate model parameters from data.

// Internal dependencies
use crate::primitives::errors::KrigerError;

// ============================================================================
// Correlation Parameters
// ============================================================================

/// Parameters of one E-A correlation-model realization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationParams {
    /// Euclidean length scale in km.
    pub l_e: f64,

    /// Weight of the purely Euclidean component, in [0, 1].
    pub gamma_e: f64,

    /// Angular length scale in degrees.
    pub l_a: f64,
}

impl CorrelationParams {
    /// Create validated parameters.
    pub fn new(l_e: f64, gamma_e: f64, l_a: f64) -> Result<Self, KrigerError> {
        let params = Self { l_e, gamma_e, l_a };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameter domain.
    pub fn validate(&self) -> Result<(), KrigerError> {
        if !self.l_e.is_finite() || self.l_e <= 0.0 {
            return Err(KrigerError::InvalidParameter(format!(
                "L_E={} (must be > 0)",
                self.l_e
            )));
        }
        if !self.gamma_e.is_finite() || !(0.0..=1.0).contains(&self.gamma_e) {
            return Err(KrigerError::InvalidParameter(format!(
                "gamma_E={} (must be in [0, 1])",
                self.gamma_e
            )));
        }
        if !self.l_a.is_finite() || self.l_a <= 0.0 {
            return Err(KrigerError::InvalidParameter(format!(
                "L_A={} (must be > 0)",
                self.l_a
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Correlation Model
// ============================================================================

/// Euclidean-angular correlation function for one realization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationModel {
    params: CorrelationParams,
}

impl CorrelationModel {
    /// Model over validated parameters.
    pub fn new(params: CorrelationParams) -> Self {
        Self { params }
    }

    /// Model parameters.
    pub fn params(&self) -> &CorrelationParams {
        &self.params
    }

    /// Correlation between two sites separated by `distance_km` whose
    /// epicentral azimuths differ by `angle_deg`.
    #[inline]
    pub fn correlation(&self, distance_km: f64, angle_deg: f64) -> f64 {
        let p = &self.params;
        let k_e = euclidean_kernel(distance_km, p.l_e);
        let k_a = angular_kernel(angle_deg, p.l_a);
        k_e * (p.gamma_e + (1.0 - p.gamma_e) * k_a)
    }

    /// Check the parameter domain.
    pub fn validate(&self) -> Result<(), KrigerError> {
        self.params.validate()
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// Exponential distance kernel.
#[inline]
pub fn euclidean_kernel(distance_km: f64, l_e: f64) -> f64 {
    (-distance_km.abs() / l_e).exp()
}

/// Compactly supported kernel on epicentral-azimuth separation.
#[inline]
pub fn angular_kernel(angle_deg: f64, l_a: f64) -> f64 {
    let delta = angle_deg.abs().min(180.0);
    let base = 1.0 - delta / 180.0;
    if base <= 0.0 {
        return 0.0;
    }
    (1.0 + delta / l_a) * base.powf(180.0 / l_a)
}
