//! Kriging of residual fields onto target sites.
//!
//! ## Purpose
//!
//! This module interpolates a field of within-event residuals observed at
//! stations onto unsampled target sites, returning the Kriging mean and
//! variance at each target.
//!
//! ## Design notes
//!
//! * **Shared geometry**: Station-station and target-station distances and
//!   azimuth separations are computed once in [`KrigingGeometry`] and reused
//!   for every correlation-model realization.
//! * **One factorization per realization**: The covariance system depends on
//!   the realization only, so it is factorized once and solved per target.
//!
//! ## Key concepts
//!
//! * **Ordinary Kriging**: Unknown constant mean, enforced by a Lagrange
//!   multiplier row; `[C 1; 1ᵀ 0][w; mu] = [c0; 1]`.
//! * **Simple Kriging**: Known zero mean; `C w = c0`.
//!
//! ## Invariants
//!
//! * Kriging is exact at stations: mean equals the observation, variance is zero.
//! * Variances are clamped to be non-negative.
//!
//! ## Non-goals
//!
//! * This module does not select or fit the correlation model.
//! * This module does not handle co-located (duplicate) stations.

// External dependencies
use nalgebra::{DMatrix, DVector};

// Internal dependencies
use crate::algorithms::correlation::CorrelationModel;
use crate::math::geodesy::{angular_separation, azimuth_deg, haversine_km};
use crate::math::linalg::Factorization;
use crate::primitives::errors::KrigerError;

// ============================================================================
// Kriging Method
// ============================================================================

/// Kriging variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KrigingMethod {
    /// Unknown constant mean (default).
    #[default]
    Ordinary,

    /// Known zero mean.
    Simple,
}

impl KrigingMethod {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary",
            Self::Simple => "simple",
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Pairwise separations between stations and targets.
#[derive(Debug, Clone)]
pub struct KrigingGeometry {
    /// Number of stations.
    pub n_stations: usize,

    /// Number of targets.
    pub n_targets: usize,

    /// Station-station great-circle distances (km), row-major.
    station_distance: Vec<f64>,

    /// Station-station epicentral-azimuth separations (deg), row-major.
    station_angle: Vec<f64>,

    /// Target-station great-circle distances (km), one row per target.
    target_distance: Vec<f64>,

    /// Target-station epicentral-azimuth separations (deg), one row per target.
    target_angle: Vec<f64>,
}

impl KrigingGeometry {
    /// Compute separations for stations and targets around an epicentre.
    pub fn new(
        station_lat: &[f64],
        station_lon: &[f64],
        target_lat: &[f64],
        target_lon: &[f64],
        epicenter: (f64, f64),
    ) -> Self {
        let n_stations = station_lat.len();
        let n_targets = target_lat.len();
        let (elat, elon) = epicenter;

        let station_az: Vec<f64> = station_lat
            .iter()
            .zip(station_lon)
            .map(|(&lat, &lon)| azimuth_deg(elat, elon, lat, lon))
            .collect();
        let target_az: Vec<f64> = target_lat
            .iter()
            .zip(target_lon)
            .map(|(&lat, &lon)| azimuth_deg(elat, elon, lat, lon))
            .collect();

        let mut station_distance = vec![0.0; n_stations * n_stations];
        let mut station_angle = vec![0.0; n_stations * n_stations];
        for i in 0..n_stations {
            for j in (i + 1)..n_stations {
                let d = haversine_km(station_lat[i], station_lon[i], station_lat[j], station_lon[j]);
                let a = angular_separation(station_az[i], station_az[j]);
                station_distance[i * n_stations + j] = d;
                station_distance[j * n_stations + i] = d;
                station_angle[i * n_stations + j] = a;
                station_angle[j * n_stations + i] = a;
            }
        }

        let mut target_distance = Vec::with_capacity(n_targets * n_stations);
        let mut target_angle = Vec::with_capacity(n_targets * n_stations);
        for t in 0..n_targets {
            for s in 0..n_stations {
                target_distance.push(haversine_km(
                    target_lat[t],
                    target_lon[t],
                    station_lat[s],
                    station_lon[s],
                ));
                target_angle.push(angular_separation(target_az[t], station_az[s]));
            }
        }

        Self {
            n_stations,
            n_targets,
            station_distance,
            station_angle,
            target_distance,
            target_angle,
        }
    }

    /// Distance (km) and angle (deg) between two stations.
    #[inline]
    pub fn station_pair(&self, i: usize, j: usize) -> (f64, f64) {
        let idx = i * self.n_stations + j;
        (self.station_distance[idx], self.station_angle[idx])
    }

    /// Distance (km) and angle (deg) between a target and a station.
    #[inline]
    pub fn target_pair(&self, target: usize, station: usize) -> (f64, f64) {
        let idx = target * self.n_stations + station;
        (self.target_distance[idx], self.target_angle[idx])
    }
}

// ============================================================================
// Kriging Estimate
// ============================================================================

/// Kriging output at each target.
#[derive(Debug, Clone, PartialEq)]
pub struct KrigingEstimate {
    /// Kriging mean.
    pub mean: Vec<f64>,

    /// Kriging variance.
    pub variance: Vec<f64>,
}

// ============================================================================
// Kriger
// ============================================================================

/// Kriging interpolator over a fixed geometry and residual field.
#[derive(Debug, Clone, Copy)]
pub struct Kriger<'a> {
    /// Precomputed separations.
    geometry: &'a KrigingGeometry,

    /// Observed residuals at the stations.
    values: &'a [f64],

    /// Field variance.
    sill: f64,

    /// Kriging variant.
    method: KrigingMethod,
}

impl<'a> Kriger<'a> {
    /// Create a Kriger; `values` must align with the geometry's stations.
    pub fn new(
        geometry: &'a KrigingGeometry,
        values: &'a [f64],
        sill: f64,
        method: KrigingMethod,
    ) -> Result<Self, KrigerError> {
        if values.len() != geometry.n_stations {
            return Err(KrigerError::MalformedData(format!(
                "{} residual values for {} stations",
                values.len(),
                geometry.n_stations
            )));
        }
        if geometry.n_stations == 0 {
            return Err(KrigerError::MalformedData(
                "residual field has no stations".to_string(),
            ));
        }
        if !sill.is_finite() || sill <= 0.0 {
            return Err(KrigerError::InvalidParameter(format!(
                "sill={sill} (must be > 0)"
            )));
        }
        Ok(Self {
            geometry,
            values,
            sill,
            method,
        })
    }

    /// Krige the residual field with one correlation model.
    pub fn krige(&self, model: &CorrelationModel) -> Result<KrigingEstimate, KrigerError> {
        model.validate()?;

        let n = self.geometry.n_stations;
        let order = match self.method {
            KrigingMethod::Ordinary => n + 1,
            KrigingMethod::Simple => n,
        };

        let ordinary = self.method == KrigingMethod::Ordinary;
        let system = DMatrix::from_fn(order, order, |i, j| {
            if i < n && j < n {
                let (d, a) = self.geometry.station_pair(i, j);
                self.sill * model.correlation(d, a)
            } else if i == j {
                0.0
            } else {
                1.0
            }
        });
        let lu = Factorization::new(system)?;

        let values = DVector::from_column_slice(self.values);
        let n_targets = self.geometry.n_targets;
        let mut mean = Vec::with_capacity(n_targets);
        let mut variance = Vec::with_capacity(n_targets);

        for t in 0..n_targets {
            let rhs = DVector::from_fn(order, |s, _| {
                if s < n {
                    let (d, a) = self.geometry.target_pair(t, s);
                    self.sill * model.correlation(d, a)
                } else {
                    1.0
                }
            });

            let solution = lu.solve(&rhs)?;
            let weights = solution.rows(0, n);

            let explained = weights.dot(&rhs.rows(0, n));
            let lagrange = if ordinary { solution[n] } else { 0.0 };

            mean.push(weights.dot(&values));
            variance.push((self.sill - explained - lagrange).max(0.0));
        }

        Ok(KrigingEstimate { mean, variance })
    }
}
