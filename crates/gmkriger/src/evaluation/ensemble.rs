//! Combination of Kriging realizations.
//!
//! ## Purpose
//!
//! This module reduces the Kriging means and variances of many
//! correlation-model realizations to a single within-event residual estimate
//! and its logarithmic standard deviation at each site.
//!
//! ## Key concepts
//!
//! * **Law of total variance**: `sigma² = mean_i(v_i) + std_i(m_i)²`, the
//!   average Kriging variance plus the spread of the Kriging means.
//! * **MAP split**: With [`CorrelationSet::All`] the last realization is the
//!   MAP model; it is excluded from the ensemble and reported on its own.
//!
//! ## Invariants
//!
//! * Sigma is zero at sites coinciding with a station.
//! * Output vectors have one entry per site.
//!
//! ## Non-goals
//!
//! * This module does not add the ground-motion model prediction.

// External dependencies
use ndarray::{Array2, Axis};

// Internal dependencies
use crate::algorithms::kriging::KrigingEstimate;
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::CorrelationSet;

// ============================================================================
// Summary
// ============================================================================

/// Mean and sigma of the within-event residual at each site.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualSummary {
    /// Mean Kriged residual.
    pub mean: Vec<f64>,

    /// Standard deviation of the Kriged residual (ln units).
    pub sigma: Vec<f64>,
}

/// Ensemble summary, with separate MAP columns when requested.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleSummary {
    /// Summary over posterior realizations (or the single MAP model).
    pub ensemble: ResidualSummary,

    /// Summary of the MAP model alone, for [`CorrelationSet::All`].
    pub map: Option<ResidualSummary>,
}

// ============================================================================
// Combination
// ============================================================================

/// Combine per-realization Kriging estimates.
///
/// `station_sites` lists target indices that coincide with a station; their
/// variances and sigmas are forced to zero.
pub fn combine(
    mut estimates: Vec<KrigingEstimate>,
    set: CorrelationSet,
    station_sites: &[usize],
) -> Result<EnsembleSummary, KrigerError> {
    let required = if set.reports_map() { 2 } else { 1 };
    if estimates.len() < required {
        return Err(KrigerError::MalformedData(format!(
            "{} correlation-model realizations for '{}' (need at least {required})",
            estimates.len(),
            set
        )));
    }

    for estimate in &mut estimates {
        for &idx in station_sites {
            if let Some(v) = estimate.variance.get_mut(idx) {
                *v = 0.0;
            }
        }
    }

    let map = if set.reports_map() {
        let last = estimates.pop().ok_or_else(|| {
            KrigerError::MalformedData("missing MAP realization".to_string())
        })?;
        let sigma = last.variance.iter().map(|v| v.sqrt()).collect();
        Some(ResidualSummary {
            mean: last.mean,
            sigma,
        })
    } else {
        None
    };

    let mut ensemble = summarize(&estimates);
    for &idx in station_sites {
        if let Some(s) = ensemble.sigma.get_mut(idx) {
            *s = 0.0;
        }
    }

    Ok(EnsembleSummary { ensemble, map })
}

/// Mean and total sigma over realizations.
///
/// Means and variances are stacked into realization x site arrays and
/// reduced along the realization axis; the spread of the means uses the
/// population standard deviation.
pub fn summarize(estimates: &[KrigingEstimate]) -> ResidualSummary {
    let n_sites = estimates.first().map_or(0, |e| e.mean.len());
    let shape = (estimates.len(), n_sites);
    let means = Array2::from_shape_fn(shape, |(r, s)| estimates[r].mean[s]);
    let variances = Array2::from_shape_fn(shape, |(r, s)| estimates[r].variance[s]);

    let (Some(mean), Some(avg_variance)) =
        (means.mean_axis(Axis(0)), variances.mean_axis(Axis(0)))
    else {
        return ResidualSummary {
            mean: Vec::new(),
            sigma: Vec::new(),
        };
    };
    let spread = means.std_axis(Axis(0), 0.0);

    let sigma = avg_variance
        .iter()
        .zip(&spread)
        .map(|(&v, &s)| (v + s * s).sqrt())
        .collect();

    ResidualSummary {
        mean: mean.to_vec(),
        sigma,
    }
}
