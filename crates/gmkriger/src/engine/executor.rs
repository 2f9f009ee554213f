//! Execution engine for Kriged intensity estimation.
//!
//! ## Purpose
//!
//! This module orchestrates one estimation: it selects the ground-motion
//! model, Kriges the station residuals for every correlation-model
//! realization, combines the realizations, and adds the GMM median and event
//! term at each site.
//!
//! ## Design notes
//!
//! * **Fail fast**: The GMM is selected before any Kriging system is solved.
//! * **Shared geometry**: Distances and azimuths are computed once and reused
//!   for every realization.
//! * **Parallelism**: With the `cpu` feature, realizations are Kriged with
//!   `rayon`; results are collected in realization order.
//!
//! ## Invariants
//!
//! * Output rows follow the input site order.
//! * Sigma is zero at sites that coincide with a station.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not read the catalogue (handled by `catalog`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use tracing::{debug, info};

// Internal dependencies
use crate::algorithms::correlation::CorrelationModel;
use crate::algorithms::gmm::{GmmEstimate, GmmSuite, Scenario};
use crate::algorithms::kriging::{Kriger, KrigingEstimate, KrigingGeometry, KrigingMethod};
use crate::engine::catalog::EventData;
use crate::engine::output::{KrigedResult, SiteEstimate};
use crate::engine::site::Site;
use crate::evaluation::ensemble::combine;
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::{CorrelationSet, IntensityMeasure};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for one estimation run.
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    /// Intensity measure to estimate.
    pub intensity: IntensityMeasure,

    /// Correlation-model realizations to Krige with.
    pub set: CorrelationSet,

    /// Kriging variant.
    pub method: KrigingMethod,

    /// Krige realizations in parallel (requires the `cpu` feature).
    pub parallel: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            intensity: IntensityMeasure::Pga,
            set: CorrelationSet::All,
            method: KrigingMethod::Ordinary,
            parallel: true,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs an estimation over validated sites and catalogue data.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    suite: &'a GmmSuite,
    config: ExecutorConfig,
}

impl<'a> Executor<'a> {
    /// Create an executor over a model suite.
    pub fn new(suite: &'a GmmSuite, config: ExecutorConfig) -> Self {
        Self { suite, config }
    }

    /// Estimate the intensity measure at every site.
    pub fn run(&self, data: &EventData, sites: &[Site]) -> Result<KrigedResult, KrigerError> {
        let cfg = self.config;
        let event = &data.event;

        let gmm = self
            .suite
            .select(cfg.intensity, event.tectonic, event.region)?;
        debug!(
            gmm = gmm.name(),
            tectonic = %event.tectonic,
            region = %event.region,
            "selected ground-motion model"
        );

        let lat: Vec<f64> = sites.iter().map(|s| s.lat).collect();
        let lon: Vec<f64> = sites.iter().map(|s| s.lon).collect();
        let field = &data.field;

        let station_sites = field.coincident_targets(&lat, &lon);
        if !station_sites.is_empty() {
            debug!(count = station_sites.len(), "sites coincide with stations");
        }

        let geometry = KrigingGeometry::new(
            &field.lat,
            &field.lon,
            &lat,
            &lon,
            (event.hypo_lat, event.hypo_lon),
        );
        let kriger = Kriger::new(&geometry, &field.values, field.sill, cfg.method)?;

        let estimates = self.krige_all(&kriger, &data.realizations)?;
        let summary = combine(estimates, cfg.set, &station_sites)?;

        let rep = data.fault.representative();
        let predictions = sites
            .iter()
            .map(|site| {
                let distances = data.fault.distances_to(site.lat, site.lon);
                let c = site.conditions;
                let scenario = Scenario::new(
                    event.magnitude,
                    event.hypo_depth,
                    event.region,
                    &rep,
                    distances,
                    c.vs30,
                    c.z1,
                    c.z2p5,
                );
                gmm.estimate(&scenario, cfg.intensity)
            })
            .collect::<Result<Vec<GmmEstimate>, KrigerError>>()?;

        let rows = sites
            .iter()
            .zip(&predictions)
            .enumerate()
            .map(|(i, (site, p))| {
                let base = p.ln_median + field.eta;
                let (map_median, map_sigma_ln) = match &summary.map {
                    Some(map) => (Some((base + map.mean[i]).exp()), Some(map.sigma[i])),
                    None => (None, None),
                };
                SiteEstimate {
                    id: site.id.clone(),
                    lat: site.lat,
                    lon: site.lon,
                    median: (base + summary.ensemble.mean[i]).exp(),
                    sigma_ln: summary.ensemble.sigma[i],
                    map_median,
                    map_sigma_ln,
                    gmm_ln_median: p.ln_median,
                    phi: p.phi,
                    tau: p.tau,
                }
            })
            .collect();

        info!(
            earthquake = %event.name,
            intensity = cfg.intensity.key(),
            method = cfg.method.name(),
            sites = sites.len(),
            realizations = data.realizations.len(),
            "kriged intensity estimates"
        );

        Ok(KrigedResult {
            earthquake: event.name.clone(),
            intensity: cfg.intensity,
            set: cfg.set,
            gmm: gmm.name(),
            realizations: data.realizations.len(),
            sites: rows,
        })
    }

    fn krige_all(
        &self,
        kriger: &Kriger<'_>,
        models: &[CorrelationModel],
    ) -> Result<Vec<KrigingEstimate>, KrigerError> {
        #[cfg(feature = "cpu")]
        if self.config.parallel {
            return models.par_iter().map(|m| kriger.krige(m)).collect();
        }

        models.iter().map(|m| kriger.krige(m)).collect()
    }
}
