//! Ground-motion models.
//!
//! ## Purpose
//!
//! This module defines the scenario description shared by all ground-motion
//! models (GMMs), the [`GroundMotionModel`] trait, and the rules that pick a
//! model for an intensity measure, tectonic setting and region.
//!
//! ## Design notes
//!
//! * **Data-driven coefficients**: Each model parses a JSON coefficient table;
//!   the bundled tables are embedded at compile time and can be replaced.
//! * **Natural-log units**: Medians are returned as `ln` of the IM in the
//!   units of [`IntensityMeasure::label_with_units`].
//!
//! ## Key concepts
//!
//! * **phi**: Within-event (intra-event) standard deviation, `ln` units.
//! * **tau**: Between-event (inter-event) standard deviation, `ln` units.
//!
//! ## Non-goals
//!
//! * Foulser-Piggott & Goda (2015) and Campbell & Bozorgnia (2011) are not
//!   implemented; requests that need them fail with
//!   [`KrigerError::NoGroundMotionModel`].

/// Boore, Stewart, Seyhan & Atkinson (2014).
pub mod bssa14;

/// Campbell & Bozorgnia (2019).
pub mod cb19;

// External dependencies
use std::fmt::Debug;

// Internal dependencies
use crate::algorithms::gmm::bssa14::Bssa14;
use crate::algorithms::gmm::cb19::Cb19;
use crate::algorithms::rupture::{RepresentativeFault, SiteDistances};
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::IntensityMeasure;
use crate::primitives::seismic::{FaultingStyle, Region, Tectonic};

// ============================================================================
// Scenario
// ============================================================================

/// Earthquake-site scenario evaluated by a ground-motion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    /// Moment magnitude.
    pub magnitude: f64,

    /// Joyner-Boore distance in km.
    pub rjb: f64,

    /// Rupture distance in km.
    pub rrup: f64,

    /// Strike-normal coordinate in km.
    pub rx: f64,

    /// Time-averaged shear-wave velocity in the top 30 m, m/s.
    pub vs30: f64,

    /// Depth to Vs = 1.0 km/s in km.
    pub z1: f64,

    /// Depth to Vs = 2.5 km/s in km.
    pub z2p5: f64,

    /// Representative dip in degrees.
    pub dip: f64,

    /// Representative down-dip width in km.
    pub width: f64,

    /// Depth to top of rupture in km.
    pub ztor: f64,

    /// Hypocentral depth in km.
    pub hypo_depth: f64,

    /// Faulting style.
    pub style: FaultingStyle,

    /// Ground-motion region.
    pub region: Region,
}

impl Scenario {
    /// Assemble a scenario from event, rupture and site information.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        magnitude: f64,
        hypo_depth: f64,
        region: Region,
        fault: &RepresentativeFault,
        distances: SiteDistances,
        vs30: f64,
        z1: f64,
        z2p5: f64,
    ) -> Self {
        Self {
            magnitude,
            rjb: distances.rjb,
            rrup: distances.rrup,
            rx: distances.rx,
            vs30,
            z1,
            z2p5,
            dip: fault.dip,
            width: fault.width,
            ztor: fault.ztor,
            hypo_depth,
            style: fault.style,
            region,
        }
    }
}

// ============================================================================
// Estimate
// ============================================================================

/// GMM prediction at one site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GmmEstimate {
    /// Natural log of the median intensity.
    pub ln_median: f64,

    /// Within-event standard deviation.
    pub phi: f64,

    /// Between-event standard deviation.
    pub tau: f64,
}

impl GmmEstimate {
    /// Total standard deviation.
    pub fn sigma(&self) -> f64 {
        (self.phi * self.phi + self.tau * self.tau).sqrt()
    }
}

// ============================================================================
// Trait
// ============================================================================

/// A parametric ground-motion model.
pub trait GroundMotionModel: Debug + Send + Sync {
    /// Short citation-style name.
    fn name(&self) -> &'static str;

    /// Whether the model carries coefficients for this intensity measure.
    fn supports(&self, im: IntensityMeasure) -> bool;

    /// Predict the intensity distribution for one scenario.
    fn estimate(
        &self,
        scenario: &Scenario,
        im: IntensityMeasure,
    ) -> Result<GmmEstimate, KrigerError>;
}

// ============================================================================
// Model Suite and Selection
// ============================================================================

/// The set of implemented models with their coefficient tables loaded.
#[derive(Debug, Clone)]
pub struct GmmSuite {
    /// Boore et al. (2014).
    pub bssa14: Bssa14,

    /// Campbell & Bozorgnia (2019).
    pub cb19: Cb19,
}

impl GmmSuite {
    /// Suite with the bundled coefficient tables.
    pub fn bundled() -> Result<Self, KrigerError> {
        Ok(Self {
            bssa14: Bssa14::bundled()?,
            cb19: Cb19::bundled()?,
        })
    }

    /// Pick the model for an intensity measure in a tectonic setting and region.
    pub fn select(
        &self,
        im: IntensityMeasure,
        tectonic: Tectonic,
        region: Region,
    ) -> Result<&dyn GroundMotionModel, KrigerError> {
        let unavailable = |setting: String| KrigerError::NoGroundMotionModel {
            intensity: im.key(),
            setting,
        };

        match im {
            IntensityMeasure::Pga | IntensityMeasure::Pgv => {
                if tectonic == Tectonic::Crustal {
                    Ok(&self.bssa14)
                } else {
                    Err(unavailable(format!("{tectonic} events")))
                }
            }
            IntensityMeasure::Psa03 | IntensityMeasure::Psa06 | IntensityMeasure::Psa10 => {
                Ok(&self.bssa14)
            }
            IntensityMeasure::Ia | IntensityMeasure::Cav => {
                if tectonic == Tectonic::Crustal && region != Region::Japan {
                    Ok(&self.cb19)
                } else {
                    Err(unavailable(format!(
                        "{tectonic} events in region {region} (Foulser-Piggott & Goda 2015)"
                    )))
                }
            }
            IntensityMeasure::CavDp => Err(unavailable(format!(
                "{tectonic} events (Campbell & Bozorgnia 2011)"
            ))),
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Linear interpolation of a magnitude-dependent standard deviation between
/// M4.5 and M5.5.
#[inline]
pub(crate) fn magnitude_taper(m: f64, low: f64, high: f64) -> f64 {
    if m <= 4.5 {
        low
    } else if m >= 5.5 {
        high
    } else {
        low + (high - low) * (m - 4.5)
    }
}
