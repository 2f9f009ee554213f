//! Boore, Stewart, Seyhan & Atkinson (2014) NGA-West2 model.
//!
//! ## Purpose
//!
//! Median and standard deviations of PGA, PGV and 5%-damped PSA for shallow
//! crustal earthquakes in active regions.
//!
//! ## Key concepts
//!
//! `ln Y = F_E(M, mech) + F_P(R_JB, M, region) + F_S(Vs30, R_JB, M, region, z1)`
//!
//! * **Source**: Hinged quadratic/linear magnitude scaling about `Mh`.
//! * **Path**: Geometric spreading with magnitude-dependent slope and
//!   regional anelastic attenuation `c3 + Δc3`.
//! * **Site**: Linear Vs30 term, nonlinear term driven by rock PGA (`Vs30 =
//!   760` m/s) and, for periods of 0.65 s and longer, a basin-depth term.
//!
//! ## Invariants
//!
//! * `phi` and `tau` are positive.
//! * The nonlinear site term vanishes at `Vs30 >= 760` m/s.

// External dependencies
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// Internal dependencies
use crate::algorithms::gmm::{magnitude_taper, GmmEstimate, GroundMotionModel, Scenario};
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::IntensityMeasure;
use crate::primitives::seismic::{FaultingStyle, Region};

/// Bundled coefficient table.
const BUNDLED_TABLE: &str = include_str!("../../../data/gmm/bssa14.json");

/// Reference magnitude for geometric spreading.
const M_REF: f64 = 4.5;

/// Reference distance in km.
const R_REF: f64 = 1.0;

/// Shortest period with a basin-depth adjustment.
const BASIN_MIN_PERIOD: f64 = 0.65;

// ============================================================================
// Coefficients
// ============================================================================

/// Coefficients of one intensity measure.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bssa14Coefficients {
    /// Oscillator period in seconds (absent for PGA and PGV).
    #[serde(default)]
    pub period: Option<f64>,
    pub e0: f64,
    pub e1: f64,
    pub e2: f64,
    pub e3: f64,
    pub e4: f64,
    pub e5: f64,
    pub e6: f64,
    pub mh: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub h: f64,
    pub dc3_global: f64,
    pub dc3_china_turkey: f64,
    pub dc3_italy_japan: f64,
    pub c: f64,
    pub vc: f64,
    pub vref: f64,
    pub f1: f64,
    pub f3: f64,
    pub f4: f64,
    pub f5: f64,
    pub f6: f64,
    pub f7: f64,
    pub r1: f64,
    pub r2: f64,
    pub dphi_r: f64,
    pub dphi_v: f64,
    pub v1: f64,
    pub v2: f64,
    pub phi1: f64,
    pub phi2: f64,
    pub tau1: f64,
    pub tau2: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct Bssa14Table {
    coefficients: BTreeMap<String, Bssa14Coefficients>,
}

// ============================================================================
// Model
// ============================================================================

/// BSSA14 with a loaded coefficient table.
#[derive(Debug, Clone)]
pub struct Bssa14 {
    coefficients: BTreeMap<String, Bssa14Coefficients>,
}

impl Bssa14 {
    /// Model with the bundled coefficient table.
    pub fn bundled() -> Result<Self, KrigerError> {
        Self::from_json(BUNDLED_TABLE)
    }

    /// Model from a JSON coefficient table.
    pub fn from_json(json: &str) -> Result<Self, KrigerError> {
        let table: Bssa14Table = serde_json::from_str(json)?;
        if !table.coefficients.contains_key(IntensityMeasure::Pga.key()) {
            return Err(KrigerError::MalformedData(
                "BSSA14 table lacks the PGA row required for rock PGA".to_string(),
            ));
        }
        Ok(Self {
            coefficients: table.coefficients,
        })
    }

    /// Model from a JSON coefficient table on disk.
    pub fn from_path(path: &Path) -> Result<Self, KrigerError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Coefficients for an intensity measure.
    pub fn coefficients(&self, im: IntensityMeasure) -> Result<&Bssa14Coefficients, KrigerError> {
        self.coefficients
            .get(im.key())
            .ok_or_else(|| KrigerError::NoGroundMotionModel {
                intensity: im.key(),
                setting: "the BSSA14 coefficient table".to_string(),
            })
    }

    /// Median rock PGA (g) at the reference velocity.
    pub fn rock_pga(&self, scenario: &Scenario) -> Result<f64, KrigerError> {
        let pga = self.coefficients(IntensityMeasure::Pga)?;
        Ok((source_term(pga, scenario) + path_term(pga, scenario)).exp())
    }
}

impl GroundMotionModel for Bssa14 {
    fn name(&self) -> &'static str {
        "BooreStewartSeyhanAtkinson2014"
    }

    fn supports(&self, im: IntensityMeasure) -> bool {
        self.coefficients.contains_key(im.key())
    }

    fn estimate(
        &self,
        scenario: &Scenario,
        im: IntensityMeasure,
    ) -> Result<GmmEstimate, KrigerError> {
        let coef = self.coefficients(im)?;
        let pga_rock = self.rock_pga(scenario)?;

        let ln_median = source_term(coef, scenario)
            + path_term(coef, scenario)
            + site_term(coef, scenario, pga_rock);

        Ok(GmmEstimate {
            ln_median,
            phi: within_event_std(coef, scenario),
            tau: magnitude_taper(scenario.magnitude, coef.tau1, coef.tau2),
        })
    }
}

// ============================================================================
// Model Terms
// ============================================================================

/// Source function `F_E`.
fn source_term(k: &Bssa14Coefficients, s: &Scenario) -> f64 {
    let mech = match s.style {
        FaultingStyle::Unspecified => k.e0,
        FaultingStyle::StrikeSlip => k.e1,
        FaultingStyle::Normal => k.e2,
        FaultingStyle::Reverse => k.e3,
    };
    let dm = s.magnitude - k.mh;
    if s.magnitude <= k.mh {
        mech + k.e4 * dm + k.e5 * dm * dm
    } else {
        mech + k.e6 * dm
    }
}

/// Path function `F_P`.
fn path_term(k: &Bssa14Coefficients, s: &Scenario) -> f64 {
    let r = (s.rjb * s.rjb + k.h * k.h).sqrt();
    let dc3 = match s.region {
        Region::China | Region::Turkey => k.dc3_china_turkey,
        Region::Italy | Region::Japan => k.dc3_italy_japan,
        Region::California | Region::Taiwan | Region::Global => k.dc3_global,
    };
    (k.c1 + k.c2 * (s.magnitude - M_REF)) * (r / R_REF).ln() + (k.c3 + dc3) * (r - R_REF)
}

/// Site function `F_S = F_lin + F_nl + F_dz1`.
fn site_term(k: &Bssa14Coefficients, s: &Scenario, pga_rock: f64) -> f64 {
    let f_lin = k.c * (s.vs30.min(k.vc) / k.vref).ln();

    let f2 = k.f4 * ((k.f5 * (s.vs30.min(k.vref) - 360.0)).exp() - (k.f5 * (k.vref - 360.0)).exp());
    let f_nl = k.f1 + f2 * ((pga_rock + k.f3) / k.f3).ln();

    let f_dz1 = match k.period {
        Some(t) if t >= BASIN_MIN_PERIOD && k.f6 != 0.0 => {
            let dz1 = s.z1 - mean_z1(s.vs30, s.region);
            if dz1 <= k.f7 / k.f6 {
                k.f6 * dz1
            } else {
                k.f7
            }
        }
        _ => 0.0,
    };

    f_lin + f_nl + f_dz1
}

/// Within-event standard deviation with magnitude, distance and Vs30 terms.
fn within_event_std(k: &Bssa14Coefficients, s: &Scenario) -> f64 {
    let phi_m = magnitude_taper(s.magnitude, k.phi1, k.phi2);

    let phi_mr = if s.rjb <= k.r1 {
        phi_m
    } else if s.rjb <= k.r2 {
        phi_m + k.dphi_r * (s.rjb / k.r1).ln() / (k.r2 / k.r1).ln()
    } else {
        phi_m + k.dphi_r
    };

    if s.vs30 >= k.v2 {
        phi_mr
    } else if s.vs30 >= k.v1 {
        phi_mr - k.dphi_v * (k.v2 / s.vs30).ln() / (k.v2 / k.v1).ln()
    } else {
        phi_mr - k.dphi_v
    }
}

/// Region-average depth to Vs = 1 km/s (km) for a given Vs30.
pub fn mean_z1(vs30: f64, region: Region) -> f64 {
    let metres = match region {
        Region::Japan => {
            (-5.23 / 2.0
                * ((vs30.powi(2) + 412.39_f64.powi(2)) / (1360.0_f64.powi(2) + 412.39_f64.powi(2)))
                    .ln())
            .exp()
        }
        _ => {
            (-7.15 / 4.0
                * ((vs30.powi(4) + 570.94_f64.powi(4)) / (1360.0_f64.powi(4) + 570.94_f64.powi(4)))
                    .ln())
            .exp()
        }
    };
    metres / 1000.0
}
