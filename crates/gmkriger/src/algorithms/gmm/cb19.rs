//! Campbell & Bozorgnia (2019) Arias intensity and CAV model.
//!
//! ## Purpose
//!
//! Median and standard deviations of Arias intensity and cumulative absolute
//! velocity for shallow crustal earthquakes, on the Campbell & Bozorgnia
//! (2014) functional form.
//!
//! ## Key concepts
//!
//! `ln Y = f_mag + f_dis + f_flt + f_hng + f_site + f_sed + f_hyp + f_dip + f_atn`
//!
//! * **Hanging wall**: Tapered in `R_x`, `R_rup`, magnitude, `Ztor` and dip.
//! * **Site**: Nonlinear below `k1`, driven by rock PGA on `Vs30 = 1100` m/s
//!   (`A1100`), computed from the bundled CB14 PGA row.
//! * **Sediment depth**: Shallow (`Z2.5 < 1` km) and deep-basin (`> 3` km) terms.
//!
//! ## Non-goals
//!
//! * The nonlinear-site adjustment of the aleatory variability is not applied;
//!   `phi` and `tau` are the magnitude-dependent linear-site values.

// External dependencies
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// Internal dependencies
use crate::algorithms::gmm::{magnitude_taper, GmmEstimate, GroundMotionModel, Scenario};
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::IntensityMeasure;
use crate::primitives::seismic::Region;

/// Bundled coefficient table.
const BUNDLED_TABLE: &str = include_str!("../../../data/gmm/cb19.json");

/// Site-model constant `c`.
const SITE_C: f64 = 1.88;

/// Site-model exponent `n`.
const SITE_N: f64 = 1.18;

/// Reference rock velocity for `A1100`.
const VS30_ROCK: f64 = 1100.0;

// ============================================================================
// Coefficients
// ============================================================================

/// Coefficients of one intensity measure.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Cb19Coefficients {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
    pub c5: f64,
    pub c6: f64,
    pub c7: f64,
    pub c8: f64,
    pub c9: f64,
    pub c10: f64,
    pub c11: f64,
    pub c12: f64,
    pub c13: f64,
    pub c14: f64,
    pub c15: f64,
    pub c16: f64,
    pub c17: f64,
    pub c18: f64,
    pub c19: f64,
    pub c20: f64,
    pub dc20_ca: f64,
    pub dc20_jp: f64,
    pub dc20_ch: f64,
    pub a2: f64,
    pub h1: f64,
    pub h2: f64,
    pub h3: f64,
    pub h4: f64,
    pub h5: f64,
    pub h6: f64,
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub phi1: f64,
    pub phi2: f64,
    pub tau1: f64,
    pub tau2: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct Cb19Table {
    rock_pga: Cb19Coefficients,
    coefficients: BTreeMap<String, Cb19Coefficients>,
}

// ============================================================================
// Model
// ============================================================================

/// CB19 with a loaded coefficient table.
#[derive(Debug, Clone)]
pub struct Cb19 {
    rock_pga: Cb19Coefficients,
    coefficients: BTreeMap<String, Cb19Coefficients>,
}

impl Cb19 {
    /// Model with the bundled coefficient table.
    pub fn bundled() -> Result<Self, KrigerError> {
        Self::from_json(BUNDLED_TABLE)
    }

    /// Model from a JSON coefficient table.
    pub fn from_json(json: &str) -> Result<Self, KrigerError> {
        let table: Cb19Table = serde_json::from_str(json)?;
        Ok(Self {
            rock_pga: table.rock_pga,
            coefficients: table.coefficients,
        })
    }

    /// Model from a JSON coefficient table on disk.
    pub fn from_path(path: &Path) -> Result<Self, KrigerError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Coefficients for an intensity measure.
    pub fn coefficients(&self, im: IntensityMeasure) -> Result<&Cb19Coefficients, KrigerError> {
        self.coefficients
            .get(im.key())
            .ok_or_else(|| KrigerError::NoGroundMotionModel {
                intensity: im.key(),
                setting: "the CB19 coefficient table".to_string(),
            })
    }

    /// Median PGA (g) on rock with `Vs30 = 1100` m/s.
    pub fn a1100(&self, scenario: &Scenario) -> f64 {
        let rock = Scenario {
            vs30: VS30_ROCK,
            z2p5: default_z2p5(VS30_ROCK),
            ..*scenario
        };
        ln_median(&self.rock_pga, &rock, 0.0).exp()
    }
}

impl GroundMotionModel for Cb19 {
    fn name(&self) -> &'static str {
        "CampbellBozorgnia2019"
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
        let a1100 = self.a1100(scenario);

        Ok(GmmEstimate {
            ln_median: ln_median(coef, scenario, a1100),
            phi: magnitude_taper(scenario.magnitude, coef.phi1, coef.phi2),
            tau: magnitude_taper(scenario.magnitude, coef.tau1, coef.tau2),
        })
    }
}

// ============================================================================
// Model Terms
// ============================================================================

/// Sum of all terms. For `Vs30 > k1` the site term is linear, so `a1100`
/// only matters on soft sites.
fn ln_median(k: &Cb19Coefficients, s: &Scenario, a1100: f64) -> f64 {
    magnitude_term(k, s)
        + distance_term(k, s)
        + faulting_term(k, s)
        + hanging_wall_term(k, s)
        + site_term(k, s, a1100)
        + sediment_term(k, s)
        + hypocentral_term(k, s)
        + dip_term(k, s)
        + attenuation_term(k, s)
}

fn magnitude_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    let m = s.magnitude;
    let mut f = k.c0 + k.c1 * m;
    if m > 4.5 {
        f += k.c2 * (m - 4.5);
    }
    if m > 5.5 {
        f += k.c3 * (m - 5.5);
    }
    if m > 6.5 {
        f += k.c4 * (m - 6.5);
    }
    f
}

fn distance_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    (k.c5 + k.c6 * s.magnitude) * (s.rrup * s.rrup + k.c7 * k.c7).sqrt().ln()
}

fn faulting_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    let f_style = k.c8 * s.style.f_rv() + k.c9 * s.style.f_nm();
    let f_mag = (s.magnitude - 4.5).clamp(0.0, 1.0);
    f_style * f_mag
}

fn hanging_wall_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    if s.rx < 0.0 {
        return 0.0;
    }

    let m = s.magnitude;
    let dip = s.dip.to_radians();
    let r1 = s.width * dip.cos();
    let r2 = 62.0 * m - 350.0;

    let f_rx = if r1 > 0.0 && s.rx < r1 {
        let x = s.rx / r1;
        k.h1 + k.h2 * x + k.h3 * x * x
    } else {
        let x = if r2 > r1 { (s.rx - r1) / (r2 - r1) } else { 0.0 };
        (k.h4 + k.h5 * x + k.h6 * x * x).max(0.0)
    };

    let f_r = if s.rrup == 0.0 {
        1.0
    } else {
        (s.rrup - s.rjb) / s.rrup
    };

    let f_m = if m <= 5.5 {
        0.0
    } else if m <= 6.5 {
        (m - 5.5) * (1.0 + k.a2 * (m - 6.5))
    } else {
        1.0 + k.a2 * (m - 6.5)
    };

    let f_z = if s.ztor <= 16.66 {
        1.0 - 0.06 * s.ztor
    } else {
        0.0
    };

    let f_dip = (90.0 - s.dip) / 45.0;

    k.c10 * f_rx * f_r * f_m * f_z * f_dip
}

fn site_term(k: &Cb19Coefficients, s: &Scenario, a1100: f64) -> f64 {
    let ratio = s.vs30 / k.k1;

    let general = if s.vs30 <= k.k1 {
        k.c11 * ratio.ln()
            + k.k2 * ((a1100 + SITE_C * ratio.powf(SITE_N)).ln() - (a1100 + SITE_C).ln())
    } else {
        (k.c11 + k.k2 * SITE_N) * ratio.ln()
    };

    let japan = if s.region == Region::Japan {
        let shallow = if s.vs30 <= 200.0 {
            (k.c12 + k.k2 * SITE_N) * (ratio.ln() - (200.0 / k.k1).ln())
        } else {
            0.0
        };
        shallow + (k.c13 + k.k2 * SITE_N) * ratio.ln()
    } else {
        0.0
    };

    general + japan
}

fn sediment_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    let s_j = if s.region == Region::Japan { 1.0 } else { 0.0 };
    if s.z2p5 <= 1.0 {
        (k.c14 + k.c15 * s_j) * (s.z2p5 - 1.0)
    } else if s.z2p5 <= 3.0 {
        0.0
    } else {
        k.c16 * k.k3 * (-0.75_f64).exp() * (1.0 - (-0.25 * (s.z2p5 - 3.0)).exp())
    }
}

fn hypocentral_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    let f_h = (s.hypo_depth - 7.0).clamp(0.0, 13.0);
    let m = s.magnitude;
    let f_m = if m <= 5.5 {
        k.c17
    } else if m <= 6.5 {
        k.c17 + (k.c18 - k.c17) * (m - 5.5)
    } else {
        k.c18
    };
    f_h * f_m
}

fn dip_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    let m = s.magnitude;
    if m <= 4.5 {
        k.c19 * s.dip
    } else if m <= 5.5 {
        k.c19 * (5.5 - m) * s.dip
    } else {
        0.0
    }
}

fn attenuation_term(k: &Cb19Coefficients, s: &Scenario) -> f64 {
    if s.rrup <= 80.0 {
        return 0.0;
    }
    let dc20 = match s.region {
        Region::Japan | Region::Italy => k.dc20_jp,
        Region::China | Region::Turkey => k.dc20_ch,
        Region::California | Region::Taiwan | Region::Global => k.dc20_ca,
    };
    (k.c20 + dc20) * (s.rrup - 80.0)
}

/// Campbell & Bozorgnia (2013) default depth to Vs = 2.5 km/s, in km.
pub fn default_z2p5(vs30: f64) -> f64 {
    (7.089 - 1.144 * vs30.ln()).exp()
}
