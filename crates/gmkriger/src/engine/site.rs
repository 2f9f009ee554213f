//! Target sites and their soil conditions.
//!
//! ## Purpose
//!
//! This module holds the sites at which an intensity measure is estimated,
//! with Vs30 and basin depths. Missing basin depths are filled from Vs30
//! correlations.
//!
//! ## Key concepts
//!
//! * **Z1.0**: Boore et al. (2014) California relation,
//!   `exp(-7.15/4 ln((Vs30^4 + 571^4) / (1360^4 + 571^4)))` metres.
//! * **Z2.5**: Campbell & Bozorgnia (2013), `exp(7.089 - 1.144 ln Vs30)` km.
//!
//! ## Invariants
//!
//! * Depths are stored in km.

// External dependencies
use serde::Deserialize;

// Internal dependencies
use crate::algorithms::gmm::cb19::default_z2p5;

// ============================================================================
// Site Conditions
// ============================================================================

/// Near-surface and basin parameters of a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteConditions {
    /// Time-averaged shear-wave velocity in the top 30 m, m/s.
    pub vs30: f64,

    /// Depth to Vs = 1.0 km/s in km.
    pub z1: f64,

    /// Depth to Vs = 2.5 km/s in km.
    pub z2p5: f64,
}

impl SiteConditions {
    /// Conditions with basin depths inferred from Vs30.
    pub fn from_vs30(vs30: f64) -> Self {
        Self {
            vs30,
            z1: default_z1(vs30),
            z2p5: default_z2p5(vs30),
        }
    }

    /// Override Z1.0 (km).
    pub fn with_z1(mut self, z1: f64) -> Self {
        self.z1 = z1;
        self
    }

    /// Override Z2.5 (km).
    pub fn with_z2p5(mut self, z2p5: f64) -> Self {
        self.z2p5 = z2p5;
        self
    }
}

/// Default depth to Vs = 1.0 km/s (km) from Vs30.
pub fn default_z1(vs30: f64) -> f64 {
    let metres = (-7.15 / 4.0
        * ((vs30.powi(4) + 571.0_f64.powi(4)) / (1360.0_f64.powi(4) + 571.0_f64.powi(4))).ln())
    .exp();
    metres / 1000.0
}

// ============================================================================
// Site
// ============================================================================

/// A target site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Site name.
    pub id: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Soil and basin conditions.
    pub conditions: SiteConditions,
}

impl Site {
    /// Site with basin depths inferred from Vs30.
    pub fn new(id: impl Into<String>, lat: f64, lon: f64, vs30: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            conditions: SiteConditions::from_vs30(vs30),
        }
    }

    /// Build sites from parallel arrays. Lengths must already be validated.
    pub fn from_columns<S: AsRef<str>>(
        ids: &[S],
        lat: &[f64],
        lon: &[f64],
        vs30: &[f64],
    ) -> Vec<Self> {
        ids.iter()
            .zip(lat)
            .zip(lon)
            .zip(vs30)
            .map(|(((id, &la), &lo), &v)| Self::new(id.as_ref(), la, lo, v))
            .collect()
    }
}

/// Site record as read from a JSON site file.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRecord {
    /// Site name.
    pub id: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Vs30 in m/s.
    pub vs30: f64,

    /// Optional Z1.0 in km.
    #[serde(default)]
    pub z1: Option<f64>,

    /// Optional Z2.5 in km.
    #[serde(default)]
    pub z2p5: Option<f64>,
}

impl From<SiteRecord> for Site {
    fn from(record: SiteRecord) -> Self {
        let mut conditions = SiteConditions::from_vs30(record.vs30);
        if let Some(z1) = record.z1 {
            conditions = conditions.with_z1(z1);
        }
        if let Some(z2p5) = record.z2p5 {
            conditions = conditions.with_z2p5(z2p5);
        }
        Self {
            id: record.id,
            lat: record.lat,
            lon: record.lon,
            conditions,
        }
    }
}
