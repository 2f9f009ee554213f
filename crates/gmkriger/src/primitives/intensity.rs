//! Intensity measures and correlation-model selections.
//!
//! ## Purpose
//!
//! This module enumerates the ground-motion intensity measures the catalogue
//! carries residual fields for, together with their data keys and table
//! labels, and the choice of correlation-model realizations to Krige with.
//!
//! ## Key concepts
//!
//! * **Data key**: Lowercase name used in catalogue JSON (`pga`, `psa(0.3)`).
//! * **Labels**: Short label for sigma columns, unit label for value columns.
//! * **Correlation set**: All posterior samples plus MAP, samples only, or MAP only.

// External dependencies
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

// Internal dependencies
use crate::primitives::errors::KrigerError;

// ============================================================================
// Intensity Measure
// ============================================================================

/// Ground-motion intensity measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityMeasure {
    /// Peak ground acceleration.
    Pga,

    /// Peak ground velocity.
    Pgv,

    /// Arias intensity.
    Ia,

    /// Cumulative absolute velocity.
    Cav,

    /// Cumulative absolute velocity with a 5 cm/s² threshold per second.
    CavDp,

    /// 5%-damped pseudo-spectral acceleration at 0.3 s.
    Psa03,

    /// 5%-damped pseudo-spectral acceleration at 0.6 s.
    Psa06,

    /// 5%-damped pseudo-spectral acceleration at 1.0 s.
    Psa10,
}

impl IntensityMeasure {
    /// Every supported intensity measure, in catalogue column order.
    pub const ALL: [IntensityMeasure; 8] = [
        Self::Pga,
        Self::Pgv,
        Self::Cav,
        Self::Ia,
        Self::Psa03,
        Self::Psa06,
        Self::Psa10,
        Self::CavDp,
    ];

    /// Lowercase key used in catalogue files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pga => "pga",
            Self::Pgv => "pgv",
            Self::Ia => "ia",
            Self::Cav => "cav",
            Self::CavDp => "cavdp",
            Self::Psa03 => "psa(0.3)",
            Self::Psa06 => "psa(0.6)",
            Self::Psa10 => "psa(1.0)",
        }
    }

    /// Short label, used in sigma column headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pga => "PGA",
            Self::Pgv => "PGV",
            Self::Ia => "Ia",
            Self::Cav => "CAV",
            Self::CavDp => "CAVdp",
            Self::Psa03 => "PSA(0.3)",
            Self::Psa06 => "PSA(0.6)",
            Self::Psa10 => "PSA(1.0)",
        }
    }

    /// Label with units, used in value column headers.
    pub fn label_with_units(&self) -> &'static str {
        match self {
            Self::Pga => "PGA (g)",
            Self::Pgv => "PGV (cm/s)",
            Self::Ia => "Ia (m/s)",
            Self::Cav => "CAV (m/s)",
            Self::CavDp => "CAVdp (g/s)",
            Self::Psa03 => "PSA(0.3) (g)",
            Self::Psa06 => "PSA(0.6) (g)",
            Self::Psa10 => "PSA(1.0) (g)",
        }
    }

    /// Oscillator period in seconds for spectral measures.
    pub fn period(&self) -> Option<f64> {
        match self {
            Self::Psa03 => Some(0.3),
            Self::Psa06 => Some(0.6),
            Self::Psa10 => Some(1.0),
            _ => None,
        }
    }
}

impl FromStr for IntensityMeasure {
    type Err = KrigerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|im| im.key() == lowered)
            .ok_or_else(|| KrigerError::UnknownIntensityMeasure(s.to_string()))
    }
}

impl Serialize for IntensityMeasure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl Display for IntensityMeasure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

// ============================================================================
// Correlation Set
// ============================================================================

/// Which correlation-model realizations to Krige with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrelationSet {
    /// Every posterior realization plus the MAP model (reported separately).
    #[default]
    All,

    /// Posterior realizations only.
    Realizations,

    /// Maximum a-posteriori model only.
    Map,
}

impl CorrelationSet {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Realizations => "realizations",
            Self::Map => "map",
        }
    }

    /// Whether results carry separate MAP columns.
    pub fn reports_map(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for CorrelationSet {
    type Err = KrigerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "realizations" => Ok(Self::Realizations),
            "map" => Ok(Self::Map),
            _ => Err(KrigerError::UnknownCorrelationSet(s.to_string())),
        }
    }
}

impl Serialize for CorrelationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Display for CorrelationSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}
