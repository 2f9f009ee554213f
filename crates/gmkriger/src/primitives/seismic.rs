//! Seismotectonic classifications.
//!
//! ## Purpose
//!
//! Tectonic setting, ground-motion region and faulting style enumerations
//! shared by the catalogue reader and the ground-motion models.
//!
//! ## Invariants
//!
//! * Unrecognised region names map to [`Region::Global`].
//! * Faulting-style flags are mutually exclusive.

// External dependencies
use std::fmt::{Display, Formatter, Result as FmtResult};

// ============================================================================
// Tectonic Setting
// ============================================================================

/// Tectonic setting of an earthquake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tectonic {
    /// Shallow crustal earthquake in an active region.
    Crustal,

    /// Subduction interface earthquake.
    Interface,

    /// Subduction intraslab earthquake.
    Intraslab,

    /// Any other classification.
    Other,
}

impl Tectonic {
    /// Parse a catalogue string, case-insensitively.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "crustal" => Self::Crustal,
            "interface" => Self::Interface,
            "intraslab" => Self::Intraslab,
            _ => Self::Other,
        }
    }

    /// Intraslab indicator (`F_INS`).
    pub fn f_ins(&self) -> f64 {
        if *self == Self::Intraslab {
            1.0
        } else {
            0.0
        }
    }

    /// Interface indicator (`F_INT`).
    pub fn f_int(&self) -> f64 {
        if *self == Self::Interface {
            1.0
        } else {
            0.0
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crustal => "crustal",
            Self::Interface => "interface",
            Self::Intraslab => "intraslab",
            Self::Other => "other",
        }
    }
}

impl Display for Tectonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Region
// ============================================================================

/// Ground-motion region used for regional path and basin adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// California.
    California,

    /// China.
    China,

    /// Italy.
    Italy,

    /// Japan.
    Japan,

    /// Taiwan.
    Taiwan,

    /// Turkey.
    Turkey,

    /// Global average.
    #[default]
    Global,
}

/// Events whose catalogue region is overridden to [`Region::Global`].
const GLOBAL_OVERRIDE_EVENTS: [&str; 4] = [
    "2023 M7.8 Pazarcik",
    "2023 M7.7 Kahramanmaras",
    "2023 M6.8 Nurdagi",
    "2023 M6.3 Yayladagi",
];

impl Region {
    /// Parse a catalogue string; anything unrecognised is global.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "california" => Self::California,
            "china" => Self::China,
            "italy" => Self::Italy,
            "japan" => Self::Japan,
            "taiwan" => Self::Taiwan,
            "turkey" => Self::Turkey,
            _ => Self::Global,
        }
    }

    /// Region for a catalogued earthquake, honouring per-event overrides.
    pub fn for_event(earthquake: &str, region: &str) -> Self {
        if GLOBAL_OVERRIDE_EVENTS.contains(&earthquake) {
            Self::Global
        } else {
            Self::parse(region)
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::California => "california",
            Self::China => "china",
            Self::Italy => "italy",
            Self::Japan => "japan",
            Self::Taiwan => "taiwan",
            Self::Turkey => "turkey",
            Self::Global => "global",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Faulting Style
// ============================================================================

/// Style of faulting derived from the rake angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultingStyle {
    /// Strike-slip.
    StrikeSlip,

    /// Normal.
    Normal,

    /// Reverse (including reverse-oblique).
    Reverse,

    /// Unspecified mechanism.
    Unspecified,
}

impl FaultingStyle {
    /// Classify a rake angle in degrees.
    pub fn from_rake(rake: f64) -> Self {
        if !rake.is_finite() {
            Self::Unspecified
        } else if rake > 30.0 && rake < 150.0 {
            Self::Reverse
        } else if rake > -150.0 && rake < -30.0 {
            Self::Normal
        } else {
            Self::StrikeSlip
        }
    }

    /// Normal-faulting indicator (`F_NM`).
    pub fn f_nm(&self) -> f64 {
        if *self == Self::Normal {
            1.0
        } else {
            0.0
        }
    }

    /// Reverse-faulting indicator (`F_RV`).
    pub fn f_rv(&self) -> f64 {
        if *self == Self::Reverse {
            1.0
        } else {
            0.0
        }
    }

    /// Two-letter mechanism code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StrikeSlip => "SS",
            Self::Normal => "NS",
            Self::Reverse => "RS",
            Self::Unspecified => "U",
        }
    }
}

impl Display for FaultingStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}
