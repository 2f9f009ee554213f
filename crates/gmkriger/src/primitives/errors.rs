//! Error types for ground-motion Kriging.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while estimating
//! an intensity measure: catalogue lookups, input validation, numerical
//! failures in the Kriging system, and missing ground-motion models.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending names and values.
//! * **Comparable**: `Clone + PartialEq` so tests can match on exact variants.
//! * **Foreign errors**: I/O and JSON failures are folded into message variants.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for ground-motion Kriging operations.
#[derive(Debug, Clone, PartialEq)]
pub enum KrigerError {
    /// Site input arrays are empty.
    EmptyInput,

    /// Site input arrays differ in length.
    UnequalLength {
        /// Number of site identifiers.
        ids: usize,
        /// Number of latitudes.
        lat: usize,
        /// Number of longitudes.
        lon: usize,
        /// Number of Vs30 values.
        vs30: usize,
    },

    /// Input contains NaN, infinite, or out-of-range values.
    InvalidNumericValue(String),

    /// A configuration or model parameter is outside its valid domain.
    InvalidParameter(String),

    /// The intensity measure name is not recognised.
    UnknownIntensityMeasure(String),

    /// The correlation-model selection is not recognised.
    UnknownCorrelationSet(String),

    /// The catalogue has no entry for the earthquake.
    UnknownEarthquake(String),

    /// The catalogue has no correlation models for this intensity measure.
    UnavailableIntensityMeasure {
        /// Earthquake name.
        earthquake: String,
        /// Intensity measure key.
        intensity: &'static str,
    },

    /// No ground-motion model is implemented for the requested setting.
    NoGroundMotionModel {
        /// Intensity measure key.
        intensity: &'static str,
        /// Description of the unsupported setting.
        setting: String,
    },

    /// The Kriging system could not be solved.
    SingularSystem {
        /// Order of the linear system.
        order: usize,
        /// Pivot column where elimination broke down.
        pivot: usize,
    },

    /// Catalogue data is malformed or inconsistent.
    MalformedData(String),

    /// A file could not be read or written.
    Io(String),

    /// A JSON document could not be parsed.
    Json(String),

    /// The logging subscriber could not be configured.
    Logger(String),

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for KrigerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::UnequalLength {
                ids,
                lat,
                lon,
                vs30,
            } => write!(
                f,
                "Unequal length of input: {ids} ids, {lat} latitudes, {lon} longitudes, {vs30} Vs30 values"
            ),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidParameter(s) => write!(f, "Invalid parameter: {s}"),
            Self::UnknownIntensityMeasure(name) => {
                write!(f, "Unknown intensity measure: '{name}'")
            }
            Self::UnknownCorrelationSet(name) => write!(
                f,
                "Unknown correlation model set: '{name}' (expected all, realizations or map)"
            ),
            Self::UnknownEarthquake(name) => {
                write!(f, "No correlation models currently implemented for {name}")
            }
            Self::UnavailableIntensityMeasure {
                earthquake,
                intensity,
            } => write!(f, "No {intensity} correlation models for {earthquake}"),
            Self::NoGroundMotionModel { intensity, setting } => write!(
                f,
                "No ground motion models currently implemented for {intensity} in {setting}"
            ),
            Self::SingularSystem { order, pivot } => write!(
                f,
                "Kriging system of order {order} is singular at pivot {pivot}"
            ),
            Self::MalformedData(msg) => write!(f, "Malformed catalogue data: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Logger(msg) => write!(f, "Logger error: {msg}"),
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
            ),
            Self::MissingParameter { parameter } => {
                write!(f, "Parameter '{parameter}' must be set before building")
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for KrigerError {}

impl From<std::io::Error> for KrigerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KrigerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
