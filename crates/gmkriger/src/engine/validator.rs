//! Input validation for site arrays and catalogue data.
//!
//! ## Purpose
//!
//! This module checks target-site inputs and loaded catalogue data before any
//! Kriging system is assembled: lengths, finiteness, coordinate ranges and
//! positive Vs30.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not correct or filter invalid inputs.

// Internal dependencies
use crate::engine::catalog::EventData;
use crate::engine::site::Site;
use crate::primitives::errors::KrigerError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for sites and catalogue data.
///
/// All methods return `Result<(), KrigerError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Site Validation
    // ========================================================================

    /// Validate parallel site arrays.
    pub fn validate_site_columns<S>(
        ids: &[S],
        lat: &[f64],
        lon: &[f64],
        vs30: &[f64],
    ) -> Result<(), KrigerError> {
        // Check 1: Matching lengths
        let n = ids.len();
        if lat.len() != n || lon.len() != n || vs30.len() != n {
            return Err(KrigerError::UnequalLength {
                ids: n,
                lat: lat.len(),
                lon: lon.len(),
                vs30: vs30.len(),
            });
        }

        // Check 2: Non-empty
        if n == 0 {
            return Err(KrigerError::EmptyInput);
        }

        for i in 0..n {
            Self::validate_coordinates(lat[i], lon[i], i)?;
            Self::validate_vs30(vs30[i], i)?;
        }

        Ok(())
    }

    /// Validate a list of sites.
    pub fn validate_sites(sites: &[Site]) -> Result<(), KrigerError> {
        if sites.is_empty() {
            return Err(KrigerError::EmptyInput);
        }

        for (i, site) in sites.iter().enumerate() {
            Self::validate_coordinates(site.lat, site.lon, i)?;
            Self::validate_vs30(site.conditions.vs30, i)?;

            let c = &site.conditions;
            if !c.z1.is_finite() || c.z1 < 0.0 {
                return Err(KrigerError::InvalidNumericValue(format!("z1[{i}]={}", c.z1)));
            }
            if !c.z2p5.is_finite() || c.z2p5 < 0.0 {
                return Err(KrigerError::InvalidNumericValue(format!(
                    "z2p5[{i}]={}",
                    c.z2p5
                )));
            }
        }

        Ok(())
    }

    /// Validate a latitude / longitude pair.
    pub fn validate_coordinates(lat: f64, lon: f64, index: usize) -> Result<(), KrigerError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(KrigerError::InvalidNumericValue(format!("lat[{index}]={lat}")));
        }
        if !lon.is_finite() || !(-180.0..=360.0).contains(&lon) {
            return Err(KrigerError::InvalidNumericValue(format!("lon[{index}]={lon}")));
        }
        Ok(())
    }

    /// Validate one Vs30 value.
    pub fn validate_vs30(vs30: f64, index: usize) -> Result<(), KrigerError> {
        if !vs30.is_finite() || vs30 <= 0.0 {
            return Err(KrigerError::InvalidNumericValue(format!("vs30[{index}]={vs30}")));
        }
        Ok(())
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Validate that no builder parameter was set twice.
    pub fn validate_no_duplicates(duplicate: Option<&'static str>) -> Result<(), KrigerError> {
        match duplicate {
            Some(parameter) => Err(KrigerError::DuplicateParameter { parameter }),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Catalogue Validation
    // ========================================================================

    /// Validate a loaded event before Kriging.
    pub fn validate_event(data: &EventData) -> Result<(), KrigerError> {
        let field = &data.field;
        let n = field.values.len();

        if field.lat.len() != n || field.lon.len() != n {
            return Err(KrigerError::MalformedData(format!(
                "{} residuals, {} station latitudes, {} station longitudes",
                n,
                field.lat.len(),
                field.lon.len()
            )));
        }
        if n == 0 {
            return Err(KrigerError::MalformedData(
                "residual field has no stations".to_string(),
            ));
        }
        if let Some(i) = field.values.iter().position(|v| !v.is_finite()) {
            return Err(KrigerError::MalformedData(format!(
                "residual[{i}]={}",
                field.values[i]
            )));
        }
        if !field.sill.is_finite() || field.sill <= 0.0 {
            return Err(KrigerError::MalformedData(format!("sill={}", field.sill)));
        }
        if !field.eta.is_finite() {
            return Err(KrigerError::MalformedData(format!("eta={}", field.eta)));
        }

        let event = &data.event;
        if !event.magnitude.is_finite() || event.magnitude <= 0.0 {
            return Err(KrigerError::MalformedData(format!(
                "magnitude={}",
                event.magnitude
            )));
        }
        if !event.hypo_depth.is_finite() || event.hypo_depth < 0.0 {
            return Err(KrigerError::MalformedData(format!(
                "hypocentre depth={}",
                event.hypo_depth
            )));
        }
        if data.realizations.is_empty() {
            return Err(KrigerError::MalformedData(
                "no correlation-model realizations".to_string(),
            ));
        }

        Ok(())
    }
}
