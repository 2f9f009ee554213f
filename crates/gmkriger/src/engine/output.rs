//! Output types for Kriged intensity estimates.
//!
//! ## Purpose
//!
//! This module defines [`KrigedResult`], the per-site table returned by an
//! estimation, and its human-readable, CSV and JSON renderings.
//!
//! ## Design notes
//!
//! * **Ergonomics**: Implements `Display` as a fixed-width table.
//! * **Optional columns**: MAP columns exist only for [`CorrelationSet::All`].
//! * **Serialization**: Implements `serde::Serialize` for JSON export.
//!
//! ## Invariants
//!
//! * Site rows keep the order of the input sites.
//! * MAP fields are `Some` for every row or for none.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::Path;

// Internal dependencies
use crate::primitives::errors::KrigerError;
use crate::primitives::intensity::{CorrelationSet, IntensityMeasure};

// ============================================================================
// Result Structures
// ============================================================================

/// Estimate at one target site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteEstimate {
    /// Site name.
    pub id: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lon: f64,

    /// Median intensity in the units of [`IntensityMeasure::label_with_units`].
    pub median: f64,

    /// Standard deviation of the Kriged within-event residual (ln units).
    pub sigma_ln: f64,

    /// Median intensity from the MAP correlation model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_median: Option<f64>,

    /// Residual standard deviation from the MAP correlation model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_sigma_ln: Option<f64>,

    /// Natural log of the GMM median, before the event term and residual.
    pub gmm_ln_median: f64,

    /// GMM within-event standard deviation.
    pub phi: f64,

    /// GMM between-event standard deviation.
    pub tau: f64,
}

/// Kriged intensity estimates for a set of sites.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KrigedResult {
    /// Catalogue earthquake name.
    pub earthquake: String,

    /// Estimated intensity measure.
    pub intensity: IntensityMeasure,

    /// Correlation-model selection used.
    pub set: CorrelationSet,

    /// Name of the ground-motion model used.
    pub gmm: &'static str,

    /// Number of correlation-model realizations Kriged.
    pub realizations: usize,

    /// Per-site estimates.
    pub sites: Vec<SiteEstimate>,
}

impl KrigedResult {
    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the result has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Whether the MAP columns are populated.
    pub fn has_map(&self) -> bool {
        self.sites.first().is_some_and(|s| s.map_median.is_some())
    }

    /// Column headers of the tabular rendering.
    pub fn columns(&self) -> Vec<String> {
        let label = self.intensity.label_with_units();
        let sigma = format!("sigma_{} (ln)", self.intensity.label());

        let mut columns = vec![
            "Site".to_string(),
            "Lat (deg)".to_string(),
            "Lon (deg)".to_string(),
        ];
        if self.has_map() {
            columns.push(format!("{label} - MAP"));
            columns.push(format!("{sigma} - MAP"));
        }
        columns.push(label.to_string());
        columns.push(sigma);
        columns
    }

    /// Median values in site order.
    pub fn medians(&self) -> Vec<f64> {
        self.sites.iter().map(|s| s.median).collect()
    }

    /// Residual sigmas in site order.
    pub fn sigmas(&self) -> Vec<f64> {
        self.sites.iter().map(|s| s.sigma_ln).collect()
    }

    /// Render as CSV with the tabular column headers.
    pub fn to_csv(&self) -> String {
        let mut out = self
            .columns()
            .iter()
            .map(|c| csv_field(c))
            .collect::<Vec<_>>()
            .join(",");
        out.push('\n');

        let has_map = self.has_map();
        for s in &self.sites {
            let mut row = vec![csv_field(&s.id), s.lat.to_string(), s.lon.to_string()];
            if has_map {
                row.push(s.map_median.unwrap_or(f64::NAN).to_string());
                row.push(s.map_sigma_ln.unwrap_or(f64::NAN).to_string());
            }
            row.push(s.median.to_string());
            row.push(s.sigma_ln.to_string());
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// Write CSV to a file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), KrigerError> {
        let path = path.as_ref();
        fs::write(path, self.to_csv())
            .map_err(|e| KrigerError::Io(format!("{}: {e}", path.display())))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, KrigerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for KrigedResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Earthquake:   {}", self.earthquake)?;
        writeln!(f, "  Intensity:    {}", self.intensity.label_with_units())?;
        writeln!(f, "  Models:       {}", self.set)?;
        writeln!(f, "  Realizations: {}", self.realizations)?;
        writeln!(f, "  GMM:          {}", self.gmm)?;
        writeln!(f)?;

        let columns = self.columns();
        let id_width = self
            .sites
            .iter()
            .map(|s| s.id.len())
            .max()
            .unwrap_or(0)
            .max(columns[0].len());
        let value_widths: Vec<usize> = columns[1..].iter().map(|c| c.len().max(12)).collect();

        write!(f, "{:<id_width$}", columns[0])?;
        for (column, &w) in columns[1..].iter().zip(&value_widths) {
            write!(f, " {column:>w$}")?;
        }
        writeln!(f)?;

        let line_width = id_width + value_widths.iter().map(|w| w + 1).sum::<usize>();
        writeln!(f, "{:-<line_width$}", "")?;

        let has_map = self.has_map();
        for s in &self.sites {
            let mut values = vec![s.lat, s.lon];
            if has_map {
                values.push(s.map_median.unwrap_or(f64::NAN));
                values.push(s.map_sigma_ln.unwrap_or(f64::NAN));
            }
            values.push(s.median);
            values.push(s.sigma_ln);

            write!(f, "{:<id_width$}", s.id)?;
            for (v, &w) in values.iter().zip(&value_widths) {
                write!(f, " {v:>w$.6}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
