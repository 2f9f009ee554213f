//! High-level API for Kriged ground-motion estimation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for choosing the earthquake, intensity measure and
//! correlation models, and yields an [`Estimator`] that evaluates target
//! sites.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for optional settings.
//! * **Validated**: Duplicate, missing and unparsable settings are reported at
//!   `.build()`, together with catalogue availability.
//! * **One-call form**: [`get_kgmim`] wraps builder and estimator.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`KrigerBuilder`] via `GmKriger::new()`.
//! 2. Chain configuration methods (`.earthquake()`, `.intensity()`, etc.).
//! 3. Call `.build()` and then `.estimate()` on the resulting [`Estimator`].

// External dependencies
use std::path::{Path, PathBuf};

// Internal dependencies
use crate::algorithms::gmm::bssa14::Bssa14;
use crate::algorithms::gmm::cb19::Cb19;
use crate::algorithms::gmm::GmmSuite;
use crate::engine::catalog::Catalog;
use crate::engine::executor::{Executor, ExecutorConfig};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::kriging::KrigingMethod;
pub use crate::engine::catalog::AvailabilityTable;
pub use crate::engine::output::{KrigedResult, SiteEstimate};
pub use crate::engine::site::{Site, SiteConditions, SiteRecord};
pub use crate::primitives::errors::KrigerError;
pub use crate::primitives::intensity::{CorrelationSet, IntensityMeasure};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring an estimation.
#[derive(Debug, Clone, Default)]
pub struct KrigerBuilder {
    /// Catalogue data directory.
    pub data_dir: Option<PathBuf>,

    /// Catalogue earthquake name.
    pub earthquake: Option<String>,

    /// Intensity measure.
    pub intensity: Option<IntensityMeasure>,

    /// Correlation-model realizations (default: All).
    pub correlation_set: Option<CorrelationSet>,

    /// Kriging variant (default: Ordinary).
    pub kriging_method: Option<KrigingMethod>,

    /// Krige realizations in parallel (default: true).
    pub parallel: Option<bool>,

    /// Replacement BSSA14 coefficient table.
    pub bssa14_coefficients: Option<PathBuf>,

    /// Replacement CB19 coefficient table.
    pub cb19_coefficients: Option<PathBuf>,

    /// Error from a setting that could not be parsed, reported at build.
    #[doc(hidden)]
    pub deferred_error: Option<KrigerError>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl KrigerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalogue data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if self.data_dir.is_some() {
            self.duplicate_param = Some("data_dir");
        }
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the earthquake by catalogue name.
    pub fn earthquake(mut self, name: impl Into<String>) -> Self {
        if self.earthquake.is_some() {
            self.duplicate_param = Some("earthquake");
        }
        self.earthquake = Some(name.into());
        self
    }

    /// Set the intensity measure.
    pub fn intensity(mut self, im: IntensityMeasure) -> Self {
        if self.intensity.is_some() {
            self.duplicate_param = Some("intensity");
        }
        self.intensity = Some(im);
        self
    }

    /// Set the intensity measure by name (`pga`, `psa(1.0)`, ...).
    pub fn intensity_name(self, name: &str) -> Self {
        match name.parse() {
            Ok(im) => self.intensity(im),
            Err(err) => self.defer(err),
        }
    }

    /// Set the correlation-model realizations.
    pub fn correlation_set(mut self, set: CorrelationSet) -> Self {
        if self.correlation_set.is_some() {
            self.duplicate_param = Some("correlation_set");
        }
        self.correlation_set = Some(set);
        self
    }

    /// Set the correlation-model realizations by name (`all`, `realizations`, `map`).
    pub fn correlation_set_name(self, name: &str) -> Self {
        match name.parse() {
            Ok(set) => self.correlation_set(set),
            Err(err) => self.defer(err),
        }
    }

    /// Set the Kriging variant.
    pub fn kriging_method(mut self, method: KrigingMethod) -> Self {
        if self.kriging_method.is_some() {
            self.duplicate_param = Some("kriging_method");
        }
        self.kriging_method = Some(method);
        self
    }

    /// Enable or disable parallel Kriging of realizations.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Replace the bundled BSSA14 coefficient table.
    pub fn bssa14_coefficients(mut self, path: impl Into<PathBuf>) -> Self {
        if self.bssa14_coefficients.is_some() {
            self.duplicate_param = Some("bssa14_coefficients");
        }
        self.bssa14_coefficients = Some(path.into());
        self
    }

    /// Replace the bundled CB19 coefficient table.
    pub fn cb19_coefficients(mut self, path: impl Into<PathBuf>) -> Self {
        if self.cb19_coefficients.is_some() {
            self.duplicate_param = Some("cb19_coefficients");
        }
        self.cb19_coefficients = Some(path.into());
        self
    }

    fn defer(mut self, err: KrigerError) -> Self {
        if self.deferred_error.is_none() {
            self.deferred_error = Some(err);
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validate the configuration, open the catalogue and load the models.
    pub fn build(self) -> Result<Estimator, KrigerError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let earthquake = self
            .earthquake
            .ok_or(KrigerError::MissingParameter {
                parameter: "earthquake",
            })?;
        let intensity = self.intensity.ok_or(KrigerError::MissingParameter {
            parameter: "intensity",
        })?;

        let dir = self.data_dir.unwrap_or_else(Catalog::default_dir);
        let catalog = Catalog::open(&dir)?;
        catalog.availability(&earthquake, intensity)?;

        let suite = GmmSuite {
            bssa14: match &self.bssa14_coefficients {
                Some(path) => Bssa14::from_path(path)?,
                None => Bssa14::bundled()?,
            },
            cb19: match &self.cb19_coefficients {
                Some(path) => Cb19::from_path(path)?,
                None => Cb19::bundled()?,
            },
        };

        let config = ExecutorConfig {
            intensity,
            set: self.correlation_set.unwrap_or_default(),
            method: self.kriging_method.unwrap_or_default(),
            parallel: self.parallel.unwrap_or(true),
        };

        Ok(Estimator {
            catalog,
            suite,
            earthquake,
            config,
        })
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Configured estimator for one earthquake and intensity measure.
#[derive(Debug, Clone)]
pub struct Estimator {
    catalog: Catalog,
    suite: GmmSuite,
    earthquake: String,
    config: ExecutorConfig,
}

impl Estimator {
    /// Catalogue earthquake name.
    pub fn earthquake(&self) -> &str {
        &self.earthquake
    }

    /// Intensity measure.
    pub fn intensity(&self) -> IntensityMeasure {
        self.config.intensity
    }

    /// Correlation-model realizations.
    pub fn correlation_set(&self) -> CorrelationSet {
        self.config.set
    }

    /// Estimate at sites given as parallel arrays; basin depths come from Vs30.
    pub fn estimate<S: AsRef<str>>(
        &self,
        ids: &[S],
        lat: &[f64],
        lon: &[f64],
        vs30: &[f64],
    ) -> Result<KrigedResult, KrigerError> {
        Validator::validate_site_columns(ids, lat, lon, vs30)?;
        let sites = Site::from_columns(ids, lat, lon, vs30);
        self.estimate_sites(&sites)
    }

    /// Estimate at fully described sites.
    pub fn estimate_sites(&self, sites: &[Site]) -> Result<KrigedResult, KrigerError> {
        Validator::validate_sites(sites)?;

        let data = self
            .catalog
            .load_event(&self.earthquake, self.config.intensity, self.config.set)?;
        Validator::validate_event(&data)?;

        Executor::new(&self.suite, self.config).run(&data, sites)
    }
}

// ============================================================================
// One-call Interface
// ============================================================================

/// Estimate an intensity measure at sites with the default data directory.
///
/// `set` and `im` are names as accepted by [`CorrelationSet`] and
/// [`IntensityMeasure`] parsing.
pub fn get_kgmim<S: AsRef<str>>(
    ids: &[S],
    lat: &[f64],
    lon: &[f64],
    vs30: &[f64],
    earthquake: &str,
    set: &str,
    im: &str,
) -> Result<KrigedResult, KrigerError> {
    Validator::validate_site_columns(ids, lat, lon, vs30)?;
    KrigerBuilder::new()
        .earthquake(earthquake)
        .correlation_set_name(set)
        .intensity_name(im)
        .build()?
        .estimate(ids, lat, lon, vs30)
}

/// Default catalogue directory: `$GMKRIGER_DATA_DIR`, else `./data`.
pub fn default_data_dir() -> PathBuf {
    Catalog::default_dir()
}

/// Availability of correlation models in a data directory.
pub fn models(data_dir: impl AsRef<Path>) -> Result<AvailabilityTable, KrigerError> {
    Ok(Catalog::open(data_dir)?.models())
}
