//! # gmkriger: Kriged ground-motion intensity estimates
//!
//! Estimates earthquake ground-motion intensity measures (IMs) at arbitrary
//! sites by combining a ground-motion model (GMM) prediction with Kriged
//! within-event residuals observed at recording stations.
//!
//! ## How it works
//!
//! For a catalogued earthquake and an IM, the catalogue supplies station
//! residuals, the residual-field variance (sill), the event term `eta` and a
//! set of posterior samples of a spatial correlation model. Each sample is
//! used to Krige the residuals to the target sites; the realizations are
//! combined by the law of total variance and added to the GMM median:
//!
//! ```text
//! IM    = exp(mu_GMM + eta + mean_i(m_i))
//! sigma = sqrt(mean_i(v_i) + std_i(m_i)^2)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gmkriger::prelude::*;
//!
//! let estimator = GmKriger::new()
//!     .data_dir("data")
//!     .earthquake("2019 M7.1 Ridgecrest")
//!     .intensity(Pga)
//!     .correlation_set(All)
//!     .build()?;
//!
//! let result = estimator.estimate(
//!     &["A", "B"],
//!     &[35.70, 35.90],
//!     &[-117.50, -117.70],
//!     &[360.0, 560.0],
//! )?;
//! println!("{}", result);
//! # Result::<(), KrigerError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Earthquake:   2019 M7.1 Ridgecrest
//!   Intensity:    PGA (g)
//!   Models:       all
//!   Realizations: 1001
//!   GMM:          BooreStewartSeyhanAtkinson2014
//!
//! Site    Lat (deg)    Lon (deg) PGA (g) - MAP sigma_PGA (ln) - MAP      PGA (g) sigma_PGA (ln)
//! ...
//! ```
//!
//! ### One-call interface
//!
//! ```rust,no_run
//! use gmkriger::prelude::*;
//!
//! let result = get_kgmim(
//!     &["A"],
//!     &[35.70],
//!     &[-117.50],
//!     &[360.0],
//!     "2019 M7.1 Ridgecrest",
//!     "map",
//!     "psa(1.0)",
//! )?;
//! # Result::<(), KrigerError>::Ok(())
//! ```
//!
//! ## Data directory
//!
//! The catalogue lives in a directory holding `models.json` (which IMs have
//! correlation models per earthquake) and one `<earthquake>.json` per event.
//! The default directory is `$GMKRIGER_DATA_DIR`, or `./data`.
//!
//! ## Features
//!
//! * `cpu` (default): Krige correlation-model realizations in parallel with
//!   `rayon`.

// Layer 1: Primitives - enumerations and error type.
mod primitives;

// Layer 2: Math - geodesy, linear algebra and statistics.
mod math;

// Layer 3: Algorithms - correlation, Kriging, rupture geometry and GMMs.
mod algorithms;

// Layer 4: Evaluation - combination of realizations.
mod evaluation;

// Layer 5: Engine - catalogue, validation and execution.
mod engine;

// High-level fluent API.
mod api;

/// Logging bootstrap for binaries.
pub mod logging;

// Standard gmkriger prelude.
pub mod prelude {
    pub use crate::api::{
        default_data_dir, get_kgmim, models, AvailabilityTable,
        CorrelationSet::{self, All, Map, Realizations},
        Estimator,
        IntensityMeasure::{self, Cav, CavDp, Ia, Pga, Pgv, Psa03, Psa06, Psa10},
        KrigedResult, KrigerBuilder as GmKriger, KrigerError,
        KrigingMethod::{self, Ordinary, Simple},
        Site, SiteConditions, SiteEstimate, SiteRecord,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules so integration tests can reach
// the lower layers directly.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
