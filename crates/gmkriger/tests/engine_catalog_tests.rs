//! Tests for the earthquake catalogue reader.
//!
//! ## Test Organization
//!
//! 1. **Availability** - Known and unknown earthquakes and IMs
//! 2. **Event Loading** - Source, rupture, residual field and realizations
//! 3. **Correlation Sets** - Realization counts per selection

use std::path::PathBuf;

use approx::assert_relative_eq;

use gmkriger::internals::engine::catalog::Catalog;
use gmkriger::internals::primitives::errors::KrigerError;
use gmkriger::internals::primitives::intensity::{CorrelationSet, IntensityMeasure};
use gmkriger::internals::primitives::seismic::{FaultingStyle, Region, Tectonic};

const EVENT: &str = "2020 M6.5 Testville";

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

fn catalog() -> Catalog {
    Catalog::open(data_dir()).unwrap()
}

// ============================================================================
// Availability Tests
// ============================================================================

/// Earthquakes are listed in file order.
#[test]
fn test_earthquake_listing() {
    assert_eq!(
        catalog().earthquakes(),
        vec![EVENT, "2021 M5.9 Elsewhere"]
    );
}

/// Availability follows the flags in models.json.
#[test]
fn test_availability_flags() {
    let c = catalog();
    assert!(c.availability(EVENT, IntensityMeasure::Pga).is_ok());
    assert!(c.availability(EVENT, IntensityMeasure::Ia).is_ok());

    match c.availability(EVENT, IntensityMeasure::Pgv) {
        Err(KrigerError::UnavailableIntensityMeasure {
            earthquake,
            intensity,
        }) => {
            assert_eq!(earthquake, EVENT);
            assert_eq!(intensity, "pgv");
        }
        other => panic!("expected UnavailableIntensityMeasure, got {other:?}"),
    }

    assert_eq!(
        c.availability("1906 M7.9 San Francisco", IntensityMeasure::Pga),
        Err(KrigerError::UnknownEarthquake("1906 M7.9 San Francisco".into()))
    );
}

/// The availability table renders Yes / No cells.
#[test]
fn test_models_table() {
    let table = catalog().models();
    assert_eq!(table.rows.len(), 2);

    let (name, flags) = &table.rows[0];
    assert_eq!(name, EVENT);
    assert_eq!(flags.len(), IntensityMeasure::ALL.len());
    assert!(flags[0]);
    assert!(!flags[1]);

    let rendered = table.to_string();
    assert!(rendered.contains("earthquake"));
    assert!(rendered.contains("psa(1.0)"));
    assert!(rendered.contains("Yes"));
    assert!(rendered.contains("No"));
}

/// A missing data directory is an I/O error.
#[test]
fn test_open_missing_directory() {
    assert!(matches!(
        Catalog::open(data_dir().join("does-not-exist")),
        Err(KrigerError::Io(_))
    ));
}

// ============================================================================
// Event Loading Tests
// ============================================================================

/// Source, rupture and residual field are read from the event file.
#[test]
fn test_load_event() {
    let data = catalog()
        .load_event(EVENT, IntensityMeasure::Pga, CorrelationSet::All)
        .unwrap();

    let e = &data.event;
    assert_eq!(e.name, EVENT);
    assert_relative_eq!(e.magnitude, 6.5);
    assert_relative_eq!(e.hypo_depth, 8.0);
    assert_eq!(e.tectonic, Tectonic::Crustal);
    assert_eq!(e.region, Region::California);

    assert_eq!(data.fault.len(), 1);
    assert_eq!(data.fault.representative().style, FaultingStyle::Reverse);

    assert_eq!(data.field.len(), 6);
    assert_relative_eq!(data.field.sill, 0.25);
    assert_relative_eq!(data.field.eta, 0.12);
    assert_relative_eq!(data.field.values[0], 0.35);
}

/// Listed earthquakes without an event file are an I/O error.
#[test]
fn test_load_event_missing_file() {
    assert!(matches!(
        catalog().load_event("2021 M5.9 Elsewhere", IntensityMeasure::Pga, CorrelationSet::Map),
        Err(KrigerError::Io(_))
    ));
}

/// Coincident targets are found by exact coordinate match.
#[test]
fn test_coincident_targets() {
    let data = catalog()
        .load_event(EVENT, IntensityMeasure::Pga, CorrelationSet::Map)
        .unwrap();
    let hits = data
        .field
        .coincident_targets(&[35.0, 35.10, 34.80], &[-118.0, -118.10, -117.90]);
    assert_eq!(hits, vec![1, 2]);
}

// ============================================================================
// Correlation Set Tests
// ============================================================================

/// All has the posterior samples plus the MAP, last.
#[test]
fn test_realization_counts() {
    let c = catalog();
    let count = |set| {
        c.load_event(EVENT, IntensityMeasure::Ia, set)
            .unwrap()
            .realizations
    };

    let all = count(CorrelationSet::All);
    let posterior = count(CorrelationSet::Realizations);
    let map = count(CorrelationSet::Map);

    assert_eq!(posterior.len(), 4);
    assert_eq!(map.len(), 1);
    assert_eq!(all.len(), 5);
    assert_eq!(all[4], map[0]);
    assert_eq!(&all[..4], &posterior[..]);
    assert_eq!(map[0].params().l_e, 27.0);
    assert_eq!(map[0].params().gamma_e, 0.65);
    assert_eq!(map[0].params().l_a, 75.0);
}
