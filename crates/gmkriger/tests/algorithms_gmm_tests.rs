//! Tests for ground-motion models and model selection.
//!
//! ## Test Organization
//!
//! 1. **Coefficient Tables** - Bundled tables load and cover their IMs
//! 2. **Scaling** - Medians grow with magnitude and decay with distance
//! 3. **Reference Values** - Pinned medians, phi and tau
//! 4. **Standard Deviations** - Positive phi and tau
//! 5. **Selection** - Model choice by IM, tectonic setting and region
//! 6. **Site Defaults** - Basin-depth correlations

use approx::assert_relative_eq;

use gmkriger::internals::algorithms::gmm::bssa14::{mean_z1, Bssa14};
use gmkriger::internals::algorithms::gmm::cb19::{default_z2p5, Cb19};
use gmkriger::internals::algorithms::gmm::{GmmSuite, GroundMotionModel, Scenario};
use gmkriger::internals::engine::site::{default_z1, SiteConditions};
use gmkriger::internals::primitives::errors::KrigerError;
use gmkriger::internals::primitives::intensity::IntensityMeasure;
use gmkriger::internals::primitives::seismic::{FaultingStyle, Region, Tectonic};

fn scenario(magnitude: f64, distance: f64, vs30: f64) -> Scenario {
    Scenario {
        magnitude,
        rjb: distance,
        rrup: (distance * distance + 4.0).sqrt(),
        rx: -distance,
        vs30,
        z1: default_z1(vs30),
        z2p5: default_z2p5(vs30),
        dip: 90.0,
        width: 12.0,
        ztor: 2.0,
        hypo_depth: 9.0,
        style: FaultingStyle::StrikeSlip,
        region: Region::California,
    }
}

fn hanging_wall(rx: f64) -> Scenario {
    let vs30 = 400.0;
    Scenario {
        magnitude: 6.5,
        rjb: 0.0,
        rrup: 4.0,
        rx,
        vs30,
        z1: default_z1(vs30),
        z2p5: default_z2p5(vs30),
        dip: 45.0,
        width: 15.0,
        ztor: 1.0,
        hypo_depth: 9.0,
        style: FaultingStyle::Reverse,
        region: Region::California,
    }
}

// ============================================================================
// Coefficient Table Tests
// ============================================================================

/// Bundled tables parse and cover the expected IMs.
#[test]
fn test_bundled_tables_cover_ims() {
    let bssa = Bssa14::bundled().unwrap();
    for im in [
        IntensityMeasure::Pga,
        IntensityMeasure::Pgv,
        IntensityMeasure::Psa03,
        IntensityMeasure::Psa06,
        IntensityMeasure::Psa10,
    ] {
        assert!(bssa.supports(im), "BSSA14 lacks {im}");
    }
    assert!(!bssa.supports(IntensityMeasure::Ia));

    let cb = Cb19::bundled().unwrap();
    assert!(cb.supports(IntensityMeasure::Ia));
    assert!(cb.supports(IntensityMeasure::Cav));
    assert!(!cb.supports(IntensityMeasure::Pga));
}

/// A table without a PGA row is rejected.
#[test]
fn test_bssa14_requires_pga_row() {
    let json = r#"{"model": "x", "reference": "x", "units": {}, "coefficients": {}}"#;
    assert!(matches!(
        Bssa14::from_json(json),
        Err(KrigerError::MalformedData(_))
    ));
    assert!(matches!(Bssa14::from_json("not json"), Err(KrigerError::Json(_))));
}

/// Missing coefficient rows surface as a model error.
#[test]
fn test_missing_coefficients_error() {
    let cb = Cb19::bundled().unwrap();
    let s = scenario(6.5, 20.0, 760.0);
    assert!(matches!(
        cb.estimate(&s, IntensityMeasure::Pga),
        Err(KrigerError::NoGroundMotionModel { .. })
    ));
}

// ============================================================================
// Scaling Tests
// ============================================================================

/// BSSA14 medians grow with magnitude.
#[test]
fn test_bssa14_magnitude_scaling() {
    let gmm = Bssa14::bundled().unwrap();
    for im in [IntensityMeasure::Pga, IntensityMeasure::Pgv, IntensityMeasure::Psa10] {
        let mut previous = f64::NEG_INFINITY;
        for m in [5.0, 6.0, 7.0, 7.5] {
            let e = gmm.estimate(&scenario(m, 20.0, 760.0), im).unwrap();
            assert!(e.ln_median > previous, "{im} not increasing at M{m}");
            previous = e.ln_median;
        }
    }
}

/// BSSA14 medians decay with distance.
#[test]
fn test_bssa14_distance_scaling() {
    let gmm = Bssa14::bundled().unwrap();
    let mut previous = f64::INFINITY;
    for r in [0.0, 5.0, 20.0, 50.0, 150.0] {
        let e = gmm.estimate(&scenario(6.5, r, 760.0), IntensityMeasure::Pga).unwrap();
        assert!(e.ln_median < previous, "PGA not decreasing at {r} km");
        previous = e.ln_median;
    }
}

/// A moderate event at short distance gives a plausible rock PGA.
#[test]
fn test_bssa14_pga_plausible() {
    let gmm = Bssa14::bundled().unwrap();
    let e = gmm
        .estimate(&scenario(6.5, 10.0, 760.0), IntensityMeasure::Pga)
        .unwrap();
    let pga = e.ln_median.exp();
    assert!(pga > 0.05 && pga < 1.0, "PGA = {pga} g");
}

/// CB19 Arias intensity and CAV grow with magnitude and decay with distance.
#[test]
fn test_cb19_scaling() {
    let gmm = Cb19::bundled().unwrap();
    for im in [IntensityMeasure::Ia, IntensityMeasure::Cav] {
        let small = gmm.estimate(&scenario(5.5, 20.0, 400.0), im).unwrap();
        let large = gmm.estimate(&scenario(7.0, 20.0, 400.0), im).unwrap();
        let far = gmm.estimate(&scenario(7.0, 100.0, 400.0), im).unwrap();

        assert!(large.ln_median > small.ln_median, "{im} magnitude scaling");
        assert!(far.ln_median < large.ln_median, "{im} distance scaling");
        assert!(large.ln_median.is_finite());
    }
}

// ============================================================================
// Reference Value Tests
// ============================================================================

/// BSSA14 PGA for M6.5 strike-slip at 10 km on rock in California.
#[test]
fn test_bssa14_pga_reference() {
    let gmm = Bssa14::bundled().unwrap();
    let e = gmm
        .estimate(&scenario(6.5, 10.0, 760.0), IntensityMeasure::Pga)
        .unwrap();

    assert_relative_eq!(e.ln_median, -1.5587305568770184, max_relative = 1e-9);
    assert_relative_eq!(e.phi, 0.495, epsilon = 1e-12);
    assert_relative_eq!(e.tau, 0.348, epsilon = 1e-12);
}

/// BSSA14 PSA(1.0) responds to Z1.0 through the basin term and saturates at f7.
#[test]
fn test_bssa14_psa10_basin_reference() {
    let gmm = Bssa14::bundled().unwrap();
    let im = IntensityMeasure::Psa10;
    let base = scenario(6.5, 10.0, 400.0);

    let default = gmm.estimate(&base, im).unwrap();
    assert_relative_eq!(default.ln_median, -1.27048427122351, max_relative = 1e-9);
    assert_relative_eq!(default.phi, 0.587, epsilon = 1e-12);
    assert_relative_eq!(default.tau, 0.313, epsilon = 1e-12);

    let deep = Scenario { z1: 0.5, ..base };
    let e = gmm.estimate(&deep, im).unwrap();
    assert_relative_eq!(e.ln_median, -1.217532423329919, max_relative = 1e-9);

    // f6 * (z1 - mean_z1) relative to a site at the mean basin depth
    let mean = Scenario {
        z1: mean_z1(400.0, Region::California),
        ..base
    };
    let at_mean = gmm.estimate(&mean, im).unwrap();
    assert_relative_eq!(
        e.ln_median - at_mean.ln_median,
        0.367 * (0.5 - mean.z1),
        epsilon = 1e-9
    );

    let very_deep = Scenario { z1: 2.0, ..base };
    let capped = gmm.estimate(&very_deep, im).unwrap();
    assert_relative_eq!(capped.ln_median, -1.062408157094684, max_relative = 1e-9);
    assert_relative_eq!(capped.ln_median - at_mean.ln_median, 0.208, epsilon = 1e-9);
}

/// CB19 Arias intensity on the hanging wall of a dipping reverse fault.
#[test]
fn test_cb19_ia_hanging_wall_reference() {
    let gmm = Cb19::bundled().unwrap();
    let im = IntensityMeasure::Ia;

    let hw = gmm.estimate(&hanging_wall(5.0), im).unwrap();
    let fw = gmm.estimate(&hanging_wall(-5.0), im).unwrap();

    assert_relative_eq!(hw.ln_median, 1.5703283690427914, max_relative = 1e-9);
    assert_relative_eq!(fw.ln_median, 0.7269898494670187, max_relative = 1e-9);
    assert_relative_eq!(hw.ln_median - fw.ln_median, 0.8433385195757727, epsilon = 1e-9);
    assert_relative_eq!(hw.phi, 0.809, epsilon = 1e-12);
    assert_relative_eq!(hw.tau, 0.435, epsilon = 1e-12);
}

/// CB19 CAV on the hanging wall of a dipping reverse fault.
#[test]
fn test_cb19_cav_hanging_wall_reference() {
    let gmm = Cb19::bundled().unwrap();
    let im = IntensityMeasure::Cav;

    let hw = gmm.estimate(&hanging_wall(5.0), im).unwrap();
    let fw = gmm.estimate(&hanging_wall(-5.0), im).unwrap();

    assert_relative_eq!(hw.ln_median, 2.7387638226302697, max_relative = 1e-9);
    assert_relative_eq!(fw.ln_median, 2.396317272257077, max_relative = 1e-9);
    assert_relative_eq!(hw.ln_median - fw.ln_median, 0.3424465503731926, epsilon = 1e-9);
    assert_relative_eq!(hw.phi, 0.394, epsilon = 1e-12);
    assert_relative_eq!(hw.tau, 0.257, epsilon = 1e-12);
}

// ============================================================================
// Standard Deviation Tests
// ============================================================================

/// Both models report positive, finite phi and tau.
#[test]
fn test_standard_deviations_positive() {
    let suite = GmmSuite::bundled().unwrap();
    let s = scenario(6.0, 30.0, 300.0);

    let cases: [(&dyn GroundMotionModel, IntensityMeasure); 3] = [
        (&suite.bssa14, IntensityMeasure::Pga),
        (&suite.bssa14, IntensityMeasure::Psa06),
        (&suite.cb19, IntensityMeasure::Ia),
    ];
    for (gmm, im) in cases {
        let e = gmm.estimate(&s, im).unwrap();
        assert!(e.phi > 0.0 && e.phi.is_finite());
        assert!(e.tau > 0.0 && e.tau.is_finite());
        assert_relative_eq!(e.sigma(), (e.phi * e.phi + e.tau * e.tau).sqrt());
    }
}

// ============================================================================
// Selection Tests
// ============================================================================

/// Model choice by IM, tectonic setting and region.
#[test]
fn test_model_selection() {
    let suite = GmmSuite::bundled().unwrap();

    let pga = suite
        .select(IntensityMeasure::Pga, Tectonic::Crustal, Region::California)
        .unwrap();
    assert_eq!(pga.name(), suite.bssa14.name());

    let psa = suite
        .select(IntensityMeasure::Psa10, Tectonic::Interface, Region::Japan)
        .unwrap();
    assert_eq!(psa.name(), suite.bssa14.name());

    let ia = suite
        .select(IntensityMeasure::Ia, Tectonic::Crustal, Region::Global)
        .unwrap();
    assert_eq!(ia.name(), suite.cb19.name());
}

/// Settings without an implemented model are errors.
#[test]
fn test_model_selection_unavailable() {
    let suite = GmmSuite::bundled().unwrap();

    let cases = [
        (IntensityMeasure::Pga, Tectonic::Intraslab, Region::Japan),
        (IntensityMeasure::Pgv, Tectonic::Interface, Region::Global),
        (IntensityMeasure::Ia, Tectonic::Crustal, Region::Japan),
        (IntensityMeasure::Cav, Tectonic::Interface, Region::Taiwan),
        (IntensityMeasure::CavDp, Tectonic::Crustal, Region::California),
    ];
    for (im, tectonic, region) in cases {
        match suite.select(im, tectonic, region) {
            Err(KrigerError::NoGroundMotionModel { intensity, .. }) => {
                assert_eq!(intensity, im.key())
            }
            other => panic!("expected NoGroundMotionModel for {im}, got {other:?}"),
        }
    }
}

// ============================================================================
// Site Default Tests
// ============================================================================

/// Basin-depth defaults decrease with Vs30 and are in km.
#[test]
fn test_basin_depth_defaults() {
    let soft = SiteConditions::from_vs30(250.0);
    let rock = SiteConditions::from_vs30(760.0);

    assert!(soft.z1 > rock.z1);
    assert!(soft.z2p5 > rock.z2p5);
    assert!(rock.z1 > 0.0 && rock.z1 < 0.1, "z1 = {} km", rock.z1);
    assert!(rock.z2p5 > 0.3 && rock.z2p5 < 1.5, "z2.5 = {} km", rock.z2p5);
    assert_relative_eq!(default_z2p5(760.0), (7.089 - 1.144 * 760f64.ln()).exp());
    assert!(mean_z1(400.0, Region::Japan) > 0.0);

    let custom = SiteConditions::from_vs30(400.0).with_z1(0.3).with_z2p5(2.0);
    assert_eq!(custom.z1, 0.3);
    assert_eq!(custom.z2p5, 2.0);
}
