//! Tests for finite-fault geometry and source-to-site distances.
//!
//! ## Test Organization
//!
//! 1. **Segment Geometry** - Corners, area, validation
//! 2. **Distance Metrics** - R_JB, R_rup and R_x for simple geometries
//! 3. **Multi-segment Faults** - Representative parameters and minima
//! 4. **Faulting Style** - Rake classification

use approx::assert_relative_eq;

use gmkriger::internals::algorithms::rupture::{Fault, FaultSegment};
use gmkriger::internals::math::geodesy::{destination, haversine_km};
use gmkriger::internals::primitives::errors::KrigerError;
use gmkriger::internals::primitives::seismic::FaultingStyle;

fn segment(strike: f64, dip: f64, rake: f64, ztor: f64) -> FaultSegment {
    FaultSegment {
        length: 30.0,
        width: 15.0,
        strike,
        dip,
        rake,
        ulc_lat: 34.9,
        ulc_lon: -118.0,
        ztor,
    }
}

// ============================================================================
// Segment Geometry Tests
// ============================================================================

/// The upper-right corner lies one segment length along strike.
#[test]
fn test_upper_right_corner() {
    let s = segment(0.0, 60.0, 90.0, 1.0);
    let (lat, lon) = s.upper_right_corner();

    assert!(lat > s.ulc_lat);
    assert_relative_eq!(lon, s.ulc_lon, epsilon = 1e-9);
    assert_relative_eq!(haversine_km(s.ulc_lat, s.ulc_lon, lat, lon), 30.0, epsilon = 1e-6);
    assert_relative_eq!(s.area(), 450.0, epsilon = 1e-12);
}

/// Non-physical segments are rejected.
#[test]
fn test_segment_validation() {
    let mut s = segment(0.0, 60.0, 90.0, 1.0);
    s.width = 0.0;
    assert!(matches!(s.validate(), Err(KrigerError::InvalidParameter(_))));

    let mut s = segment(0.0, 60.0, 90.0, 1.0);
    s.dip = 120.0;
    assert!(matches!(s.validate(), Err(KrigerError::InvalidParameter(_))));

    let mut s = segment(0.0, 60.0, 90.0, 1.0);
    s.ulc_lat = f64::NAN;
    assert!(matches!(s.validate(), Err(KrigerError::InvalidNumericValue(_))));

    assert!(matches!(Fault::new(vec![]), Err(KrigerError::MalformedData(_))));
}

// ============================================================================
// Distance Metric Tests
// ============================================================================

/// A site on the trace of a vertical fault has R_JB = 0 and R_rup = Ztor.
#[test]
fn test_vertical_fault_site_on_trace() {
    let s = segment(0.0, 90.0, 0.0, 2.0);
    let (lat, lon) = destination(s.ulc_lat, s.ulc_lon, 0.0, 10.0);
    let d = s.distances_to(lat, lon);

    assert_relative_eq!(d.rjb, 0.0, epsilon = 1e-6);
    assert_relative_eq!(d.rrup, 2.0, epsilon = 1e-6);
    assert_relative_eq!(d.rx, 0.0, epsilon = 1e-6);
}

/// Off the end of a vertical fault the distances follow the geometry.
#[test]
fn test_vertical_fault_site_beyond_end() {
    let s = segment(0.0, 90.0, 0.0, 0.0);
    let (lat, lon) = destination(s.ulc_lat, s.ulc_lon, 0.0, 40.0);
    let d = s.distances_to(lat, lon);

    assert_relative_eq!(d.rjb, 10.0, max_relative = 1e-3);
    assert_relative_eq!(d.rrup, 10.0, max_relative = 1e-3);
}

/// Sites east of a north-striking, east-dipping fault are on the hanging wall.
#[test]
fn test_rx_sign_hanging_wall() {
    let s = segment(0.0, 45.0, 90.0, 0.0);
    let (mid_lat, mid_lon) = destination(s.ulc_lat, s.ulc_lon, 0.0, 15.0);

    let (east_lat, east_lon) = destination(mid_lat, mid_lon, 90.0, 5.0);
    let (west_lat, west_lon) = destination(mid_lat, mid_lon, 270.0, 5.0);

    let hw = s.distances_to(east_lat, east_lon);
    let fw = s.distances_to(west_lat, west_lon);

    assert!(hw.rx > 0.0, "hanging-wall R_x = {}", hw.rx);
    assert!(fw.rx < 0.0, "footwall R_x = {}", fw.rx);
    assert_relative_eq!(hw.rx, 5.0, max_relative = 1e-3);

    // Surface projection is 15 cos(45) ~ 10.6 km wide; 5 km east is inside it
    assert_relative_eq!(hw.rjb, 0.0, epsilon = 1e-9);
    assert_relative_eq!(fw.rjb, 5.0, max_relative = 1e-3);

    // Above the plane, R_rup is the perpendicular distance 5 sin(45)
    assert_relative_eq!(hw.rrup, 5.0 * 45f64.to_radians().sin(), max_relative = 1e-3);
}

/// R_rup is never below R_JB.
#[test]
fn test_rrup_at_least_rjb() {
    let s = segment(30.0, 50.0, -90.0, 3.0);
    for (lat, lon) in [(35.3, -118.4), (34.6, -117.7), (35.0, -118.0), (35.6, -117.6)] {
        let d = s.distances_to(lat, lon);
        assert!(d.rrup >= d.rjb, "rrup {} < rjb {}", d.rrup, d.rjb);
        assert!(d.rjb >= 0.0);
    }
}

// ============================================================================
// Multi-segment Fault Tests
// ============================================================================

/// Representative parameters are area-weighted with the shallowest Ztor.
#[test]
fn test_representative_fault() {
    let mut a = segment(0.0, 60.0, 90.0, 2.0);
    let mut b = segment(0.0, 80.0, 0.0, 0.5);
    a.length = 30.0;
    b.length = 10.0;
    let fault = Fault::new(vec![a, b]).unwrap();
    let rep = fault.representative();

    assert_eq!(fault.len(), 2);
    assert_relative_eq!(rep.dip, (60.0 * 450.0 + 80.0 * 150.0) / 600.0, epsilon = 1e-12);
    assert_relative_eq!(rep.rake, 90.0 * 450.0 / 600.0, epsilon = 1e-12);
    assert_relative_eq!(rep.width, 15.0, epsilon = 1e-12);
    assert_relative_eq!(rep.ztor, 0.5, epsilon = 1e-12);
    assert_eq!(rep.style, FaultingStyle::Reverse);
}

/// Fault distances are the minima over segments.
#[test]
fn test_fault_distance_minima() {
    let a = segment(0.0, 90.0, 0.0, 0.0);
    let mut b = segment(0.0, 90.0, 0.0, 0.0);
    let (lat, lon) = destination(a.ulc_lat, a.ulc_lon, 90.0, 20.0);
    b.ulc_lat = lat;
    b.ulc_lon = lon;

    let fault = Fault::new(vec![a, b]).unwrap();
    let (site_lat, site_lon) = destination(a.ulc_lat, a.ulc_lon, 90.0, 15.0);
    let (site_lat, site_lon) = destination(site_lat, site_lon, 0.0, 10.0);

    let d = fault.distances_to(site_lat, site_lon);
    assert_relative_eq!(d.rjb, 5.0, max_relative = 1e-2);
    assert_relative_eq!(d.rrup, 5.0, max_relative = 1e-2);
    assert_eq!(fault.upper_right_corners().len(), 2);
}

// ============================================================================
// Faulting Style Tests
// ============================================================================

/// Rake ranges map to mechanisms.
#[test]
fn test_faulting_style_from_rake() {
    assert_eq!(FaultingStyle::from_rake(90.0), FaultingStyle::Reverse);
    assert_eq!(FaultingStyle::from_rake(-90.0), FaultingStyle::Normal);
    assert_eq!(FaultingStyle::from_rake(0.0), FaultingStyle::StrikeSlip);
    assert_eq!(FaultingStyle::from_rake(180.0), FaultingStyle::StrikeSlip);
    assert_eq!(FaultingStyle::from_rake(30.0), FaultingStyle::StrikeSlip);
    assert_eq!(FaultingStyle::from_rake(f64::NAN), FaultingStyle::Unspecified);
    assert_eq!(FaultingStyle::Reverse.f_rv(), 1.0);
    assert_eq!(FaultingStyle::Normal.f_nm(), 1.0);
}
