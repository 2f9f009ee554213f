//! Tests for the math layer: geodesy and linear algebra.
//!
//! ## Test Organization
//!
//! 1. **Geodesy** - Distances, azimuths, destination points, projection
//! 2. **Linear Algebra** - LU solve and singular detection

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};

use gmkriger::internals::math::geodesy::{
    angular_separation, azimuth_deg, destination, haversine_km, LocalProjection,
};
use gmkriger::internals::math::linalg::Factorization;
use gmkriger::internals::primitives::errors::KrigerError;

// ============================================================================
// Geodesy Tests
// ============================================================================

/// One degree of latitude is about 111.19 km on a 6371 km sphere.
#[test]
fn test_haversine_one_degree_latitude() {
    let d = haversine_km(35.0, -118.0, 36.0, -118.0);
    assert_relative_eq!(d, 111.195, epsilon = 1e-3);
}

/// Distance is zero for coincident points and symmetric otherwise.
#[test]
fn test_haversine_symmetry() {
    assert_eq!(haversine_km(10.0, 20.0, 10.0, 20.0), 0.0);

    let ab = haversine_km(34.0, -117.0, 35.5, -119.2);
    let ba = haversine_km(35.5, -119.2, 34.0, -117.0);
    assert_relative_eq!(ab, ba, epsilon = 1e-9);
}

/// Cardinal azimuths from a point on the equator.
#[test]
fn test_azimuth_cardinal_directions() {
    assert_relative_eq!(azimuth_deg(0.0, 0.0, 1.0, 0.0), 0.0, epsilon = 1e-9);
    assert_relative_eq!(azimuth_deg(0.0, 0.0, 0.0, 1.0), 90.0, epsilon = 1e-9);
    assert_relative_eq!(azimuth_deg(0.0, 0.0, -1.0, 0.0), 180.0, epsilon = 1e-9);
    assert_relative_eq!(azimuth_deg(0.0, 0.0, 0.0, -1.0), 270.0, epsilon = 1e-9);
}

/// Coincident points have azimuth zero.
#[test]
fn test_azimuth_coincident_is_zero() {
    assert_eq!(azimuth_deg(35.0, -118.0, 35.0, -118.0), 0.0);
}

/// Travelling to a destination and measuring back recovers distance and bearing.
#[test]
fn test_destination_round_trip() {
    let (lat, lon) = destination(35.0, -118.0, 45.0, 50.0);

    assert_relative_eq!(haversine_km(35.0, -118.0, lat, lon), 50.0, epsilon = 1e-6);
    assert_relative_eq!(azimuth_deg(35.0, -118.0, lat, lon), 45.0, epsilon = 1e-6);
}

/// Angular separation wraps around 360 degrees.
#[test]
fn test_angular_separation_wraps() {
    assert_relative_eq!(angular_separation(10.0, 350.0), 20.0, epsilon = 1e-10);
    assert_relative_eq!(angular_separation(0.0, 180.0), 180.0, epsilon = 1e-10);
    assert_relative_eq!(angular_separation(90.0, 90.0), 0.0, epsilon = 1e-10);
}

/// Local projection agrees with great-circle distance at short range.
#[test]
fn test_local_projection_short_range() {
    let projection = LocalProjection::new(35.0, -118.0);
    let (east, north) = projection.project(35.1, -117.9);
    let planar = (east * east + north * north).sqrt();

    assert!(east > 0.0 && north > 0.0);
    assert_relative_eq!(
        planar,
        haversine_km(35.0, -118.0, 35.1, -117.9),
        max_relative = 1e-3
    );
}

// ============================================================================
// Linear Algebra Tests
// ============================================================================

/// Known 3x3 system requiring a row exchange.
#[test]
fn test_solve_known_system() {
    let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
    let lu = Factorization::new(a).unwrap();
    let x = lu.solve(&DVector::from_vec(vec![7.0, 6.0, 13.0])).unwrap();

    assert_relative_eq!(x[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(x[1], 2.0, epsilon = 1e-10);
    assert_relative_eq!(x[2], 3.0, epsilon = 1e-10);
}

/// A factorization solves several right-hand sides.
#[test]
fn test_factorization_reuse() {
    let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
    let lu = Factorization::new(a.clone()).unwrap();
    assert_eq!(lu.order(), 2);

    for b in [[1.0, 2.0], [0.0, 1.0], [-3.0, 7.5]] {
        let b = DVector::from_column_slice(&b);
        let back = &a * lu.solve(&b).unwrap();
        assert_relative_eq!(back[0], b[0], epsilon = 1e-10);
        assert_relative_eq!(back[1], b[1], epsilon = 1e-10);
    }
}

/// Linearly dependent rows are reported as a singular system.
#[test]
fn test_singular_matrix_errors() {
    let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    match Factorization::new(a) {
        Err(KrigerError::SingularSystem { order, pivot }) => {
            assert_eq!(order, 2);
            assert_eq!(pivot, 1);
        }
        other => panic!("expected SingularSystem, got {other:?}"),
    }
}

/// Pivots that vanish only up to round-off are still singular.
#[test]
fn test_near_singular_matrix_errors() {
    let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0 + f64::EPSILON]);
    assert!(matches!(
        Factorization::new(a),
        Err(KrigerError::SingularSystem { .. })
    ));
}
