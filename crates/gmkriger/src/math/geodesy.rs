//! Spherical-Earth geodesy.
//!
//! ## Purpose
//!
//! This module provides the great-circle distances, azimuths and local
//! projections needed by the correlation model and the rupture-distance
//! calculations.
//!
//! ## Design notes
//!
//! * **Spherical**: Mean Earth radius of 6371 km; errors against an ellipsoid
//!   are well below the resolution of the correlation models.
//! * **Degrees in, kilometres out**: Angles at the API boundary are degrees.
//!
//! ## Invariants
//!
//! * Distances are non-negative and symmetric.
//! * Azimuths are in [0, 360).
//! * Angular separations are in [0, 180].
//!
//! ## Non-goals
//!
//! * This module does not model the ellipsoid or geoid.

// External dependencies
use num_traits::Float;

// ============================================================================
// Constants
// ============================================================================

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ============================================================================
// Great-Circle Functions
// ============================================================================

/// Great-circle distance in km between two points given in degrees.
pub fn haversine_km<T: Float>(lat1: T, lon1: T, lat2: T, lon2: T) -> T {
    let two = T::from(2.0).unwrap();
    let radius = T::from(EARTH_RADIUS_KM).unwrap();

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / two).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / two).sin().powi(2);
    let a = a.min(T::one()).max(T::zero());

    two * radius * a.sqrt().asin()
}

/// Initial great-circle azimuth in degrees from point 1 to point 2.
///
/// Returns 0 when the points coincide.
pub fn azimuth_deg<T: Float>(lat1: T, lon1: T, lat2: T, lon2: T) -> T {
    if lat1 == lat2 && lon1 == lon2 {
        return T::zero();
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();

    normalize_azimuth(y.atan2(x).to_degrees())
}

/// Destination point (lat, lon in degrees) after travelling `distance_km`
/// from a start point along an initial azimuth.
pub fn destination<T: Float>(lat: T, lon: T, azimuth: T, distance_km: T) -> (T, T) {
    let radius = T::from(EARTH_RADIUS_KM).unwrap();
    let delta = distance_km / radius;
    let theta = azimuth.to_radians();
    let phi1 = lat.to_radians();
    let lambda1 = lon.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.min(T::one()).max(-T::one()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    (phi2.to_degrees(), normalize_longitude(lambda2.to_degrees()))
}

/// Smallest angle in degrees between two azimuths.
pub fn angular_separation<T: Float>(az1: T, az2: T) -> T {
    let full = T::from(360.0).unwrap();
    let diff = (az1 - az2).abs() % full;
    diff.min(full - diff)
}

// ============================================================================
// Local Projection
// ============================================================================

/// Equirectangular tangent-plane projection about an origin.
///
/// Maps (lat, lon) in degrees to (east, north) in km. Accurate to a fraction
/// of a percent within a few hundred kilometres of the origin, which covers
/// rupture-to-site distances of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    /// Origin latitude in degrees.
    pub lat0: f64,

    /// Origin longitude in degrees.
    pub lon0: f64,

    /// Kilometres per degree of longitude at the origin latitude.
    km_per_deg_lon: f64,
}

impl LocalProjection {
    /// Kilometres per degree of latitude.
    const KM_PER_DEG_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

    /// Create a projection centred on the given origin.
    pub fn new(lat0: f64, lon0: f64) -> Self {
        Self {
            lat0,
            lon0,
            km_per_deg_lon: Self::KM_PER_DEG_LAT * lat0.to_radians().cos(),
        }
    }

    /// Project a point to (east, north) km.
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlon = normalize_longitude(lon - self.lon0);
        (
            dlon * self.km_per_deg_lon,
            (lat - self.lat0) * Self::KM_PER_DEG_LAT,
        )
    }
}

// ============================================================================
// Normalization Helpers
// ============================================================================

/// Wrap an azimuth into [0, 360).
fn normalize_azimuth<T: Float>(az: T) -> T {
    let full = T::from(360.0).unwrap();
    let wrapped = az % full;
    if wrapped < T::zero() {
        wrapped + full
    } else {
        wrapped
    }
}

/// Wrap a longitude into [-180, 180).
fn normalize_longitude<T: Float>(lon: T) -> T {
    let half = T::from(180.0).unwrap();
    let full = T::from(360.0).unwrap();
    let shifted = (lon + half) % full;
    let shifted = if shifted < T::zero() {
        shifted + full
    } else {
        shifted
    };
    shifted - half
}
