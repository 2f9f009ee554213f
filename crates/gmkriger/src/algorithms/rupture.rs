//! Finite-fault geometry and source-to-site distances.
//!
//! ## Purpose
//!
//! This module models a rupture as one or more planar rectangular segments
//! and computes the distance metrics used by ground-motion models: rupture
//! distance `R_rup`, Joyner-Boore distance `R_JB` and the strike-normal
//! coordinate `R_x`. It also derives the representative rupture parameters
//! and faulting style.
//!
//! ## Design notes
//!
//! * **Site-centred frames**: Each site gets its own tangent-plane
//!   projection, so projection error grows with rupture size rather than
//!   with the distance between sites.
//! * **Coordinates**: (east, north, down) in km; strike measured clockwise
//!   from north and dip to the right of strike.
//!
//! ## Key concepts
//!
//! * **Upper-left corner (ULC)**: Top-edge corner at the start of the strike.
//! * **Upper-right corner (URC)**: ULC moved along strike by the length.
//! * **Hanging wall**: Side of the top edge in the dip direction; `R_x > 0`.
//!
//! ## Invariants
//!
//! * `0 <= R_JB <= R_rup`.
//! * A site above the rupture surface projection has `R_JB = 0`.
//!
//! ## Non-goals
//!
//! * This module does not handle curved or listric fault surfaces.

// Internal dependencies
use crate::math::geodesy::{destination, LocalProjection};
use crate::primitives::errors::KrigerError;
use crate::primitives::seismic::FaultingStyle;

// ============================================================================
// Fault Segment
// ============================================================================

/// Rectangular rupture segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultSegment {
    /// Along-strike length in km.
    pub length: f64,

    /// Down-dip width in km.
    pub width: f64,

    /// Strike in degrees clockwise from north.
    pub strike: f64,

    /// Dip in degrees from horizontal, (0, 90].
    pub dip: f64,

    /// Rake in degrees.
    pub rake: f64,

    /// Upper-left corner latitude.
    pub ulc_lat: f64,

    /// Upper-left corner longitude.
    pub ulc_lon: f64,

    /// Depth to the top of the segment in km.
    pub ztor: f64,
}

impl FaultSegment {
    /// Check the segment's geometric domain.
    pub fn validate(&self) -> Result<(), KrigerError> {
        let fields = [
            ("length", self.length),
            ("width", self.width),
            ("strike", self.strike),
            ("dip", self.dip),
            ("rake", self.rake),
            ("ULC_lat", self.ulc_lat),
            ("ULC_lon", self.ulc_lon),
            ("Ztor", self.ztor),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(KrigerError::InvalidNumericValue(format!("{name}={value}")));
            }
        }
        if self.length <= 0.0 || self.width <= 0.0 {
            return Err(KrigerError::InvalidParameter(format!(
                "fault segment length={} width={} (must be > 0)",
                self.length, self.width
            )));
        }
        if self.dip <= 0.0 || self.dip > 90.0 {
            return Err(KrigerError::InvalidParameter(format!(
                "fault dip={} (must be in (0, 90])",
                self.dip
            )));
        }
        if self.ztor < 0.0 {
            return Err(KrigerError::InvalidParameter(format!(
                "fault Ztor={} (must be >= 0)",
                self.ztor
            )));
        }
        Ok(())
    }

    /// Upper-right corner (lat, lon).
    pub fn upper_right_corner(&self) -> (f64, f64) {
        destination(self.ulc_lat, self.ulc_lon, self.strike, self.length)
    }

    /// Rupture area in km².
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Distances from a surface site to this segment.
    pub fn distances_to(&self, site_lat: f64, site_lon: f64) -> SiteDistances {
        let projection = LocalProjection::new(site_lat, site_lon);
        let (e0, n0) = projection.project(self.ulc_lat, self.ulc_lon);

        let strike = self.strike.to_radians();
        let dip = self.dip.to_radians();

        // Unit vectors: along strike (horizontal) and horizontal dip direction
        let strike_h = (strike.sin(), strike.cos());
        let dip_h = (strike.cos(), -strike.sin());
        let (cos_dip, sin_dip) = (dip.cos(), dip.sin());

        // Site relative to the ULC, projected on the fault frame
        let rel = (-e0, -n0);
        let along = rel.0 * strike_h.0 + rel.1 * strike_h.1;
        let across = rel.0 * dip_h.0 + rel.1 * dip_h.1;

        // Joyner-Boore: surface projection is a rectangle L x (W cos(dip))
        let proj_width = self.width * cos_dip;
        let du = outside(along, self.length);
        let dv = outside(across, proj_width);
        let rjb = (du * du + dv * dv).sqrt();

        // Rupture distance: closest point on the inclined rectangle.
        // The site sits at depth 0, i.e. -ztor relative to the top edge.
        let down = -self.ztor;
        let dip_coord = across * cos_dip + down * sin_dip;
        let normal = -across * sin_dip + down * cos_dip;
        let dw = outside(dip_coord, self.width);
        let rrup = (du * du + dw * dw + normal * normal).sqrt();

        SiteDistances {
            rjb,
            rrup: rrup.max(rjb),
            rx: across,
        }
    }
}

/// Distance from `x` to the interval [0, upper].
#[inline]
fn outside(x: f64, upper: f64) -> f64 {
    if x < 0.0 {
        -x
    } else if x > upper {
        x - upper
    } else {
        0.0
    }
}

// ============================================================================
// Site Distances
// ============================================================================

/// Source-to-site distance metrics in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteDistances {
    /// Joyner-Boore distance.
    pub rjb: f64,

    /// Closest distance to the rupture plane.
    pub rrup: f64,

    /// Strike-normal horizontal coordinate, positive on the hanging wall.
    pub rx: f64,
}

// ============================================================================
// Representative Fault
// ============================================================================

/// Single-plane summary of a multi-segment rupture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepresentativeFault {
    /// Area-weighted rake.
    pub rake: f64,

    /// Area-weighted down-dip width.
    pub width: f64,

    /// Area-weighted dip.
    pub dip: f64,

    /// Shallowest depth to top of rupture.
    pub ztor: f64,

    /// Faulting style from the representative rake.
    pub style: FaultingStyle,
}

// ============================================================================
// Fault
// ============================================================================

/// Multi-segment finite rupture.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    /// Rupture segments.
    pub segments: Vec<FaultSegment>,
}

impl Fault {
    /// Create a validated fault from its segments.
    pub fn new(segments: Vec<FaultSegment>) -> Result<Self, KrigerError> {
        if segments.is_empty() {
            return Err(KrigerError::MalformedData(
                "fault has no segments".to_string(),
            ));
        }
        for segment in &segments {
            segment.validate()?;
        }
        Ok(Self { segments })
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the fault has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Upper-right corners of every segment.
    pub fn upper_right_corners(&self) -> Vec<(f64, f64)> {
        self.segments
            .iter()
            .map(FaultSegment::upper_right_corner)
            .collect()
    }

    /// Area-weighted representative rupture parameters.
    pub fn representative(&self) -> RepresentativeFault {
        let total_area: f64 = self.segments.iter().map(FaultSegment::area).sum();
        let weighted = |f: fn(&FaultSegment) -> f64| -> f64 {
            self.segments
                .iter()
                .map(|s| f(s) * s.area())
                .sum::<f64>()
                / total_area
        };

        let rake = weighted(|s| s.rake);
        let ztor = self
            .segments
            .iter()
            .map(|s| s.ztor)
            .fold(f64::INFINITY, f64::min);

        RepresentativeFault {
            rake,
            width: weighted(|s| s.width),
            dip: weighted(|s| s.dip),
            ztor,
            style: FaultingStyle::from_rake(rake),
        }
    }

    /// Distances from a surface site to the rupture.
    ///
    /// `R_rup` and `R_JB` are minima over segments; `R_x` is taken from the
    /// segment closest in `R_rup`.
    pub fn distances_to(&self, site_lat: f64, site_lon: f64) -> SiteDistances {
        let mut best: Option<SiteDistances> = None;
        let mut rjb_min = f64::INFINITY;

        for segment in &self.segments {
            let d = segment.distances_to(site_lat, site_lon);
            rjb_min = rjb_min.min(d.rjb);
            if best.map_or(true, |b| d.rrup < b.rrup) {
                best = Some(d);
            }
        }

        match best {
            Some(b) => SiteDistances {
                rjb: rjb_min,
                rrup: b.rrup,
                rx: b.rx,
            },
            None => SiteDistances {
                rjb: f64::INFINITY,
                rrup: f64::INFINITY,
                rx: 0.0,
            },
        }
    }
}
