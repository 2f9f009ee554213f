//! Tests for seismotectonic classifications.
//!
//! ## Test Organization
//!
//! 1. **Region** - Name parsing and per-event overrides
//! 2. **Tectonic Setting** - Name parsing and indicator flags
//! 3. **Faulting Style** - Indicator flags and codes

use gmkriger::internals::primitives::seismic::{FaultingStyle, Region, Tectonic};

// ============================================================================
// Region Tests
// ============================================================================

/// Region names parse case-insensitively; unknown names are global.
#[test]
fn test_region_parse() {
    assert_eq!(Region::parse("turkey"), Region::Turkey);
    assert_eq!(Region::parse("JAPAN"), Region::Japan);
    assert_eq!(Region::parse(" California "), Region::California);
    assert_eq!(Region::parse("Anatolia"), Region::Global);
    assert_eq!(Region::parse(""), Region::Global);
    assert_eq!(Region::default(), Region::Global);
}

/// The 2023 Turkey sequence is treated as global regardless of its catalogue region.
#[test]
fn test_region_event_override() {
    assert_eq!(Region::for_event("2023 M7.8 Pazarcik", "turkey"), Region::Global);
    assert_eq!(Region::for_event("2023 M6.3 Yayladagi", "Turkey"), Region::Global);
    assert_eq!(Region::for_event("1999 M7.6 Kocaeli", "turkey"), Region::Turkey);
    assert_eq!(Region::for_event("1994 M6.7 Northridge", "california"), Region::California);
}

/// Names round-trip through `Display`.
#[test]
fn test_region_names() {
    for region in [Region::California, Region::Taiwan, Region::Global] {
        assert_eq!(Region::parse(&region.to_string()), region);
    }
}

// ============================================================================
// Tectonic Setting Tests
// ============================================================================

/// Tectonic settings parse case-insensitively; unknown names are other.
#[test]
fn test_tectonic_parse() {
    assert_eq!(Tectonic::parse("Crustal"), Tectonic::Crustal);
    assert_eq!(Tectonic::parse("INTERFACE"), Tectonic::Interface);
    assert_eq!(Tectonic::parse(" intraslab"), Tectonic::Intraslab);
    assert_eq!(Tectonic::parse("stable"), Tectonic::Other);
    assert_eq!(Tectonic::Intraslab.to_string(), "intraslab");
}

/// Interface and intraslab indicators are exclusive.
#[test]
fn test_tectonic_flags() {
    assert_eq!(Tectonic::Interface.f_int(), 1.0);
    assert_eq!(Tectonic::Interface.f_ins(), 0.0);
    assert_eq!(Tectonic::Intraslab.f_ins(), 1.0);
    assert_eq!(Tectonic::Intraslab.f_int(), 0.0);

    for tectonic in [Tectonic::Crustal, Tectonic::Other] {
        assert_eq!(tectonic.f_int(), 0.0);
        assert_eq!(tectonic.f_ins(), 0.0);
    }
}

// ============================================================================
// Faulting Style Tests
// ============================================================================

/// Normal and reverse indicators are exclusive.
#[test]
fn test_faulting_flags() {
    assert_eq!(FaultingStyle::Normal.f_nm(), 1.0);
    assert_eq!(FaultingStyle::Normal.f_rv(), 0.0);
    assert_eq!(FaultingStyle::Reverse.f_rv(), 1.0);
    assert_eq!(FaultingStyle::Reverse.f_nm(), 0.0);
    assert_eq!(FaultingStyle::StrikeSlip.f_nm() + FaultingStyle::StrikeSlip.f_rv(), 0.0);
    assert_eq!(FaultingStyle::Unspecified.to_string(), "U");
}
