//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Spherical geodesy (distances, azimuths, projections)
//! - Checked LU solves for Kriging systems
//!
//! These are reusable building blocks with no seismology-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Great-circle distances, azimuths and local projections.
pub mod geodesy;

/// LU factorization with singularity checks.
pub mod linalg;
