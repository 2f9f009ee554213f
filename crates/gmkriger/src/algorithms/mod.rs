//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core numerical algorithms:
//! - Spatial correlation models
//! - Ordinary and simple Kriging
//! - Finite-fault geometry and source-to-site distances
//! - Ground-motion models
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Spatial correlation models.
pub mod correlation;

/// Kriging interpolation.
pub mod kriging;

/// Rupture geometry and distance metrics.
pub mod rupture;

/// Ground-motion models.
pub mod gmm;
