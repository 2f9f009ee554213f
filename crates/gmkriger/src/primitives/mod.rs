//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive enumerations and the shared error type
//! used throughout the crate. It has zero internal dependencies within the
//! crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Intensity measures and correlation-model selections.
pub mod intensity;

/// Tectonic setting, region and faulting style.
pub mod seismic;
