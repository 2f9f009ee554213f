//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer post-processes algorithm outputs:
//! - Reduction of Kriging realizations to mean and sigma
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Realization ensemble statistics.
pub mod ensemble;
