//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates an estimation by coordinating the catalogue,
//! target sites, Kriging algorithms and ground-motion models. It validates
//! inputs and assembles the tabular result.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Earthquake catalogue reader.
pub mod catalog;

/// Execution engine for Kriged estimates.
pub mod executor;

/// Output types for Kriged estimates.
pub mod output;

/// Target sites and soil conditions.
pub mod site;

/// Validation utilities.
pub mod validator;
