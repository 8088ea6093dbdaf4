//! Filter kernels and per-axis contribution tables
//!
//! This module provides the weighting functions used by the resampler and
//! the precomputed source-to-destination weights built from them.

/// Filter kernels
pub mod kernels;
pub use kernels::FilterKernel;

/// Contribution tables
mod contrib;
pub use contrib::*;
