#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// filter kernels and contribution tables.
pub mod filter;

/// module containing parallelization utilities.
pub mod parallel;

/// the two-pass separable resampler.
pub mod resample;

/// utility functions for resizing images.
pub mod resize;
