#![deny(missing_docs)]
//! Image types and traits for reading and writing byte-per-channel rasters

/// Memory providers for image buffers.
pub mod allocator;

/// Error types for the image module.
pub mod error;

/// image representation for resampling purposes.
pub mod image;

pub use crate::allocator::{CpuAllocator, ImageAllocator};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageLayout, ImageSize, ImageView, PixelBuffer};
