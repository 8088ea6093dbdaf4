//! Filtered two-pass image rescaling.
//!
//! ```
//! use rescale::imgproc::resize::resize;
//!
//! let src = vec![0u8; 64 * 48 * 4];
//! let dst = resize(&src, 64, 48, 4, 32, 24).unwrap();
//!
//! assert_eq!(dst.len(), 32 * 24 * 4);
//! ```

#[doc(inline)]
pub use rescale_image as image;

#[doc(inline)]
pub use rescale_imgproc as imgproc;
