use rescale_image::{
    CpuAllocator, Image, ImageAllocator, ImageError, ImageLayout, ImageSize, ImageView,
};

use crate::filter::FilterKernel;
use crate::resample::resample_separable;

/// Resize a tightly packed image buffer with the bell filter.
///
/// The source buffer is read in place; the returned buffer holds
/// `new_width * new_height * channels` bytes with the same channel layout.
///
/// # Arguments
///
/// * `src` - The source pixels, row-major, `width * height * channels` bytes.
/// * `width` - The source width in pixels.
/// * `height` - The source height in pixels.
/// * `channels` - The number of bytes per pixel.
/// * `new_width` - The target width in pixels.
/// * `new_height` - The target height in pixels.
///
/// # Errors
///
/// Returns [`ImageError::InvalidDimensions`] if any size or the channel count
/// is zero, [`ImageError::InvalidChannelShape`] if `src` is too short, and
/// [`ImageError::AllocationFailure`] if the buffers cannot be allocated.
/// Nothing is allocated when validation fails.
///
/// # Example
///
/// ```
/// use rescale_imgproc::resize::resize;
///
/// let src = vec![128u8; 8 * 6 * 3];
/// let dst = resize(&src, 8, 6, 3, 4, 3).unwrap();
///
/// assert_eq!(dst.len(), 4 * 3 * 3);
/// ```
pub fn resize(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    new_width: usize,
    new_height: usize,
) -> Result<Vec<u8>, ImageError> {
    resize_with_filter(
        src,
        ImageSize { width, height },
        channels,
        ImageSize {
            width: new_width,
            height: new_height,
        },
        FilterKernel::Bell,
    )
}

/// Resize a tightly packed image buffer with the given filter kernel.
///
/// # Arguments
///
/// * `src` - The source pixels, row-major, `width * height * channels` bytes.
/// * `size` - The source size in pixels.
/// * `channels` - The number of bytes per pixel.
/// * `new_size` - The target size in pixels.
/// * `kernel` - The filter kernel.
///
/// # Errors
///
/// See [`resize`].
pub fn resize_with_filter(
    src: &[u8],
    size: ImageSize,
    channels: usize,
    new_size: ImageSize,
    kernel: FilterKernel,
) -> Result<Vec<u8>, ImageError> {
    resize_with_allocator(src, size, channels, new_size, kernel, CpuAllocator)
}

/// Resize a tightly packed image buffer, taking the destination and
/// intermediate buffers from `alloc`.
///
/// All arguments are validated before the allocator is called.
///
/// # Errors
///
/// See [`resize`].
pub fn resize_with_allocator<A: ImageAllocator>(
    src: &[u8],
    size: ImageSize,
    channels: usize,
    new_size: ImageSize,
    kernel: FilterKernel,
    alloc: A,
) -> Result<Vec<u8>, ImageError> {
    let src = ImageView::new(size, channels, src)?;
    ImageLayout::new(new_size, channels)?;

    let mut dst = Image::from_allocator(new_size, channels, alloc)?;
    resample_separable(&src, &mut dst, &kernel)?;

    Ok(dst.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescale_image::PixelBuffer;

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let src = vec![0u8; 4 * 5 * 3];
        let dst = resize(&src, 4, 5, 3, 2, 3)?;
        assert_eq!(dst.len(), 2 * 3 * 3);
        assert!(dst.iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn resize_smoke_ch1() -> Result<(), ImageError> {
        let src = vec![255u8; 4 * 5];
        let dst = resize(&src, 4, 5, 1, 9, 7)?;
        assert_eq!(dst.len(), 9 * 7);
        Ok(())
    }

    #[test]
    fn resize_many_channels() -> Result<(), ImageError> {
        // channel count is not limited to 4
        let channels = 6;
        let src: Vec<u8> = (0..3 * 3 * channels).map(|i| (i % channels) as u8 * 40).collect();
        let dst = resize(&src, 3, 3, channels, 5, 6)?;
        let view = ImageView::new([5, 6].into(), channels, &dst)?;
        for y in 0..view.height() {
            for px in view.read_row(y).chunks_exact(channels) {
                for (ch, &v) in px.iter().enumerate() {
                    assert!((v as i32 - ch as i32 * 40).abs() <= 2);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn resize_invalid_dimensions() {
        let src = vec![0u8; 4 * 4];
        assert_eq!(
            resize(&src, 4, 4, 1, 0, 2),
            Err(ImageError::InvalidDimensions(0, 2, 1))
        );
        assert_eq!(
            resize(&src, 4, 0, 1, 2, 2),
            Err(ImageError::InvalidDimensions(4, 0, 1))
        );
        assert_eq!(
            resize(&src, 4, 4, 0, 2, 2),
            Err(ImageError::InvalidDimensions(4, 4, 0))
        );
    }

    #[test]
    fn resize_short_buffer() {
        let src = vec![0u8; 10];
        assert_eq!(
            resize(&src, 4, 4, 1, 2, 2),
            Err(ImageError::InvalidChannelShape(10, 16))
        );
    }
}
