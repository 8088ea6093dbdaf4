use rayon::prelude::*;
use thiserror::Error;

use rescale_image::{CpuAllocator, Image, ImageError, ImageSize, ImageView, PixelBuffer};

use crate::filter::FilterKernel;
use crate::resample::resample_separable;

/// Errors that can occur during batch execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// One of the images failed to resize.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Controls how a batch of independent images is processed.
///
/// A single image is always resampled on one thread; the strategy only
/// decides how images of a batch are spread over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool, one task per image.
    #[default]
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small batches, debugging, or when the caller already runs
    /// on a worker thread.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Resize a batch of images to the same size.
///
/// Every image is resampled independently with its own contribution tables
/// and intermediate buffer, so images may be processed concurrently.
///
/// # Arguments
///
/// * `images` - The source images; channel counts may differ between images.
/// * `new_size` - The target size for every image.
/// * `kernel` - The filter kernel.
/// * `strategy` - How images are distributed over threads.
///
/// # Returns
///
/// The resized images, in the order of `images`.
///
/// # Errors
///
/// Fails on an invalid thread count, if the thread pool cannot be built, or
/// with the first image error encountered. No partial batch is returned.
///
/// # Example
///
/// ```
/// use rescale_image::{ImageSize, ImageView, PixelBuffer};
/// use rescale_imgproc::filter::FilterKernel;
/// use rescale_imgproc::parallel::{resize_batch, ExecutionStrategy};
///
/// let a = vec![10u8; 8 * 8];
/// let b = vec![20u8; 4 * 6 * 3];
/// let images = [
///     ImageView::new(ImageSize { width: 8, height: 8 }, 1, &a).unwrap(),
///     ImageView::new(ImageSize { width: 4, height: 6 }, 3, &b).unwrap(),
/// ];
///
/// let resized = resize_batch(
///     &images,
///     ImageSize { width: 2, height: 2 },
///     FilterKernel::Triangle,
///     ExecutionStrategy::Parallel,
/// )
/// .unwrap();
///
/// assert_eq!(resized.len(), 2);
/// assert_eq!(resized[1].num_channels(), 3);
/// ```
pub fn resize_batch(
    images: &[ImageView<'_>],
    new_size: ImageSize,
    kernel: FilterKernel,
    strategy: ExecutionStrategy,
) -> Result<Vec<Image>, ParallelError> {
    log::debug!(
        "resizing {} images to {} with {:?} strategy",
        images.len(),
        new_size,
        strategy
    );

    let resize_one = |src: &ImageView<'_>| -> Result<Image, ImageError> {
        let mut dst = Image::from_allocator(new_size, src.num_channels(), CpuAllocator)?;
        resample_separable(src, &mut dst, &kernel)?;
        Ok(dst)
    };

    let resized = match strategy {
        ExecutionStrategy::Serial => images
            .iter()
            .map(resize_one)
            .collect::<Result<Vec<_>, _>>(),
        ExecutionStrategy::Parallel => images
            .par_iter()
            .map(resize_one)
            .collect::<Result<Vec<_>, _>>(),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                images
                    .par_iter()
                    .map(resize_one)
                    .collect::<Result<Vec<_>, _>>()
            })
        }
    };

    Ok(resized?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        (0..width * height).map(|i| (i * 7 % 256) as u8).collect()
    }

    #[test]
    fn test_batch_strategies_agree() -> Result<(), ParallelError> {
        let a = gradient(16, 12);
        let b = gradient(9, 9);
        let images = [
            ImageView::new([16, 12].into(), 1, &a)?,
            ImageView::new([9, 9].into(), 1, &b)?,
        ];
        let new_size = ImageSize {
            width: 5,
            height: 7,
        };

        let kernel = FilterKernel::Mitchell;
        let serial = resize_batch(&images, new_size, kernel, ExecutionStrategy::Serial)?;
        let parallel = resize_batch(&images, new_size, kernel, ExecutionStrategy::Parallel)?;
        let fixed = resize_batch(&images, new_size, kernel, ExecutionStrategy::Fixed(2))?;

        for ((s, p), f) in serial.iter().zip(&parallel).zip(&fixed) {
            assert_eq!(s.size(), new_size);
            assert_eq!(s.as_slice(), p.as_slice());
            assert_eq!(s.as_slice(), f.as_slice());
        }
        Ok(())
    }

    #[test]
    fn test_batch_fixed_error() -> Result<(), ParallelError> {
        let a = gradient(4, 4);
        let images = [ImageView::new([4, 4].into(), 1, &a)?];
        let res = resize_batch(
            &images,
            [2, 2].into(),
            FilterKernel::Bell,
            ExecutionStrategy::Fixed(0),
        );
        assert_eq!(res.err(), Some(ParallelError::InvalidThreadCount(0)));
        Ok(())
    }

    #[test]
    fn test_batch_invalid_size() -> Result<(), ParallelError> {
        let a = gradient(4, 4);
        let images = [ImageView::new([4, 4].into(), 1, &a)?];
        let res = resize_batch(
            &images,
            [0, 2].into(),
            FilterKernel::Bell,
            ExecutionStrategy::Serial,
        );
        assert_eq!(
            res.err(),
            Some(ParallelError::Image(ImageError::InvalidDimensions(0, 2, 1)))
        );
        Ok(())
    }
}
