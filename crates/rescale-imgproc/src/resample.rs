use rescale_image::{Image, ImageAllocator, ImageError, ImageSize, PixelBuffer};

use crate::filter::{Contribution, ContributionTable, FilterKernel};

/// Resample `src` into `dst` with a separable filter.
///
/// The image is first resampled horizontally into an intermediate image of
/// `dst.width() x src.height()` pixels, then vertically into `dst`. Each pass
/// uses a [`ContributionTable`] built for its own axis, and every channel is
/// filtered independently. Values are clamped to `[0, 255]` after each pass.
///
/// The intermediate image is obtained from `dst`'s allocator and released
/// before returning.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, already sized to the target resolution.
/// * `kernel` - The filter kernel.
///
/// # Errors
///
/// Returns [`ImageError::ChannelMismatch`] if the images have different
/// channel counts, or an allocation error for the intermediate image.
///
/// # Example
///
/// ```
/// use rescale_image::{CpuAllocator, Image, ImageSize, ImageView, PixelBuffer};
/// use rescale_imgproc::filter::FilterKernel;
/// use rescale_imgproc::resample::resample_separable;
///
/// let data = vec![100u8; 4 * 4 * 3];
/// let src = ImageView::new(ImageSize { width: 4, height: 4 }, 3, &data).unwrap();
///
/// let mut dst = Image::from_allocator(ImageSize { width: 2, height: 2 }, 3, CpuAllocator).unwrap();
///
/// resample_separable(&src, &mut dst, &FilterKernel::Triangle).unwrap();
///
/// assert_eq!(dst.as_slice(), &[100u8; 2 * 2 * 3]);
/// ```
pub fn resample_separable<S, A>(
    src: &S,
    dst: &mut Image<A>,
    kernel: &FilterKernel,
) -> Result<(), ImageError>
where
    S: PixelBuffer + ?Sized,
    A: ImageAllocator,
{
    let channels = src.num_channels();
    if channels != dst.num_channels() {
        return Err(ImageError::ChannelMismatch(channels, dst.num_channels()));
    }

    let tmp_size = ImageSize {
        width: dst.width(),
        height: src.height(),
    };
    let mut tmp = Image::from_allocator(tmp_size, channels, dst.allocator().clone())?;

    log::debug!(
        "resampling {} -> {} with {} kernel, {} channels",
        src.size(),
        dst.size(),
        kernel,
        channels
    );

    let contrib_x = ContributionTable::new(src.width(), tmp.width(), kernel, channels);
    log::trace!(
        "horizontal pass: {} samples, up to {} contributors",
        contrib_x.len(),
        contrib_x.max_contributors()
    );
    horizontal_pass(src, &contrib_x, &mut tmp);
    drop(contrib_x);

    let contrib_y = ContributionTable::new(tmp.height(), dst.height(), kernel, channels);
    log::trace!(
        "vertical pass: {} samples, up to {} contributors",
        contrib_y.len(),
        contrib_y.max_contributors()
    );
    vertical_pass(&tmp, &contrib_y, dst);

    Ok(())
}

/// Weighted sum of the contributing pixels of a row or column, per channel.
fn accumulate(raster: &[u8], contribs: &[Contribution], pixel: &mut [f32]) {
    let channels = pixel.len();
    pixel.fill(0.0);
    for contrib in contribs {
        let src = &raster[contrib.pixel..contrib.pixel + channels];
        for (acc, &val) in pixel.iter_mut().zip(src) {
            *acc += val as f32 * contrib.weight;
        }
    }
}

fn horizontal_pass<S, A>(src: &S, contribs: &ContributionTable, tmp: &mut Image<A>)
where
    S: PixelBuffer + ?Sized,
    A: ImageAllocator,
{
    let mut pixel = vec![0.0f32; src.num_channels()];
    for y in 0..src.height() {
        let raster = src.read_row(y);
        for (x, row_contribs) in contribs.iter().enumerate() {
            accumulate(raster, row_contribs, &mut pixel);
            tmp.write_pixel(x, y, &pixel);
        }
    }
}

fn vertical_pass<A1, A2>(tmp: &Image<A1>, contribs: &ContributionTable, dst: &mut Image<A2>)
where
    A1: ImageAllocator,
    A2: ImageAllocator,
{
    let channels = tmp.num_channels();
    let mut pixel = vec![0.0f32; channels];
    let mut raster = vec![0u8; tmp.height() * channels];
    for x in 0..tmp.width() {
        tmp.read_column(x, &mut raster);
        for (y, col_contribs) in contribs.iter().enumerate() {
            accumulate(&raster, col_contribs, &mut pixel);
            dst.write_pixel(x, y, &pixel);
        }
    }
}
