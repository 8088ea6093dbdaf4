use crate::allocator::{CpuAllocator, ImageAllocator};
use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use rescale_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Memory layout of a byte-per-channel raster.
///
/// Pixels are stored row-major with `channels` interleaved bytes per pixel.
/// Consecutive scanlines start `row_stride` bytes apart, which may be larger
/// than `width * channels` when rows are padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageLayout {
    size: ImageSize,
    channels: usize,
    row_stride: usize,
}

impl ImageLayout {
    /// Create a tightly packed layout, i.e. `row_stride == width * channels`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] if any dimension is zero or the
    /// total byte size does not fit in `usize`.
    pub fn new(size: ImageSize, channels: usize) -> Result<Self, ImageError> {
        let row_len = Self::checked_row_len(size, channels)?;
        Self::with_stride(size, channels, row_len)
    }

    /// Create a layout with an explicit row stride in bytes.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of bytes per pixel.
    /// * `row_stride` - The byte offset between two consecutive scanlines.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] for zero or overflowing
    /// dimensions and [`ImageError::InvalidRowStride`] if the stride is shorter
    /// than one row of pixels.
    pub fn with_stride(
        size: ImageSize,
        channels: usize,
        row_stride: usize,
    ) -> Result<Self, ImageError> {
        let row_len = Self::checked_row_len(size, channels)?;
        if row_stride < row_len {
            return Err(ImageError::InvalidRowStride(row_stride, row_len));
        }
        if row_stride.checked_mul(size.height).is_none() {
            return Err(ImageError::InvalidDimensions(
                size.width,
                size.height,
                channels,
            ));
        }
        Ok(Self {
            size,
            channels,
            row_stride,
        })
    }

    fn checked_row_len(size: ImageSize, channels: usize) -> Result<usize, ImageError> {
        let invalid = ImageError::InvalidDimensions(size.width, size.height, channels);
        if size.width == 0 || size.height == 0 || channels == 0 {
            return Err(invalid);
        }
        size.width.checked_mul(channels).ok_or(invalid)
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The number of bytes per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The byte offset between two consecutive scanlines.
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// The number of pixel bytes in one scanline, excluding padding.
    pub fn row_len(&self) -> usize {
        self.size.width * self.channels
    }

    /// The minimum buffer length able to hold the image.
    pub fn num_bytes(&self) -> usize {
        self.row_stride * self.size.height
    }

    /// Byte offset of the first channel of pixel `(x, y)`.
    pub fn pixel_offset(&self, x: usize, y: usize) -> usize {
        y * self.row_stride + x * self.channels
    }

    fn check_buffer(&self, len: usize) -> Result<(), ImageError> {
        if len < self.num_bytes() {
            return Err(ImageError::InvalidChannelShape(len, self.num_bytes()));
        }
        Ok(())
    }
}

/// Read access to the pixels of an image.
///
/// Implemented by the borrowed [`ImageView`] and the owned [`Image`], so the
/// resampling passes can read either one.
pub trait PixelBuffer {
    /// The memory layout of the image.
    fn layout(&self) -> &ImageLayout;

    /// The raw bytes of the image, including any row padding.
    fn as_slice(&self) -> &[u8];

    /// Get the size of the image in pixels.
    fn size(&self) -> ImageSize {
        self.layout().size()
    }

    /// Get the width of the image in pixels.
    fn width(&self) -> usize {
        self.layout().width()
    }

    /// Get the height of the image in pixels.
    fn height(&self) -> usize {
        self.layout().height()
    }

    /// Get the number of channels (bytes per pixel) in the image.
    fn num_channels(&self) -> usize {
        self.layout().channels()
    }

    /// Read one scanline.
    ///
    /// # Arguments
    ///
    /// * `y` - The row index, `0 <= y < height`.
    ///
    /// # Returns
    ///
    /// The `width * channels` bytes of row `y`, without padding.
    fn read_row(&self, y: usize) -> &[u8] {
        let layout = self.layout();
        debug_assert!(y < layout.height(), "row {y} out of bounds");
        let start = y * layout.row_stride();
        &self.as_slice()[start..start + layout.row_len()]
    }

    /// Gather one column of pixels into `column`.
    ///
    /// # Arguments
    ///
    /// * `x` - The column index, `0 <= x < width`.
    /// * `column` - Output buffer of `height * channels` bytes.
    fn read_column(&self, x: usize, column: &mut [u8]) {
        let layout = self.layout();
        let channels = layout.channels();
        debug_assert!(x < layout.width(), "column {x} out of bounds");
        debug_assert_eq!(column.len(), layout.height() * channels);

        let data = self.as_slice();
        for (y, pixel) in column.chunks_exact_mut(channels).enumerate() {
            let offset = layout.pixel_offset(x, y);
            pixel.copy_from_slice(&data[offset..offset + channels]);
        }
    }
}

/// A read-only image aliasing memory owned by the caller.
///
/// Dropping the view never releases the underlying buffer.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    layout: ImageLayout,
    data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Wrap a tightly packed buffer without copying it.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of bytes per pixel.
    /// * `data` - The pixel data, at least `width * height * channels` bytes.
    ///
    /// # Errors
    ///
    /// If the dimensions are invalid or the buffer is too short, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rescale_image::{ImageSize, ImageView, PixelBuffer};
    ///
    /// let data = vec![0u8; 4 * 2 * 3];
    /// let view = ImageView::new(ImageSize { width: 4, height: 2 }, 3, &data).unwrap();
    ///
    /// assert_eq!(view.read_row(1).len(), 12);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        Self::from_layout(ImageLayout::new(size, channels)?, data)
    }

    /// Wrap a buffer whose rows are `row_stride` bytes apart.
    ///
    /// # Errors
    ///
    /// If the layout is invalid or the buffer is too short, an error is returned.
    pub fn with_stride(
        size: ImageSize,
        channels: usize,
        row_stride: usize,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        Self::from_layout(ImageLayout::with_stride(size, channels, row_stride)?, data)
    }

    /// Wrap a buffer described by an existing layout.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidChannelShape`] if the buffer is too short.
    pub fn from_layout(layout: ImageLayout, data: &'a [u8]) -> Result<Self, ImageError> {
        layout.check_buffer(data.len())?;
        Ok(Self { layout, data })
    }
}

impl PixelBuffer for ImageView<'_> {
    fn layout(&self) -> &ImageLayout {
        &self.layout
    }

    fn as_slice(&self) -> &[u8] {
        self.data
    }
}

/// An image owning its pixel buffer.
///
/// The buffer is obtained from an [`ImageAllocator`] and released on drop,
/// unless handed out with [`Image::into_vec`].
#[derive(Clone, Debug)]
pub struct Image<A: ImageAllocator = CpuAllocator> {
    layout: ImageLayout,
    data: Vec<u8>,
    alloc: A,
}

impl<A: ImageAllocator> Image<A> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of bytes per pixel.
    /// * `data` - The pixel data of the image, exactly `width * height * channels` bytes.
    /// * `alloc` - The allocator used for images derived from this one.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rescale_image::{CpuAllocator, Image, ImageSize, PixelBuffer};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0u8; 10 * 20 * 3],
    ///     CpuAllocator,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(
        size: ImageSize,
        channels: usize,
        data: Vec<u8>,
        alloc: A,
    ) -> Result<Self, ImageError> {
        let layout = ImageLayout::new(size, channels)?;
        if data.len() != layout.num_bytes() {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                layout.num_bytes(),
            ));
        }
        Ok(Self {
            layout,
            data,
            alloc,
        })
    }

    /// Allocate a tightly packed image whose content is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] for an invalid size and
    /// [`ImageError::AllocationFailure`] if the allocator fails.
    pub fn from_allocator(size: ImageSize, channels: usize, alloc: A) -> Result<Self, ImageError> {
        let layout = ImageLayout::new(size, channels)?;
        let data = alloc.alloc(layout.num_bytes())?;
        Ok(Self {
            layout,
            data,
            alloc,
        })
    }

    /// Create a new image with every byte set to `val`.
    ///
    /// # Errors
    ///
    /// Same as [`Image::from_allocator`].
    pub fn from_size_val(
        size: ImageSize,
        channels: usize,
        val: u8,
        alloc: A,
    ) -> Result<Self, ImageError> {
        let mut image = Self::from_allocator(size, channels, alloc)?;
        image.data.fill(val);
        Ok(image)
    }

    /// The allocator that provided this image's buffer.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Mutable access to the raw pixel bytes.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow the image as an [`ImageView`].
    pub fn as_view(&self) -> ImageView<'_> {
        ImageView {
            layout: self.layout,
            data: &self.data,
        }
    }

    /// Hand the pixel buffer over to the caller.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Clamp and store one pixel.
    ///
    /// Each value is clamped to `[0, 255]` and truncated to a byte, so filter
    /// overshoot saturates instead of wrapping around.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `values` - One value per channel.
    pub fn write_pixel(&mut self, x: usize, y: usize, values: &[f32]) {
        let channels = self.layout.channels();
        debug_assert!(x < self.layout.width() && y < self.layout.height());
        debug_assert_eq!(values.len(), channels);

        let offset = self.layout.pixel_offset(x, y);
        for (dst, &val) in self.data[offset..offset + channels].iter_mut().zip(values) {
            *dst = val.clamp(0.0, 255.0) as u8;
        }
    }
}

impl<A: ImageAllocator> PixelBuffer for Image<A> {
    fn layout(&self) -> &ImageLayout {
        &self.layout
    }

    fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
