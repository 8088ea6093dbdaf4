/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when a width, height or channel count is zero, or the byte size overflows.
    #[error("Invalid image dimensions: {0}x{1} with {2} channels")]
    InvalidDimensions(usize, usize, usize),

    /// Error when the allocator cannot provide a buffer of the requested size.
    #[error("Failed to allocate {0} bytes for the image buffer")]
    AllocationFailure(usize),

    /// Error when the buffer length does not match the image layout.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the row stride is shorter than a row of pixels.
    #[error("Row stride ({0}) is smaller than the row length ({1})")]
    InvalidRowStride(usize, usize),

    /// Error when the source and destination channel counts differ.
    #[error("Channel count mismatch: source has {0}, destination has {1}")]
    ChannelMismatch(usize, usize),

    /// Error when a filter name cannot be parsed.
    #[error("Unknown filter kernel: {0}")]
    UnknownFilter(String),
}
