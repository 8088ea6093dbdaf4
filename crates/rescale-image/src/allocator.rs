use crate::error::ImageError;

/// A trait for providing the byte buffers backing owned images.
///
/// Buffers are released when the owning [`crate::Image`] is dropped.
pub trait ImageAllocator: Clone {
    /// Allocates a buffer of exactly `len` bytes.
    ///
    /// The content of the returned buffer is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::AllocationFailure`] if the memory cannot be reserved.
    fn alloc(&self, len: usize) -> Result<Vec<u8>, ImageError>;
}

/// An image allocator that uses the system allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuAllocator;

impl ImageAllocator for CpuAllocator {
    fn alloc(&self, len: usize) -> Result<Vec<u8>, ImageError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageError::AllocationFailure(len))?;
        data.resize(len, 0);
        Ok(data)
    }
}
