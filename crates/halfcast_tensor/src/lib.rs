mod creation;
pub mod filler;
#[cfg(feature = "serde")]
mod serde;

use halfcast_core::{
    buffer::{Buffer, BufferManager},
    dtype::{DType, Element},
    error::{Error, Result},
    layout::Layout,
};
use std::sync::Arc;

pub use filler::{Filler, FillerParameter};

/// A shaped, contiguous host buffer.
///
/// Element count always equals `layout().size()`. The element width comes
/// from `dtype()`; changing it through [`Tensor::reshape_with_dtype`] keeps
/// the shape and count but reallocates the bytes at the new width.
#[derive(Clone)]
pub struct Tensor {
    buffer: Arc<dyn Buffer>,
    dtype: DType,
    layout: Layout,
}

impl Tensor {
    // data

    pub fn buffer(&self) -> &dyn Buffer {
        Arc::as_ref(&self.buffer)
    }

    fn buffer_clone(&self) -> Result<Arc<dyn Buffer>> {
        let src_buffer = self.buffer();
        let mut new_buffer = BufferManager::create(src_buffer.len(), src_buffer.dtype())?;
        Arc::get_mut(&mut new_buffer)
            .ok_or(Error::BufferShared)?
            .copy_from(src_buffer)?;
        Ok(new_buffer)
    }

    /// Runs `func` on a buffer this tensor owns exclusively, detaching it
    /// from any clones first.
    pub fn with_buffer_mut<F, R>(&mut self, func: F) -> Result<R>
    where
        F: FnOnce(&mut dyn Buffer) -> Result<R>,
    {
        if Arc::strong_count(&self.buffer) != 1 {
            self.buffer = self.buffer_clone()?;
        }
        let buffer = Arc::get_mut(&mut self.buffer).ok_or(Error::BufferShared)?;
        func(buffer)
    }

    /// Read-only view of the raw storage, `count() * dtype().size_in_bytes()` long.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer().as_bytes()
    }

    /// Mutable view of the raw storage. Detaches from clones first.
    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8]> {
        if Arc::strong_count(&self.buffer) != 1 {
            self.buffer = self.buffer_clone()?;
        }
        let buffer = Arc::get_mut(&mut self.buffer).ok_or(Error::BufferShared)?;
        Ok(buffer.as_bytes_mut())
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.layout.size_dim(dim)
    }

    /// Number of elements, the product of `shape()`.
    pub fn count(&self) -> usize {
        self.layout.size()
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn size_in_bytes(&self) -> usize {
        self.count() * self.dtype.size_in_bytes()
    }

    // reshape

    /// Changes the shape, keeping the dtype.
    pub fn reshape(&mut self, shape: &[usize]) -> Result<()> {
        self.reshape_with_dtype(shape, self.dtype)
    }

    /// Changes shape and element width together.
    ///
    /// Storage is kept when it already holds `count * width` bytes of the
    /// requested dtype; otherwise a zeroed buffer of that size replaces it.
    pub fn reshape_with_dtype(&mut self, shape: &[usize], dtype: DType) -> Result<()> {
        let count = checked_count(shape)?;
        if self.buffer.dtype() != dtype || self.buffer.len() != count {
            self.buffer = BufferManager::create(count, dtype)?;
        }
        self.dtype = dtype;
        self.layout.set_shape(shape);

        Ok(())
    }

    /// Same elements, new shape.
    pub fn view(&mut self, shape: &[usize]) -> Result<()> {
        self.layout.view(shape)
    }

    pub fn reshape_like(&mut self, other: &Tensor) -> Result<()> {
        self.reshape_with_dtype(other.shape(), other.dtype())
    }

    // typed access

    pub fn to_flatten_vec<T: Element>(&self) -> Result<Vec<T>> {
        self.buffer().read::<T>()
    }

    pub fn copy_from_slice<T: Element>(&mut self, data: &[T]) -> Result<()> {
        self.with_buffer_mut(|buffer| buffer.write(data))
    }

    pub fn get<T: Element>(&self, index: usize) -> Result<T> {
        if T::DTYPE != self.dtype {
            return Err(Error::DTypeMismatch {
                expected: self.dtype,
                got: T::DTYPE,
            });
        }
        if index >= self.count() {
            return Err(Error::InvalidArgument(format!(
                "Index out of bounds: {} >= {}",
                index,
                self.count()
            )));
        }

        let width = self.dtype.size_in_bytes();
        let start = index * width;
        Ok(T::read_ne(&self.as_bytes()[start..start + width]))
    }
}

/// Element count of a tensor shape: every dimension positive, product in range.
pub(crate) fn checked_count(shape: &[usize]) -> Result<usize> {
    if shape.iter().any(|&d| d == 0) {
        return Err(Error::InvalidShape {
            message: format!("dimensions must be positive, got {:?}", shape),
        });
    }
    Layout::compute_size(shape)
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype)
            .finish()
    }
}
