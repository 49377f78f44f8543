pub mod cpu;

use crate::{
    dtype::{DType, Element},
    error::{Error, Result},
};
use cpu::CpuBuffer;
use std::sync::Arc;

pub struct BufferManager {}

impl BufferManager {
    pub fn create(len: usize, dtype: DType) -> Result<Arc<dyn Buffer>> {
        let buffer: Arc<dyn Buffer> = Arc::new(CpuBuffer::new(len, dtype)?);

        Ok(buffer)
    }
}

/// Contiguous host storage holding `len()` elements of `dtype()`.
///
/// The storage is untyped bytes. Callers pick an element width through
/// `dtype()` and go through [`Buffer::read`] / [`Buffer::write`] or the
/// codec's byte helpers, which check the byte length against
/// `len() * dtype().size_in_bytes()`.
pub trait Buffer: Send + Sync {
    fn as_bytes(&self) -> &[u8];
    fn as_bytes_mut(&mut self) -> &mut [u8];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn dtype(&self) -> DType;

    fn size_in_bytes(&self) -> usize {
        self.len() * self.dtype().size_in_bytes()
    }

    fn copy_from(&mut self, other: &dyn Buffer) -> Result<()> {
        if self.dtype() != other.dtype() {
            return Err(Error::DTypeMismatch {
                expected: self.dtype(),
                got: other.dtype(),
            });
        }
        if self.len() != other.len() {
            return Err(Error::BufferSize {
                expected: self.size_in_bytes(),
                got: other.size_in_bytes(),
            });
        }

        self.as_bytes_mut().copy_from_slice(other.as_bytes());
        Ok(())
    }
}

impl dyn Buffer + '_ {
    /// Reads every element as `T`.
    pub fn read<T: Element>(&self) -> Result<Vec<T>> {
        check_element::<T>(self.dtype())?;

        let width = self.dtype().size_in_bytes();
        Ok(self.as_bytes().chunks_exact(width).map(T::read_ne).collect())
    }

    /// Overwrites the whole buffer with `data`.
    pub fn write<T: Element>(&mut self, data: &[T]) -> Result<()> {
        check_element::<T>(self.dtype())?;
        if data.len() != self.len() {
            return Err(Error::BufferSize {
                expected: self.size_in_bytes(),
                got: data.len() * T::DTYPE.size_in_bytes(),
            });
        }

        let width = self.dtype().size_in_bytes();
        for (out, &value) in self.as_bytes_mut().chunks_exact_mut(width).zip(data) {
            value.write_ne(out);
        }
        Ok(())
    }
}

fn check_element<T: Element>(dtype: DType) -> Result<()> {
    if T::DTYPE != dtype {
        return Err(Error::DTypeMismatch {
            expected: dtype,
            got: T::DTYPE,
        });
    }
    Ok(())
}
