use crate::{
    buffer::Buffer,
    dtype::DType,
    error::{Error, Result},
};

pub struct CpuBuffer {
    data: Vec<u8>,
    dtype: DType,
}

impl CpuBuffer {
    pub fn new(len: usize, dtype: DType) -> Result<Self> {
        let total_size = len
            .checked_mul(dtype.size_in_bytes())
            .ok_or_else(|| Error::InvalidArgument("Overflow in allocation".into()))?;
        Ok(Self {
            data: vec![0; total_size],
            dtype,
        })
    }
}

impl Buffer for CpuBuffer {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn len(&self) -> usize {
        self.data.len() / self.dtype.size_in_bytes()
    }

    fn dtype(&self) -> DType {
        self.dtype
    }
}
