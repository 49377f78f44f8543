use crate::{checked_count, filler::Filler, Tensor};
use halfcast_core::{
    buffer::BufferManager,
    dtype::{get_default_dtype, DType, Element},
    error::{Error, Result},
    layout::Layout,
};

impl Tensor {
    /// A tensor with no shape and no storage, ready to be reshaped by a stage.
    pub fn empty() -> Result<Self> {
        Self::empty_with_dtype(get_default_dtype())
    }

    pub fn empty_with_dtype(dtype: DType) -> Result<Self> {
        Ok(Self {
            buffer: BufferManager::create(0, dtype)?,
            dtype,
            layout: Layout::from_shape(&[]),
        })
    }

    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::zeros_with_dtype(shape, get_default_dtype())
    }

    pub fn zeros_with_dtype(shape: &[usize], dtype: DType) -> Result<Self> {
        let mut result = Self::empty_with_dtype(dtype)?;
        result.reshape_with_dtype(shape, dtype)?;

        Ok(result)
    }

    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let size = checked_count(shape)?;
        if size != data.len() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
                msg: "data length does not match shape".into(),
            });
        }

        let mut result = Self::zeros_with_dtype(shape, T::DTYPE)?;
        result.copy_from_slice(&data)?;

        Ok(result)
    }

    pub fn full(shape: &[usize], value: f32) -> Result<Self> {
        let mut result = Self::zeros_with_dtype(shape, DType::F32)?;
        Filler::Constant { value }.fill(&mut result)?;

        Ok(result)
    }

    /// Standard normal samples, as the default gaussian filler draws them.
    pub fn randn(shape: &[usize]) -> Result<Self> {
        Self::randn_with_params(shape, 0.0, 1.0)
    }

    pub fn randn_with_params(shape: &[usize], mean: f32, std: f32) -> Result<Self> {
        let mut result = Self::zeros_with_dtype(shape, DType::F32)?;
        Filler::Gaussian { mean, std }.fill(&mut result)?;

        Ok(result)
    }

    pub fn randn_like(src: &Tensor) -> Result<Self> {
        Self::randn(src.shape())
    }
}
