use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl Layout {
    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
    pub fn size_dim(&self, dim: usize) -> Option<usize> {
        self.shape.get(dim).copied()
    }
    /// Element count. Shapes built through `compute_size` never overflow,
    /// so saturation only matters for hand-assembled layouts.
    pub fn size(&self) -> usize {
        if self.shape.is_empty() {
            0
        } else {
            self.shape.iter().fold(1usize, |acc, &d| acc.saturating_mul(d))
        }
    }
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Reinterprets the same elements under a new shape.
    pub fn view(&mut self, new_shape: &[usize]) -> Result<()> {
        let old_size = self.size();
        let new_size = Self::compute_size(new_shape)?;

        if old_size != new_size {
            return Err(Error::InvalidShape {
                message: format!("Cannot view layout of size {} as {:?} (size {})", old_size, new_shape, new_size),
            });
        }

        self.set_shape(new_shape);

        Ok(())
    }

    pub fn set_shape(&mut self, shape: &[usize]) {
        self.shape = shape.to_vec();
        self.strides = Self::compute_strides(shape);
    }

    // helper

    pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
        if shape.is_empty() {
            return vec![];
        }

        let mut strides = vec![1; shape.len()];
        for i in (0..shape.len() - 1).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }
        strides
    }

    /// Element count of `shape`. An empty shape holds no elements.
    pub fn compute_size(shape: &[usize]) -> Result<usize> {
        if shape.is_empty() {
            return Ok(0);
        }

        shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| Error::InvalidShape {
                message: format!("element count of {:?} overflows usize", shape),
            })
    }
}
