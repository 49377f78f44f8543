//! Value fillers for freshly allocated `f32` tensors.

use crate::Tensor;
use halfcast_core::{
    dtype::DType,
    error::{Error, Result},
};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FillerType {
    #[default]
    Constant,
    Uniform,
    Gaussian,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FillerParameter {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub filler_type: FillerType,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub std: f32,
}

impl Default for FillerParameter {
    fn default() -> Self {
        Self {
            filler_type: FillerType::Constant,
            value: 0.0,
            min: 0.0,
            max: 1.0,
            mean: 0.0,
            std: 1.0,
        }
    }
}

impl FillerParameter {
    pub fn set_type(&mut self, filler_type: FillerType) -> &mut Self {
        self.filler_type = filler_type;
        self
    }

    pub fn set_value(&mut self, value: f32) -> &mut Self {
        self.value = value;
        self
    }

    pub fn set_min(&mut self, min: f32) -> &mut Self {
        self.min = min;
        self
    }

    pub fn set_max(&mut self, max: f32) -> &mut Self {
        self.max = max;
        self
    }

    pub fn set_mean(&mut self, mean: f32) -> &mut Self {
        self.mean = mean;
        self
    }

    pub fn set_std(&mut self, std: f32) -> &mut Self {
        self.std = std;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filler {
    Constant { value: f32 },
    Uniform { min: f32, max: f32 },
    Gaussian { mean: f32, std: f32 },
}

impl Filler {
    pub fn from_param(param: &FillerParameter) -> Self {
        match param.filler_type {
            FillerType::Constant => Self::Constant { value: param.value },
            FillerType::Uniform => Self::Uniform {
                min: param.min,
                max: param.max,
            },
            FillerType::Gaussian => Self::Gaussian {
                mean: param.mean,
                std: param.std,
            },
        }
    }

    pub fn fill(&self, tensor: &mut Tensor) -> Result<()> {
        self.fill_with_rng(tensor, &mut rand::thread_rng())
    }

    pub fn fill_with_rng<R: Rng + ?Sized>(&self, tensor: &mut Tensor, rng: &mut R) -> Result<()> {
        if tensor.dtype() != DType::F32 {
            return Err(Error::DTypeMismatch {
                expected: DType::F32,
                got: tensor.dtype(),
            });
        }
        let count = tensor.count();

        let data: Vec<f32> = match *self {
            Self::Constant { value } => vec![value; count],
            Self::Uniform { min, max } => {
                if !(min.is_finite() && max.is_finite() && (max - min).is_finite() && min <= max) {
                    return Err(Error::InvalidArgument(format!(
                        "uniform filler needs finite min <= max with a finite width, got min={} max={}",
                        min, max
                    )));
                }
                let uniform = Uniform::new_inclusive(min, max);
                uniform.sample_iter(&mut *rng).take(count).collect()
            }
            Self::Gaussian { mean, std } => {
                let normal = Normal::new(mean, std).map_err(|e| Error::External {
                    message: format!("Failed to create normal distribution with mean={} std={}: {}", mean, std, e),
                })?;
                normal.sample_iter(&mut *rng).take(count).collect()
            }
        };

        log::trace!("filled {} elements with {:?}", count, self);
        tensor.copy_from_slice(&data)
    }
}
