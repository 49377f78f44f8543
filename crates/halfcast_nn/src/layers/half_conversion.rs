use crate::{layer::Layer, param::LayerParameter};
use halfcast_core::{
    codec::{self, Direction},
    error::{Error, Result},
};
use halfcast_tensor::Tensor;
use log::{debug, trace};

pub const TYPE_NAME: &str = "HalfConversion";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Unconfigured,
    Configured(Direction),
    Ready { direction: Direction, shape: Vec<usize> },
}

/// Re-encodes one tensor between `f32` and half storage.
///
/// The stage moves from unconfigured to configured once a direction is
/// fixed, and to ready after `setup` has bound a shape. The direction never
/// changes afterwards; build a new stage for the other way.
#[derive(Debug, Clone)]
pub struct HalfConversion {
    name: String,
    stage: Stage,
}

impl Default for HalfConversion {
    fn default() -> Self {
        Self::new()
    }
}

impl HalfConversion {
    pub fn new() -> Self {
        Self {
            name: TYPE_NAME.to_string(),
            stage: Stage::Unconfigured,
        }
    }

    pub fn with_direction(direction: Direction) -> Self {
        Self {
            name: TYPE_NAME.to_string(),
            stage: Stage::Configured(direction),
        }
    }

    /// Reads the direction from `half_conversion_param`, falling back to
    /// the parameter's default (`convert_to = true`) when it is absent.
    pub fn from_param(param: &LayerParameter) -> Result<Self> {
        if param.layer_type != TYPE_NAME {
            return Err(Error::Configuration {
                message: format!("expected a {} layer parameter, got type {:?}", TYPE_NAME, param.layer_type),
            });
        }

        let direction = param.half_conversion_param.clone().unwrap_or_default().direction();
        let mut layer = Self::with_direction(direction);
        if !param.name.is_empty() {
            layer.name = param.name.clone();
        }
        Ok(layer)
    }

    pub fn configure(&mut self, direction: Direction) -> Result<()> {
        match self.stage {
            Stage::Unconfigured => {
                self.stage = Stage::Configured(direction);
                Ok(())
            }
            _ => Err(Error::Configuration {
                message: format!("{} is already configured; build a new stage to change direction", self.name),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Option<Direction> {
        match &self.stage {
            Stage::Unconfigured => None,
            Stage::Configured(direction) | Stage::Ready { direction, .. } => Some(*direction),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.stage, Stage::Ready { .. })
    }

    fn uninitialized(&self) -> Error {
        Error::UninitializedStage {
            layer: self.name.clone(),
        }
    }

    fn check_input(direction: Direction, input: &Tensor) -> Result<()> {
        if input.dtype() != direction.input_dtype() {
            return Err(Error::DTypeMismatch {
                expected: direction.input_dtype(),
                got: input.dtype(),
            });
        }
        Ok(())
    }
}

impl Layer for HalfConversion {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn exact_num_inputs(&self) -> Option<usize> {
        Some(1)
    }

    fn exact_num_outputs(&self) -> Option<usize> {
        Some(1)
    }

    fn setup(&mut self, inputs: &[&Tensor], outputs: &mut [&mut Tensor]) -> Result<()> {
        let direction = self.direction().ok_or_else(|| self.uninitialized())?;
        self.check_counts(inputs.len(), outputs.len())?;

        let input = inputs[0];
        let output = &mut *outputs[0];
        Self::check_input(direction, input)?;

        output.reshape_with_dtype(input.shape(), direction.output_dtype())?;
        let expected = input.count() * direction.output_dtype().size_in_bytes();
        if output.as_bytes().len() != expected {
            return Err(Error::BufferSize {
                expected,
                got: output.as_bytes().len(),
            });
        }

        debug!(
            "{}: setup {} {:?} ({} elements)",
            self.name,
            direction.as_str(),
            input.shape(),
            input.count()
        );
        self.stage = Stage::Ready {
            direction,
            shape: input.shape().to_vec(),
        };
        Ok(())
    }

    fn forward(&self, inputs: &[&Tensor], outputs: &mut [&mut Tensor]) -> Result<()> {
        let (direction, shape) = match &self.stage {
            Stage::Ready { direction, shape } => (*direction, shape),
            _ => return Err(self.uninitialized()),
        };
        self.check_counts(inputs.len(), outputs.len())?;

        let input = inputs[0];
        let output = &mut *outputs[0];
        Self::check_input(direction, input)?;
        for (tensor, which) in [(input, "input"), (&*output, "output")] {
            if tensor.shape() != shape.as_slice() {
                return Err(Error::ShapeMismatch {
                    expected: shape.clone(),
                    got: tensor.shape().to_vec(),
                    msg: format!("{} {} changed since setup", self.name, which),
                });
            }
        }
        if output.dtype() != direction.output_dtype() {
            return Err(Error::DTypeMismatch {
                expected: direction.output_dtype(),
                got: output.dtype(),
            });
        }

        let count = input.count();
        codec::convert_bytes_in(direction, input.as_bytes(), output.as_bytes_mut()?, count)?;
        trace!("{}: forward {} converted {} elements", self.name, direction.as_str(), count);

        Ok(())
    }
}
