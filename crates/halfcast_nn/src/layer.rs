use halfcast_core::error::{Error, Result};
use halfcast_tensor::Tensor;

/// A pipeline stage with a uniform setup / forward / backward contract.
///
/// `inputs` are borrowed for the duration of a call and never retained.
/// `outputs` are owned by the caller; `setup` may reshape them and `forward`
/// overwrites their contents.
pub trait Layer: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn exact_num_inputs(&self) -> Option<usize> {
        None
    }

    fn exact_num_outputs(&self) -> Option<usize> {
        None
    }

    fn setup(&mut self, inputs: &[&Tensor], outputs: &mut [&mut Tensor]) -> Result<()>;

    fn forward(&self, inputs: &[&Tensor], outputs: &mut [&mut Tensor]) -> Result<()>;

    fn has_backward(&self) -> bool {
        false
    }

    /// Propagates `output_grads` into `input_grads`. Layers without a
    /// gradient refuse.
    fn backward(&self, _output_grads: &[&Tensor], _input_grads: &mut [&mut Tensor]) -> Result<()> {
        log::warn!("{} layer has no backward pass", self.type_name());
        Err(Error::UnsupportedBackward {
            layer: self.type_name().to_string(),
        })
    }

    fn check_counts(&self, inputs: usize, outputs: usize) -> Result<()> {
        if let Some(expected) = self.exact_num_inputs() {
            if inputs != expected {
                return Err(Error::Configuration {
                    message: format!("{} layer takes {} input(s), got {}", self.type_name(), expected, inputs),
                });
            }
        }
        if let Some(expected) = self.exact_num_outputs() {
            if outputs != expected {
                return Err(Error::Configuration {
                    message: format!("{} layer produces {} output(s), got {}", self.type_name(), expected, outputs),
                });
            }
        }
        Ok(())
    }
}
