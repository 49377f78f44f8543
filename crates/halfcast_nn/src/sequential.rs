use crate::{layer::Layer, param::NetParameter, registry::create_layer};
use halfcast_core::error::{Error, Result};
use halfcast_tensor::Tensor;
use log::debug;

/// Runs single-input, single-output layers in order.
///
/// Owns every layer and the tensor each one writes; layer `i` reads the
/// output of layer `i - 1`, and the first layer reads the caller's input.
#[derive(Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
    outputs: Vec<Tensor>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_param(param: &NetParameter) -> Result<Self> {
        let mut net = Self::new();
        for layer_param in &param.layers {
            net.push(create_layer(layer_param)?)?;
        }
        debug!("built net {:?} with {} layer(s)", param.name, net.len());
        Ok(net)
    }

    pub fn push(&mut self, layer: Box<dyn Layer>) -> Result<()> {
        layer.check_counts(1, 1)?;
        self.layers.push(layer);
        self.outputs.push(Tensor::empty()?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn output(&self, index: usize) -> Option<&Tensor> {
        self.outputs.get(index)
    }

    pub fn setup(&mut self, input: &Tensor) -> Result<()> {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let (done, rest) = self.outputs.split_at_mut(i);
            let bottom = if i == 0 { input } else { &done[i - 1] };
            layer.setup(&[bottom], &mut [&mut rest[0]])?;
        }
        Ok(())
    }

    /// Runs every layer and returns the last output.
    pub fn forward(&mut self, input: &Tensor) -> Result<&Tensor> {
        if self.is_empty() {
            return Err(Error::Configuration {
                message: "sequential net has no layers".into(),
            });
        }

        for (i, layer) in self.layers.iter().enumerate() {
            let (done, rest) = self.outputs.split_at_mut(i);
            let bottom = if i == 0 { input } else { &done[i - 1] };
            layer.forward(&[bottom], &mut [&mut rest[0]])?;
        }

        self.outputs.last().ok_or_else(|| Error::Configuration {
            message: "sequential net has no outputs".into(),
        })
    }
}
