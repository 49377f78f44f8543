use crate::{
    layer::Layer,
    layers::half_conversion::{self, HalfConversion},
    param::LayerParameter,
};
use halfcast_core::error::{Error, Result};

/// Layer types `create_layer` knows how to build.
pub const LAYER_TYPES: &[&str] = &[half_conversion::TYPE_NAME];

pub fn create_layer(param: &LayerParameter) -> Result<Box<dyn Layer>> {
    match param.layer_type.as_str() {
        half_conversion::TYPE_NAME => Ok(Box::new(HalfConversion::from_param(param)?)),
        other => Err(Error::Configuration {
            message: format!("unknown layer type {:?} (known: {})", other, LAYER_TYPES.join(", ")),
        }),
    }
}
