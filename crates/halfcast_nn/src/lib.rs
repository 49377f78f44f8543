pub mod layer;
pub mod layers;
pub mod param;
pub mod registry;
pub mod sequential;

pub use crate::{
    layer::Layer,
    layers::half_conversion::HalfConversion,
    param::{HalfConversionParameter, LayerParameter, NetParameter},
    registry::create_layer,
    sequential::Sequential,
};
