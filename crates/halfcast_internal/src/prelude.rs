pub use crate::core::{
    codec::Direction,
    dtype::*,
    error::{Error, Result},
    half::f16,
};
#[cfg(feature = "nn")]
pub use crate::nn::{create_layer, HalfConversion, Layer, LayerParameter, NetParameter, Sequential};
pub use crate::tensor::{Filler, FillerParameter, Tensor};
