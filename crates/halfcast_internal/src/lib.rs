pub mod prelude;

pub use halfcast_core as core;
#[cfg(feature = "nn")]
pub use halfcast_nn as nn;
pub use halfcast_tensor as tensor;

pub use halfcast_core::dtype::{float16, float32};
